//! 翻訳パイプライン本体
//!
//! 言語設定 → 取得 → 適用 → 通知 を順番に実行する。

use std::sync::Arc;

use tokio::sync::Mutex;

use super::context::I18nAccessor;
use super::state::{
    LoadOutcome,
    LoadTracker,
    PipelineState,
};
use crate::config::{
    I18nSettings,
    StaleResponsePolicy,
};
use crate::fetch::TranslationFetcher;
use crate::input::LanguageCode;
use crate::notify::{
    ChangeNotifier,
    LanguageChanged,
};
use crate::page::{
    Document,
    apply_translations,
};
use crate::storage::{
    KeyValueStore,
    LanguagePreference,
    StorageError,
};

/// 翻訳パイプライン
///
/// クローンはすべての状態を共有する。エントリポイントはエラーを返さず、
/// 結果は常に `LoadOutcome` で表す。
///
/// 読み込みの重複は禁止しない。取得中はロックを保持しないため、
/// `LastWriteWins` では最後に完了したレスポンスが有効になる。
#[derive(Clone)]
pub struct TranslationPipeline {
    /// 言語設定の永続化
    preference: LanguagePreference,
    /// 翻訳の取得
    fetcher: Arc<dyn TranslationFetcher>,
    /// 翻訳を適用するページ
    document: Arc<Mutex<Document>>,
    /// 現在有効な翻訳
    accessor: I18nAccessor,
    /// 変更通知
    notifier: ChangeNotifier,
    /// 進行中の読み込み
    tracker: Arc<LoadTracker>,
    /// 有効化 → 適用 → 通知 を直列化するロック
    commit: Arc<Mutex<()>>,
    /// 言語設定がない場合の言語
    default_language: LanguageCode,
    /// タイトル中のブランド名
    brand_name: String,
    /// 古いレスポンスの扱い
    stale_policy: StaleResponsePolicy,
}

impl TranslationPipeline {
    /// パイプラインを作成する
    ///
    /// 有効な翻訳マップは空、言語はデフォルト言語で始まる。
    #[must_use]
    pub fn new(
        settings: &I18nSettings,
        store: Arc<dyn KeyValueStore>,
        fetcher: Arc<dyn TranslationFetcher>,
        document: Arc<Mutex<Document>>,
    ) -> Self {
        let default_language = settings.default_language_code();
        Self {
            preference: LanguagePreference::new(store, settings.preference_key.clone()),
            fetcher,
            document,
            accessor: I18nAccessor::new(default_language.clone()),
            notifier: ChangeNotifier::new(),
            tracker: Arc::new(LoadTracker::default()),
            commit: Arc::new(Mutex::new(())),
            default_language,
            brand_name: settings.brand_name.clone(),
            stale_policy: settings.stale_responses,
        }
    }

    /// ページ読み込み時の処理
    ///
    /// 保存された言語（なければデフォルト言語）の翻訳を読み込む。デフォルト言語は保存しない。
    pub async fn initialize(&self) -> LoadOutcome {
        let language = self.saved_language().await.unwrap_or_else(|| {
            tracing::debug!("No saved language preference, using '{}'", self.default_language);
            self.default_language.clone()
        });
        self.load(language).await
    }

    /// ユーザーが言語を選択したときの処理
    ///
    /// 取得の前に言語設定を保存する。保存に失敗しても読み込みは続行する。
    pub async fn select_language(&self, language: LanguageCode) -> LoadOutcome {
        if let Err(error) = self.persist_language(&language).await {
            tracing::warn!("Failed to save language preference '{language}': {error}");
        }
        self.load(language).await
    }

    /// 翻訳を取得して適用する
    ///
    /// 取得に失敗した場合、有効な翻訳とページは変更しない。
    pub async fn load(&self, language: LanguageCode) -> LoadOutcome {
        let (_in_flight, generation) = self.tracker.begin();
        tracing::info!("Loading translations for '{language}'");

        let translations = match self.fetcher.fetch(&language).await {
            Ok(translations) => translations,
            Err(error) => {
                tracing::error!("Error loading translations for '{language}': {error}");
                return LoadOutcome::Failed { language, error };
            }
        };

        let _commit = self.commit.lock().await;

        if self.stale_policy == StaleResponsePolicy::DiscardStale
            && !self.tracker.is_latest(generation)
        {
            tracing::debug!("Discarding stale translations for '{language}'");
            return LoadOutcome::Discarded { language };
        }

        let count = translations.len();
        let translations = self.accessor.activate(language.clone(), translations).await;

        let report = {
            let mut document = self.document.lock().await;
            apply_translations(&mut document, &translations, &self.brand_name)
        };

        self.notifier.notify(&LanguageChanged { language: language.clone(), translations });

        tracing::info!(
            "Applied {count} translations for '{language}' to {} elements",
            report.elements_updated
        );

        LoadOutcome::Applied { language, report }
    }

    /// 保存されている言語（ストアの読み込みはブロッキングスレッドで行う）
    async fn saved_language(&self) -> Option<LanguageCode> {
        let preference = self.preference.clone();
        tokio::task::spawn_blocking(move || preference.get()).await.unwrap_or_else(|error| {
            tracing::error!("Failed to read language preference: {error}");
            None
        })
    }

    /// 言語を保存する（ストアの書き込みはブロッキングスレッドで行う）
    async fn persist_language(&self, language: &LanguageCode) -> Result<(), StorageError> {
        let preference = self.preference.clone();
        let language = language.clone();
        match tokio::task::spawn_blocking(move || preference.set(&language)).await {
            Ok(result) => result,
            Err(error) => Err(StorageError::Io(error.into())),
        }
    }

    /// 読み込み中かどうか
    #[must_use]
    pub fn state(&self) -> PipelineState {
        self.tracker.state()
    }

    /// 現在有効な翻訳への参照ハンドル
    #[must_use]
    pub fn accessor(&self) -> I18nAccessor {
        self.accessor.clone()
    }

    /// 変更通知（購読用）
    #[must_use]
    pub const fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    /// 言語設定の永続化
    #[must_use]
    pub const fn preference(&self) -> &LanguagePreference {
        &self.preference
    }

    /// 翻訳を適用するページ
    #[must_use]
    pub fn document(&self) -> Arc<Mutex<Document>> {
        Arc::clone(&self.document)
    }
}

impl std::fmt::Debug for TranslationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationPipeline")
            .field("preference", &self.preference)
            .field("fetcher", &"<dyn TranslationFetcher>")
            .field("document", &"<Document>")
            .field("notifier", &self.notifier)
            .field("state", &self.state())
            .field("default_language", &self.default_language)
            .field("stale_policy", &self.stale_policy)
            .finish_non_exhaustive()
    }
}
