//! 現在有効な翻訳の保持と参照

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::input::{
    LanguageCode,
    TranslationMap,
};

/// 現在有効な言語と翻訳マップ（常に一緒に置き換える）
#[derive(Debug)]
struct ActiveTranslations {
    /// 現在の言語
    language: LanguageCode,
    /// 現在の翻訳マップ
    translations: Arc<TranslationMap>,
}

/// 現在有効な翻訳への参照ハンドル
///
/// パイプラインが所有し、他のページセクションにはクローンを渡す。
/// 書き換えはパイプラインのみが行う。
#[derive(Debug, Clone)]
pub struct I18nAccessor {
    /// 共有状態
    active: Arc<RwLock<ActiveTranslations>>,
}

impl I18nAccessor {
    /// 空の翻訳マップで作成する
    pub(crate) fn new(language: LanguageCode) -> Self {
        Self {
            active: Arc::new(RwLock::new(ActiveTranslations {
                language,
                translations: Arc::new(TranslationMap::new()),
            })),
        }
    }

    /// 翻訳を取得する
    ///
    /// 値が空でなければ値、なければ `fallback`（空でなければ）、それもなければキー自体を返す。
    pub async fn get(&self, key: &str, fallback: &str) -> String {
        let active = self.active.read().await;
        resolve(&active.translations, key, fallback).to_string()
    }

    /// 現在の言語
    pub async fn language(&self) -> LanguageCode {
        self.active.read().await.language.clone()
    }

    /// 現在の翻訳マップ
    pub async fn translations(&self) -> Arc<TranslationMap> {
        Arc::clone(&self.active.read().await.translations)
    }

    /// 言語と翻訳マップを丸ごと置き換える
    pub(crate) async fn activate(
        &self,
        language: LanguageCode,
        translations: TranslationMap,
    ) -> Arc<TranslationMap> {
        let translations = Arc::new(translations);
        let mut active = self.active.write().await;
        active.language = language;
        active.translations = Arc::clone(&translations);
        translations
    }
}

/// `get` のフォールバック規則
fn resolve<'a>(translations: &'a TranslationMap, key: &'a str, fallback: &'a str) -> &'a str {
    translations
        .non_empty(key)
        .unwrap_or(if fallback.is_empty() { key } else { fallback })
}
