//! 翻訳変更の通知
//!
//! 翻訳の適用後に `LanguageChanged` を配信し、初期表示後に生成された
//! コンテンツを各セクションが再描画できるようにする。

use std::sync::atomic::{
    AtomicU64,
    Ordering,
};
use std::sync::{
    Arc,
    Mutex,
    PoisonError,
};

use tokio::sync::broadcast;

use crate::input::{
    LanguageCode,
    TranslationMap,
};

/// チャネルのバッファサイズ
const CHANNEL_CAPACITY: usize = 16;

/// 翻訳が切り替わったことを表すイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageChanged {
    /// 適用された言語
    pub language: LanguageCode,
    /// 適用された翻訳マップ
    pub translations: Arc<TranslationMap>,
}

/// 購読の識別子（`unsubscribe` に使う）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// 購読コールバック
type Listener = Arc<dyn Fn(&LanguageChanged) + Send + Sync>;

/// 変更通知
///
/// コールバックは登録順に同期的に呼び出される。タスク間で疎結合に受け取りたい場合は
/// `channel` の受信側を使う。リスナーがいなくてもエラーにはならない。
#[derive(Clone)]
pub struct ChangeNotifier {
    /// 登録済みのコールバック
    listeners: Arc<Mutex<Vec<(SubscriptionId, Listener)>>>,
    /// 次に払い出す購読 ID
    next_id: Arc<AtomicU64>,
    /// チャネル購読者への送信側
    sender: broadcast::Sender<LanguageChanged>,
}

impl ChangeNotifier {
    /// 購読者のいない通知を作成する
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(0)),
            sender,
        }
    }

    /// コールバックを登録する
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&LanguageChanged) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        listeners.push((id, Arc::new(listener)));
        id
    }

    /// 登録を解除する。登録されていれば `true`
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }

    /// チャネルで受信する購読者を作成する
    #[must_use]
    pub fn channel(&self) -> broadcast::Receiver<LanguageChanged> {
        self.sender.subscribe()
    }

    /// 登録済みコールバックの数
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// イベントを配信する
    ///
    /// 配信先（コールバック + チャネル受信者）の数を返す。
    pub fn notify(&self, event: &LanguageChanged) -> usize {
        // コールバック内から subscribe/unsubscribe できるよう、ロックを外してから呼ぶ
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in &listeners {
            listener(event);
        }

        let receivers = self.sender.send(event.clone()).unwrap_or(0);

        tracing::debug!(
            "languageChanged({}) delivered to {} listeners and {} receivers",
            event.language,
            listeners.len(),
            receivers
        );

        listeners.len() + receivers
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &self.listener_count())
            .field("receivers", &self.sender.receiver_count())
            .finish()
    }
}
