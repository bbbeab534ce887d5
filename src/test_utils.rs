//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::collections::{
    HashMap,
    VecDeque,
};
use std::sync::Mutex;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::{
    Notify,
    oneshot,
};

use crate::fetch::{
    FetchError,
    TranslationFetcher,
};
use crate::input::{
    LanguageCode,
    TranslationMap,
};

/// テスト用の言語コードを作成する
pub(crate) fn code(value: &str) -> LanguageCode {
    LanguageCode::new(value).unwrap()
}

/// テスト用の翻訳マップを作成する
pub(crate) fn translations(entries: &[(&str, &str)]) -> TranslationMap {
    entries.iter().copied().collect()
}

/// 取得結果
type FetchResult = Result<TranslationMap, FetchError>;

/// 言語ごとの応答を設定できるフェッチャー
///
/// `defer` で登録した応答が `respond` の固定応答より優先され、登録順に消費される。
#[derive(Debug, Default)]
pub(crate) struct MockFetcher {
    /// 言語 → 固定の応答
    responses: Mutex<HashMap<String, FetchResult>>,
    /// 言語 → テスト側から完了させる応答
    deferred: Mutex<HashMap<String, VecDeque<oneshot::Receiver<FetchResult>>>>,
    /// 受け付けたリクエスト
    requests: Mutex<Vec<LanguageCode>>,
    /// リクエスト受付の通知
    requested: Notify,
}

impl MockFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// 言語に対する固定の応答を設定する
    pub(crate) fn respond(&self, language: &str, result: FetchResult) {
        self.responses.lock().unwrap().insert(language.to_string(), result);
    }

    /// 次のリクエストを保留し、返した送信側で完了させる
    pub(crate) fn defer(&self, language: &str) -> oneshot::Sender<FetchResult> {
        let (sender, receiver) = oneshot::channel();
        self.deferred
            .lock()
            .unwrap()
            .entry(language.to_string())
            .or_default()
            .push_back(receiver);
        sender
    }

    /// これまでに受け付けたリクエスト
    pub(crate) fn requests(&self) -> Vec<LanguageCode> {
        self.requests.lock().unwrap().clone()
    }

    /// リクエストが `count` 件に達するまで待つ
    pub(crate) async fn wait_for_requests(&self, count: usize) {
        loop {
            let notified = self.requested.notified();
            if self.requests.lock().unwrap().len() >= count {
                return;
            }
            notified.await;
        }
    }
}

impl TranslationFetcher for MockFetcher {
    fn fetch<'a>(
        &'a self,
        language: &'a LanguageCode,
    ) -> BoxFuture<'a, Result<TranslationMap, FetchError>> {
        self.requests.lock().unwrap().push(language.clone());
        self.requested.notify_waiters();

        let deferred = self
            .deferred
            .lock()
            .unwrap()
            .get_mut(language.as_str())
            .and_then(VecDeque::pop_front);

        let fixed = self.responses.lock().unwrap().get(language.as_str()).cloned();

        async move {
            if let Some(receiver) = deferred {
                return receiver
                    .await
                    .unwrap_or_else(|_| Err(FetchError::Transport("request aborted".to_string())));
            }
            fixed.unwrap_or_else(|| Err(FetchError::Status { status: 404 }))
        }
        .boxed()
    }
}
