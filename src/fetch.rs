//! 翻訳データの取得

mod http;

use futures::future::BoxFuture;
use thiserror::Error;

pub use http::HttpFetcher;

use crate::api::ApiError;
use crate::input::{
    LanguageCode,
    TranslationMap,
};

/// 翻訳取得のエラー
///
/// いずれのエラーもパイプラインでは同じように扱われる（ログ出力のみ、状態は変更しない）。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// ネットワーク到達不能など
    #[error("Transport error: {0}")]
    Transport(String),

    /// 2xx 以外のレスポンス
    #[error("Unexpected response status: {status}")]
    Status { status: u16 },

    /// レスポンスボディが翻訳マップの形式ではない
    #[error("Malformed translation body: {0}")]
    Malformed(String),
}

impl From<ApiError> for FetchError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Status { status } => Self::Status { status: status.as_u16() },
            ApiError::Decode(e) => Self::Malformed(e.to_string()),
            ApiError::Client(e) | ApiError::Transport(e) => Self::Transport(e.to_string()),
        }
    }
}

/// 言語コードに対応する翻訳マップを取得する
///
/// 呼び出しごとに独立したリクエストを発行する（同一言語の重複排除はしない）。
pub trait TranslationFetcher: Send + Sync {
    fn fetch<'a>(
        &'a self,
        language: &'a LanguageCode,
    ) -> BoxFuture<'a, Result<TranslationMap, FetchError>>;
}
