//! JSON API クライアント
//!
//! ページから呼ばれる REST エンドポイント用の薄いラッパー。
//! 失敗はログに出力したうえで呼び出し元に返す。

use std::time::Duration;

use reqwest::header::{
    CONTENT_TYPE,
    HeaderMap,
    HeaderValue,
};
use reqwest::{
    Method,
    StatusCode,
};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// API 呼び出しのエラー
#[derive(Error, Debug)]
pub enum ApiError {
    /// クライアントの作成に失敗
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// 接続・送受信の失敗
    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// 2xx 以外のレスポンス
    #[error("HTTP error! status: {status}")]
    Status { status: StatusCode },

    /// JSON のエンコード・デコードに失敗
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// JSON API クライアント
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// reqwest クライアント（コネクションプールを共有）
    client: reqwest::Client,
    /// エンドポイントのオリジン（末尾の `/` は除去済み）
    base_url: String,
}

impl ApiClient {
    /// クライアントを作成する
    ///
    /// # Arguments
    /// * `base_url` - API のオリジン（例: `http://127.0.0.1:5000`）
    /// * `timeout` - リクエストタイムアウト（`None` ならトランスポートのデフォルト）
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(ApiError::Client)?;
        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string() })
    }

    /// `path` をオリジンに連結した URL
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    /// `GET` してレスポンスボディをそのまま返す
    pub async fn get(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        self.logged(self.send(Method::GET, path, None).await)
    }

    /// 任意のメソッドでリクエストし、JSON レスポンスをデコードする
    ///
    /// `body` は JSON としてシリアライズして送る。2xx 以外のステータスは `ApiError::Status` になる。
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<T, ApiError> {
        let result = match self.send(method, path, body).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(ApiError::from),
            Err(error) => Err(error),
        };
        self.logged(result)
    }

    /// 失敗をログに出力する
    fn logged<T>(&self, result: Result<T, ApiError>) -> Result<T, ApiError> {
        if let Err(error) = &result {
            tracing::error!("API request to {} failed: {error}", self.base_url);
        }
        result
    }

    /// リクエスト本体
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Vec<u8>, ApiError> {
        let url = self.url(path);
        tracing::debug!("{method} {url}");

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await.map_err(ApiError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { status });
        }

        let bytes = response.bytes().await.map_err(ApiError::Transport)?;
        Ok(bytes.to_vec())
    }
}
