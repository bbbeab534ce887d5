use futures::FutureExt;
use futures::future::BoxFuture;

use super::{
    FetchError,
    TranslationFetcher,
};
use crate::api::{
    ApiClient,
    ApiError,
};
use crate::config::{
    I18nSettings,
    LANGUAGE_PLACEHOLDER,
};
use crate::input::{
    LanguageCode,
    TranslationMap,
};

/// `GET {base_url}{translations_path}` で翻訳を取得する
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    /// API クライアント
    client: ApiClient,
    /// `{language}` を含むパステンプレート
    path_template: String,
}

impl HttpFetcher {
    /// `path_template` は `{language}` を含むこと
    #[must_use]
    pub fn new(client: ApiClient, path_template: impl Into<String>) -> Self {
        Self { client, path_template: path_template.into() }
    }

    /// 設定からフェッチャーを作成する
    pub fn from_settings(settings: &I18nSettings) -> Result<Self, ApiError> {
        let client = ApiClient::new(&settings.base_url, settings.request_timeout())?;
        Ok(Self::new(client, settings.translations_path.clone()))
    }

    /// 言語コードを埋め込んだパス
    #[must_use]
    pub fn path_for(&self, language: &LanguageCode) -> String {
        self.path_template.replace(LANGUAGE_PLACEHOLDER, language.as_str())
    }

    /// 言語コードに対応する URL
    #[must_use]
    pub fn url_for(&self, language: &LanguageCode) -> String {
        self.client.url(&self.path_for(language))
    }
}

impl TranslationFetcher for HttpFetcher {
    fn fetch<'a>(
        &'a self,
        language: &'a LanguageCode,
    ) -> BoxFuture<'a, Result<TranslationMap, FetchError>> {
        async move {
            let body = self.client.get(&self.path_for(language)).await?;
            let map = TranslationMap::from_json_slice(&body)
                .map_err(|error| FetchError::Malformed(error.to_string()))?;
            tracing::debug!("Fetched {} translations for '{language}'", map.len());
            Ok::<_, FetchError>(map)
        }
        .boxed()
    }
}
