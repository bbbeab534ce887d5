use std::path::PathBuf;
use std::time::Duration;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::input::LanguageCode;

/// Placeholder replaced by the language code in `translationsPath`.
pub const LANGUAGE_PLACEHOLDER: &str = "{language}";

/// 設定値の検証エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "translationsPath")
    pub field_path: String,
    /// エラーの内容
    pub message: String,
}

impl ValidationError {
    /// 検証エラーを作成
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

/// 設定の読み込みエラー
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 検証エラー（すべてのエラーを含む）
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    /// ファイル読み込みエラー
    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON パースエラー
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// 検証エラーを番号付きの行に整形する
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// What to do with a translation response that arrives after a newer
/// request has already been started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum StaleResponsePolicy {
    /// Every response is applied; the last one to resolve wins.
    #[default]
    LastWriteWins,
    /// Only the response of the most recently started request is applied.
    DiscardStale,
}

/// `.edureach-i18n.json` の設定値
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct I18nSettings {
    /// Origin of the translation API (e.g. "http://127.0.0.1:5000").
    pub base_url: String,
    /// Path template; must contain `{language}`.
    pub translations_path: String,

    /// Used when no preference has been persisted yet.
    pub default_language: String,
    /// Storage key of the language preference.
    pub preference_key: String,
    /// Relative paths are resolved against the workspace root.
    pub storage_file: PathBuf,

    /// Brand substring in the page title replaced by the `title` translation.
    pub brand_name: String,

    /// Handling of responses superseded by a newer request.
    pub stale_responses: StaleResponsePolicy,

    /// HTTP client timeout. Unset means the transport default.
    pub request_timeout_ms: Option<u64>,

    /// Auto-dismiss delay of toast notifications.
    pub notification_duration_ms: u64,
}

impl I18nSettings {
    /// # Errors
    /// - Required field is empty
    /// - Path template without `{language}`
    /// - Invalid default language code
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.base_url.trim().is_empty() {
            errors.push(ValidationError::new(
                "baseUrl",
                "The base URL cannot be empty. Example: \"http://127.0.0.1:5000\"",
            ));
        } else if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://"))
        {
            errors.push(ValidationError::new(
                "baseUrl",
                format!("The base URL must start with http:// or https://, got '{}'", self.base_url),
            ));
        }

        if !self.translations_path.contains(LANGUAGE_PLACEHOLDER) {
            errors.push(ValidationError::new(
                "translationsPath",
                format!(
                    "The path must contain the {LANGUAGE_PLACEHOLDER} placeholder. Example: \"/api/translations/{LANGUAGE_PLACEHOLDER}\""
                ),
            ));
        }

        if let Err(e) = LanguageCode::new(self.default_language.as_str()) {
            errors.push(ValidationError::new(
                "defaultLanguage",
                format!("Invalid language code '{}': {e}", self.default_language),
            ));
        }

        if self.preference_key.is_empty() {
            errors.push(ValidationError::new(
                "preferenceKey",
                "The key cannot be empty. Example: \"preferred-language\"",
            ));
        }

        if self.storage_file.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "storageFile",
                "The storage file path cannot be empty",
            ));
        }

        if self.brand_name.is_empty() {
            errors.push(ValidationError::new(
                "brandName",
                "The brand name cannot be empty. Example: \"EduReach\"",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Default language as a validated code.
    ///
    /// Falls back to the baseline language when the configured value is
    /// invalid, which only happens for settings that skipped `validate`.
    #[must_use]
    pub fn default_language_code(&self) -> LanguageCode {
        LanguageCode::new(self.default_language.as_str()).unwrap_or_else(|e| {
            tracing::warn!("Invalid default language '{}': {e}", self.default_language);
            LanguageCode::baseline()
        })
    }

    /// `requestTimeoutMs` as a `Duration`
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    /// `notificationDurationMs` as a `Duration`
    #[must_use]
    pub const fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_duration_ms)
    }
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            translations_path: format!("/api/translations/{LANGUAGE_PLACEHOLDER}"),
            default_language: "en".to_string(),
            preference_key: "preferred-language".to_string(),
            storage_file: PathBuf::from(".edureach/local-storage.json"),
            brand_name: "EduReach".to_string(),
            stale_responses: StaleResponsePolicy::default(),
            request_timeout_ms: None,
            notification_duration_ms: 5000,
        }
    }
}
