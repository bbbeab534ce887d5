//! 言語コードの定義

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// RFC 5646 language codes
/// Based on <http://tools.ietf.org/html/rfc5646>
static LANGUAGE_CODES: LazyLock<HashSet<String>> = LazyLock::new(|| {
    [
        "af", "af-ZA", "ar", "ar-AE", "ar-EG", "ar-SA", "az", "be", "bg", "bn", "bn-IN", "bs-BA",
        "ca", "cs", "cs-CZ", "cy", "da", "da-DK", "de", "de-AT", "de-CH", "de-DE", "el", "el-GR",
        "en", "en-AU", "en-CA", "en-GB", "en-IE", "en-IN", "en-NZ", "en-US", "en-ZA", "eo", "es",
        "es-AR", "es-CL", "es-CO", "es-ES", "es-MX", "es-US", "et", "eu", "fa", "fa-IR", "fi",
        "fr", "fr-BE", "fr-CA", "fr-CH", "fr-FR", "gl", "gu", "gu-IN", "he", "he-IL", "hi",
        "hi-IN", "hr", "hu", "hy", "id", "id-ID", "is", "it", "it-IT", "ja", "ja-JP", "ka", "kk",
        "kn", "kn-IN", "ko", "ko-KR", "ky", "lt", "lv", "mi", "mk", "ml", "ml-IN", "mn", "mr",
        "mr-IN", "ms", "mt", "nb", "nb-NO", "nl", "nl-BE", "nl-NL", "or", "or-IN", "pa", "pa-IN",
        "pl", "pl-PL", "ps", "pt", "pt-BR", "pt-PT", "ro", "ru", "ru-RU", "sa", "sk", "sl", "sq",
        "sr", "sv", "sv-SE", "sw", "ta", "ta-IN", "te", "te-IN", "th", "th-TH", "tl", "tr",
        "tr-TR", "uk", "uk-UA", "ur", "ur-PK", "uz", "vi", "vi-VN", "zh", "zh-CN", "zh-HK",
        "zh-TW", "zu",
    ]
    .iter()
    .map(|code| normalize_language_code(code))
    .collect()
});

/// ベース言語
pub const BASELINE_LANGUAGE: &str = "en";

/// Normalize language code (lowercase and replace - with _)
fn normalize_language_code(code: &str) -> String {
    code.to_lowercase().replace('-', "_")
}

/// 言語コードの検証エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LanguageCodeError {
    /// 空文字列
    #[error("Language code cannot be empty")]
    Empty,

    /// URL パスに使えない文字を含む
    #[error("Invalid character {character:?} in language code '{code}'")]
    InvalidCharacter { code: String, character: char },
}

/// 言語コード（例: "en", "te", "pt-BR"）
///
/// 翻訳エンドポイントの URL パスに埋め込まれるため、
/// ASCII 英数字と `-` / `_` のみを許可する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    /// 言語コードを検証して作成する
    ///
    /// # Errors
    /// - 空文字列
    /// - 許可されていない文字を含む
    pub fn new(code: impl Into<String>) -> Result<Self, LanguageCodeError> {
        let code = code.into();
        let trimmed = code.trim();

        if trimmed.is_empty() {
            return Err(LanguageCodeError::Empty);
        }

        if let Some(character) =
            trimmed.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(LanguageCodeError::InvalidCharacter { code, character });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// 何も保存されていない場合に使うベース言語（`en`）
    #[must_use]
    pub fn baseline() -> Self {
        Self(BASELINE_LANGUAGE.to_string())
    }

    /// 言語コードの文字列
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 既知のロケールタグかどうか（大文字小文字・区切り文字は区別しない）
    #[must_use]
    pub fn is_known_locale(&self) -> bool {
        LANGUAGE_CODES.contains(&normalize_language_code(&self.0))
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = LanguageCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for LanguageCode {
    type Error = LanguageCodeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl std::str::FromStr for LanguageCode {
    type Err = LanguageCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}
