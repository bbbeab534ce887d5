//! フォーム入力の検証

use std::sync::LazyLock;

use regex::Regex;

/// パスワードの最小文字数
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// `local@domain.tld` 形式（空白と `@` を含まない）
static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// `local@domain.tld` 形式かどうか
#[must_use]
pub fn validate_email(email: &str) -> bool {
    EMAIL_PATTERN.as_ref().is_some_and(|pattern| pattern.is_match(email))
}

/// `MIN_PASSWORD_LENGTH` 文字以上かどうか
#[must_use]
pub fn validate_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
}
