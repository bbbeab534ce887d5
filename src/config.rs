//! 設定ファイル（`.edureach-i18n.json`）の読み込みと検証

mod types;
mod workspace;

pub use types::{
    ConfigError,
    I18nSettings,
    LANGUAGE_PLACEHOLDER,
    StaleResponsePolicy,
    ValidationError,
};
pub use workspace::{
    CONFIG_FILE_NAME,
    WorkspaceConfig,
};
