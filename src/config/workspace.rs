//! ワークスペース単位の設定
//!
//! 設定ファイルを読み、検証し、保存先のパスをワークスペース基準で解決する。

use std::io::ErrorKind;
use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    I18nSettings,
};

/// 設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".edureach-i18n.json";

/// 検証済みの設定と、解決済みの保存先
#[derive(Debug, Clone)]
pub struct WorkspaceConfig {
    /// ワークスペースのルート
    root: PathBuf,
    /// 検証済みの設定
    settings: I18nSettings,
    /// `storageFile` を `root` 基準で解決したパス
    storage_path: PathBuf,
}

impl WorkspaceConfig {
    /// `root` の `.edureach-i18n.json` を読み込む
    ///
    /// ファイルがなければすべてデフォルト値になる。
    pub fn load(root: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let root = root.into();
        let config_path = root.join(CONFIG_FILE_NAME);

        let settings = match std::fs::read_to_string(&config_path) {
            Ok(content) => {
                tracing::debug!("Read settings from {}", config_path.display());
                serde_json::from_str(&content)?
            }
            Err(error) if error.kind() == ErrorKind::NotFound => {
                tracing::debug!("No {CONFIG_FILE_NAME} in {}, using defaults", root.display());
                I18nSettings::default()
            }
            Err(error) => return Err(error.into()),
        };

        Self::from_settings(root, settings)
    }

    /// 読み込み済みの設定から作成する
    pub fn from_settings(
        root: impl Into<PathBuf>,
        settings: I18nSettings,
    ) -> Result<Self, ConfigError> {
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        let root = root.into();
        let storage_path = root.join(&settings.storage_file);
        Ok(Self { root, settings, storage_path })
    }

    /// ワークスペースのルート
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 検証済みの設定
    #[must_use]
    pub const fn settings(&self) -> &I18nSettings {
        &self.settings
    }

    /// 言語設定などを保存するファイル
    #[must_use]
    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }
}
