//! 言語設定の永続化

use std::sync::Arc;

use super::{
    KeyValueStore,
    StorageError,
};
use crate::input::LanguageCode;

/// 選択された言語コードを 1 つのキーで保存する
#[derive(Clone)]
pub struct LanguagePreference {
    /// バックエンドストア
    store: Arc<dyn KeyValueStore>,
    /// 保存に使うキー（例: "preferred-language"）
    key: String,
}

impl LanguagePreference {
    /// `store` の `key` に保存する
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self { store, key: key.into() }
    }

    /// 保存されている言語コードを取得
    ///
    /// 未保存、読み込み失敗、不正な値はいずれも `None`。
    #[must_use]
    pub fn get(&self) -> Option<LanguageCode> {
        let value = match self.store.get_item(&self.key) {
            Ok(value) => value?,
            Err(error) => {
                tracing::warn!("Failed to read language preference: {error}");
                return None;
            }
        };

        match LanguageCode::new(value.as_str()) {
            Ok(code) => Some(code),
            Err(error) => {
                tracing::warn!("Ignoring stored language preference '{value}': {error}");
                None
            }
        }
    }

    /// 言語コードを保存
    pub fn set(&self, code: &LanguageCode) -> Result<(), StorageError> {
        self.store.set_item(&self.key, code.as_str())
    }
}

impl std::fmt::Debug for LanguagePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguagePreference")
            .field("store", &"<dyn KeyValueStore>")
            .field("key", &self.key)
            .finish()
    }
}
