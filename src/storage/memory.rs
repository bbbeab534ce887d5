use std::collections::HashMap;
use std::sync::{
    PoisonError,
    RwLock,
};

use super::{
    KeyValueStore,
    StorageError,
};

/// プロセス内だけで保持されるストア（テスト・一時セッション用）
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// キー → 値
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// 空のストアを作成する
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}
