use std::collections::BTreeMap;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::{
    Mutex,
    PoisonError,
};

use super::{
    KeyValueStore,
    StorageError,
};

/// JSON ファイルに永続化されるストア
///
/// ファイルは `{ "key": "value" }` 形式の単一オブジェクト。
/// アクセスのたびにファイルを読み直すため、同じパスで開き直したストアからも値が見える。
#[derive(Debug)]
pub struct FileStore {
    /// 保存先のファイルパス
    path: PathBuf,
    /// 読み込み→書き込みの間の競合を防ぐロック
    write_lock: Mutex<()>,
}

impl FileStore {
    /// `path` を保存先にする（ファイルは最初の書き込みで作成）
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    /// 保存先のファイルパス
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// ファイル全体を読み込む（ファイルがなければ空）
    fn read_entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    /// ファイル全体を書き込む
    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)?;

        tracing::debug!("Stored '{key}' in {:?}", self.path);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut entries = self.read_entries()?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use tempfile::TempDir;

    use super::*;

    #[googletest::test]
    fn test_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("storage.json"));

        expect_that!(store.get_item("preferred-language").unwrap(), none());
    }

    #[googletest::test]
    fn test_value_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("storage.json");

        FileStore::new(&path).set_item("preferred-language", "kn").unwrap();
        let reopened = FileStore::new(&path);

        expect_that!(reopened.get_item("preferred-language").unwrap(), some(eq("kn")));
    }

    #[googletest::test]
    fn test_set_keeps_other_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("storage.json"));

        store.set_item("a", "1").unwrap();
        store.set_item("b", "2").unwrap();
        store.set_item("a", "3").unwrap();

        expect_that!(store.get_item("a").unwrap(), some(eq("3")));
        expect_that!(store.get_item("b").unwrap(), some(eq("2")));
    }

    #[googletest::test]
    fn test_remove_item() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("storage.json"));
        store.set_item("a", "1").unwrap();

        store.remove_item("a").unwrap();

        expect_that!(store.get_item("a").unwrap(), none());
    }

    #[googletest::test]
    fn test_corrupted_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        fs::write(&path, "[1, 2").unwrap();
        let store = FileStore::new(&path);

        expect_that!(store.get_item("a"), err(anything()));
        expect_that!(store.set_item("a", "1"), err(anything()));
    }
}
