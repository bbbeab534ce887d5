//! 永続キーバリューストア
//!
//! ブラウザの `localStorage` に相当する、オリジン単位の文字列ストアを抽象化する。

mod file;
mod memory;
mod preference;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use preference::LanguagePreference;

/// ストレージ操作のエラー
#[derive(Error, Debug)]
pub enum StorageError {
    /// ファイル入出力の失敗
    #[error("Failed to access storage file: {0}")]
    Io(#[from] std::io::Error),

    /// 保存内容が JSON として不正
    #[error("Failed to parse storage contents: {0}")]
    Parse(#[from] serde_json::Error),
}

/// 文字列キー → 文字列値の永続ストア
///
/// `set_item` の結果は同一セッション内の `get_item` に即座に反映されなければならない。
///
/// 実装はブロッキング I/O を行ってよい。非同期コンテキストからは
/// `tokio::task::spawn_blocking` 経由で呼び出す（`TranslationPipeline` はそうしている）。
pub trait KeyValueStore: Send + Sync {
    /// # Errors
    /// バックエンドの読み込みに失敗した場合
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    /// バックエンドへの書き込みに失敗した場合
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// # Errors
    /// バックエンドへの書き込みに失敗した場合
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// 値を JSON にシリアライズして保存する
///
/// 失敗はログに出力して無視する。
pub fn save_json<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) {
    let result = serde_json::to_string(value)
        .map_err(StorageError::from)
        .and_then(|json| store.set_item(key, &json));

    if let Err(error) = result {
        tracing::error!("Error saving to storage (key: {key}): {error}");
    }
}

/// JSON として保存された値を読み込む
///
/// 値が存在しない場合、または読み込み・パースに失敗した場合は `default` を返す。
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str, default: T) -> T {
    match store.get_item(key) {
        Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|error| {
            tracing::error!("Error loading from storage (key: {key}): {error}");
            default
        }),
        Ok(None) => default,
        Err(error) => {
            tracing::error!("Error loading from storage (key: {key}): {error}");
            default
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use googletest::prelude::*;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct CourseProgress {
        course_id: u32,
        completed: Vec<u32>,
    }

    #[googletest::test]
    fn test_save_and_load_json() {
        let store = MemoryStore::new();
        let progress = CourseProgress { course_id: 7, completed: vec![1, 2, 3] };

        save_json(&store, "progress", &progress);
        let loaded = load_json(&store, "progress", CourseProgress { course_id: 0, completed: vec![] });

        assert_eq!(loaded, progress);
    }

    #[googletest::test]
    fn test_load_json_missing_key_returns_default() {
        let store = MemoryStore::new();

        let loaded: HashMap<String, u32> = load_json(&store, "missing", HashMap::new());

        expect_that!(loaded.is_empty(), eq(true));
    }

    #[googletest::test]
    fn test_load_json_invalid_json_returns_default() {
        let store = MemoryStore::new();
        store.set_item("broken", "{not json").unwrap();

        let loaded: Vec<u32> = load_json(&store, "broken", vec![42]);

        assert_eq!(loaded, vec![42]);
    }
}
