//! KeyValueStore port - 永続ストレージ（ブラウザの localStorage 相当）
//!
//! 文字列キーに文字列値を保存するだけの最小インターフェースです。
//! シリアライズや失敗時の扱いは `storage::PostStore` 側の責務です。
//!
//! # 実装
//! - `impls::InMemoryKeyValueStore`: テスト用
//! - `impls::FileKeyValueStore`: ディレクトリにキーごとのファイルを置く

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),

    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// KeyValueStore は同期的な key/value ストレージ
///
/// # 設計原則
/// - 値は不透明な文字列（JSON かどうかは関知しない）
/// - 存在しないキーの `get` は `Ok(None)`
/// - 存在しないキーの `remove` はエラーにしない
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}
