//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **InMemoryKeyValueStore**: テスト用の key/value ストア
//! - **FileKeyValueStore**: CLI 用の永続ストア
//! - **HttpPostsApi**: reqwest によるリモート API クライアント

pub mod file_store;
pub mod http_api;
pub mod memory_store;

pub use self::file_store::FileKeyValueStore;
pub use self::http_api::HttpPostsApi;
pub use self::memory_store::InMemoryKeyValueStore;
