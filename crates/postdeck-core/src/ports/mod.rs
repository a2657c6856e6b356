//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! 各 trait は外部（時計、永続ストレージ、リモート API）への
//! インターフェースを提供し、実装の詳細を隠蔽します。

pub mod clock;
pub mod id_generator;
pub mod kv_store;
pub mod posts_api;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, MillisIdGenerator};
pub use self::kv_store::{KeyValueStore, StoreError};
pub use self::posts_api::PostsApi;
