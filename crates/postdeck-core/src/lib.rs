//! postdeck-core
//!
//! ローカルで作成した投稿とリモート REST サービスの投稿を一つのコレクションとして
//! 扱うためのコアライブラリ。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, post, comment, user, notice, errors）
//! - **ports**: 抽象化レイヤー（Clock, IdGenerator, KeyValueStore, PostsApi）
//! - **impls**: ports の実装（InMemory / File ストア、HTTP クライアント）
//! - **storage**: 永続化アダプタ（ローカル投稿・ユーザーコメント）
//! - **app**: 状態コンテナとコンテキスト（PostState, PostContext）
//! - **config**: クライアント設定

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;
pub mod storage;

pub use app::{PostContext, PostState};
pub use config::ClientConfig;
