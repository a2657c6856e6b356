//! App - アプリケーション層
//!
//! ports を組み合わせて投稿管理のロジックを実装します。
//!
//! # 主要コンポーネント
//! - **PostState**: 状態コンテナ（純粋な状態遷移）
//! - **PostContext**: 画面ハンドラに渡すコンテキスト（状態 + ports）
//! - **ContextBuilder**: PostContext の構築とワイヤリング

pub mod builder;
pub mod comments;
pub mod context;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use self::builder::{BuildError, ContextBuilder};
pub use self::context::PostContext;
pub use self::state::{Effect, Phase, PostEvent, PostState};
