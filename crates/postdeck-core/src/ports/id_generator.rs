//! IdGenerator port - ID 生成の抽象化
//!
//! ローカル投稿・ユーザーコメントの ID は作成時刻のミリ秒値です。
//! 同じミリ秒に 2 つ作ると衝突するので、直前の値以下になった場合は +1 します。
//!
//! # 実装
//! - **MillisIdGenerator**: Clock ベース（本番・テスト共通）

use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::{CommentId, PostId};
use crate::ports::Clock;

/// IdGenerator はローカルで作るエンティティの ID を生成
///
/// # Thread Safety
/// - `Send + Sync` を要求（Arc で共有できる）
pub trait IdGenerator: Send + Sync {
    fn next_post_id(&self) -> PostId;

    fn next_comment_id(&self) -> CommentId;
}

/// Clock のミリ秒を ID にする生成器
///
/// 一つの生成器から出る ID は狭義単調増加です。
pub struct MillisIdGenerator<C> {
    clock: C,
    last: AtomicU64,
}

impl<C: Clock> MillisIdGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            last: AtomicU64::new(0),
        }
    }

    fn next_raw(&self) -> u64 {
        let now = self.clock.now().timestamp_millis().max(0) as u64;
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(prev + 1);
            match self.last.compare_exchange_weak(
                prev,
                candidate,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(actual) => prev = actual,
            }
        }
    }
}

impl<C: Clock> IdGenerator for MillisIdGenerator<C> {
    fn next_post_id(&self) -> PostId {
        PostId::new(self.next_raw())
    }

    fn next_comment_id(&self) -> CommentId {
        CommentId::new(self.next_raw())
    }
}
