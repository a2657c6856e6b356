//! Domain identifiers (strongly-typed IDs).
//!
//! # 数値 ID + Phantom Type
//! リモート API（JSONPlaceholder 互換）は数値 ID を返し、ローカル投稿は
//! ミリ秒タイムスタンプを ID に使います。どちらも `u64` で表現できるので、
//! `Id<T>` の中身は `u64` です。
//!
//! `T` は実行時には使わない（PhantomData）マーカー型で、
//! `PostId` と `CommentId` を取り違えるとコンパイルエラーになります。
//!
//! JSON 上は素の数値としてシリアライズされます（`{"id": 1}`）。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// IdMarker は各 ID 型のマーカー trait
///
/// Display で使うラベル（"post", "comment", "user"）を提供します。
pub trait IdMarker: Send + Sync + 'static {
    fn label() -> &'static str;
}

/// ジェネリック ID 型
///
/// # 例
/// ```ignore
/// let post_id = PostId::new(1);
/// let comment_id = CommentId::new(1);
/// // 同じ値でも型が異なるので比較できない
/// ```
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T: IdMarker> {
    value: u64,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub const fn new(value: u64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub fn get(&self) -> u64 {
        self.value
    }
}

impl<T: IdMarker> From<u64> for Id<T> {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

/// URL パスや CLI 引数からのパース用
impl<T: IdMarker> FromStr for Id<T> {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self::new)
            .map_err(|_| ParseIdError {
                label: T::label(),
                input: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {label} id: {input:?}")]
pub struct ParseIdError {
    label: &'static str,
    input: String,
}

// ========================================
// マーカー型の定義
// ========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Post {}

impl IdMarker for Post {
    fn label() -> &'static str {
        "post"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Comment {}

impl IdMarker for Comment {
    fn label() -> &'static str {
        "comment"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum User {}

impl IdMarker for User {
    fn label() -> &'static str {
        "user"
    }
}

/// Identifier of a post (local or fetched).
pub type PostId = Id<Post>;

/// Identifier of a comment.
pub type CommentId = Id<Comment>;

/// Identifier of a remote user (post author).
pub type UserId = Id<User>;
