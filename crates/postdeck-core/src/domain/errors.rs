//! Errors - エラー型
//!
//! - `ApiError`: リモート API 呼び出しの失敗。原因（ネットワーク / 4xx / 5xx）は区別しない
//! - `PostError`: `PostContext` の操作エラー
//!
//! ストレージの失敗はここには現れません（アダプタがログに出して握りつぶす）。

use std::fmt;

use thiserror::Error;

use super::ids::{CommentId, PostId};

/// リモート API の操作種別（エラーメッセージに使う）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiOperation {
    FetchPosts,
    UpdatePost,
    DeletePost,
    FetchComments,
    FetchUser,
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ApiOperation::FetchPosts => "fetch posts",
            ApiOperation::UpdatePost => "update post",
            ApiOperation::DeletePost => "delete post",
            ApiOperation::FetchComments => "fetch comments",
            ApiOperation::FetchUser => "fetch user",
        };
        f.write_str(s)
    }
}

/// ApiError はリモート呼び出しの失敗
///
/// 表示文字列はそのまま画面の error メッセージになります。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 非 2xx レスポンス
    #[error("Failed to {0}")]
    Status(ApiOperation),

    /// 接続できなかった、タイムアウトした、など
    #[error("{0}")]
    Transport(String),

    /// レスポンス本文を解釈できなかった
    #[error("{0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum PostError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("post {0} not found")]
    PostNotFound(PostId),

    #[error("comment {0} not found")]
    CommentNotFound(CommentId),

    #[error("comment {0} was fetched from the server and cannot be deleted")]
    NotUserComment(CommentId),

    #[error(transparent)]
    Api(#[from] ApiError),
}
