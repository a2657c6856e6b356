//! Domain model (IDs, posts, comments, users, notices, errors).
//!
//! I/O を一切持たない純粋なデータ型だけを置きます。

pub mod comment;
pub mod errors;
pub mod ids;
pub mod notice;
pub mod post;
pub mod user;

pub use comment::{Comment, CommentDraft};
pub use errors::{ApiError, ApiOperation, PostError};
pub use ids::{CommentId, Id, IdMarker, ParseIdError, PostId, UserId};
pub use notice::{Notice, NoticeKind};
pub use post::{LocalPost, Post, PostDraft, PostKey, PostOrigin, RemotePost};
pub use user::User;
