//! Post model: local posts, fetched posts and the tagged union over both.
//!
//! ローカル投稿とリモート投稿は別々のコレクションで管理されますが、
//! 画面側には `Post` という一つの型で渡します。
//! `isLocal` フラグの代わりに enum の variant で出自を表現します。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::PostError;
use super::ids::{PostId, UserId};

/// 投稿の出自
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostOrigin {
    /// ユーザーが作成し、永続化される投稿
    Local,
    /// リモート API から取得した投稿（永続化しない）
    Remote,
}

impl PostOrigin {
    /// コメント保存キーで使う名前（"local" / "api"）
    pub fn storage_label(&self) -> &'static str {
        match self {
            PostOrigin::Local => "local",
            PostOrigin::Remote => "api",
        }
    }
}

impl fmt::Display for PostOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostOrigin::Local => f.write_str("local"),
            PostOrigin::Remote => f.write_str("remote"),
        }
    }
}

/// 出自 + ID で投稿を一意に指す
///
/// ID はコレクションをまたいで重複しうるので、コメントの保存先などは
/// このキーで区別します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostKey {
    pub origin: PostOrigin,
    pub id: PostId,
}

impl PostKey {
    pub fn local(id: PostId) -> Self {
        Self {
            origin: PostOrigin::Local,
            id,
        }
    }

    pub fn remote(id: PostId) -> Self {
        Self {
            origin: PostOrigin::Remote,
            id,
        }
    }
}

impl fmt::Display for PostKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.origin, self.id)
    }
}

/// A post authored on this client.
///
/// Stored under the `localPosts` key as a JSON array with camelCase fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalPost {
    pub id: PostId,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl LocalPost {
    pub fn new(id: PostId, draft: PostDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            body: draft.body,
            created_at,
            updated_at: None,
        }
    }

    /// Replace title/body and stamp `updated_at`.
    pub fn revise(&mut self, draft: PostDraft, at: DateTime<Utc>) {
        self.title = draft.title;
        self.body = draft.body;
        self.updated_at = Some(at);
    }
}

/// A post mirrored from the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemotePost {
    pub id: PostId,
    pub user_id: UserId,
    pub title: String,
    pub body: String,
}

impl RemotePost {
    /// PUT に載せる置き換え後の投稿（`userId` は元の投稿から引き継ぐ）
    pub fn revised(&self, draft: PostDraft) -> RemotePost {
        RemotePost {
            id: self.id,
            user_id: self.user_id,
            title: draft.title,
            body: draft.body,
        }
    }
}

/// Merged view over both collections.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum Post {
    Local(LocalPost),
    Remote(RemotePost),
}

impl Post {
    pub fn id(&self) -> PostId {
        match self {
            Post::Local(p) => p.id,
            Post::Remote(p) => p.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Post::Local(p) => &p.title,
            Post::Remote(p) => &p.title,
        }
    }

    pub fn body(&self) -> &str {
        match self {
            Post::Local(p) => &p.body,
            Post::Remote(p) => &p.body,
        }
    }

    pub fn origin(&self) -> PostOrigin {
        match self {
            Post::Local(_) => PostOrigin::Local,
            Post::Remote(_) => PostOrigin::Remote,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Post::Local(_))
    }

    pub fn key(&self) -> PostKey {
        PostKey {
            origin: self.origin(),
            id: self.id(),
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Post::Local(_) => None,
            Post::Remote(p) => Some(p.user_id),
        }
    }
}

/// Validated title/body pair used for create and edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    title: String,
    body: String,
}

impl PostDraft {
    /// Trim both fields; either being empty afterwards is rejected.
    pub fn new(title: impl AsRef<str>, body: impl AsRef<str>) -> Result<Self, PostError> {
        let title = title.as_ref().trim();
        let body = body.as_ref().trim();
        if title.is_empty() {
            return Err(PostError::EmptyField("title"));
        }
        if body.is_empty() {
            return Err(PostError::EmptyField("body"));
        }
        Ok(Self {
            title: title.to_string(),
            body: body.to_string(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, h, 0, 0).unwrap()
    }

    #[test]
    fn draft_trims_fields() {
        let draft = PostDraft::new("  Hello ", "\nworld\t").unwrap();
        assert_eq!(draft.title(), "Hello");
        assert_eq!(draft.body(), "world");
    }

    #[rstest]
    #[case::empty_title("", "body", "title")]
    #[case::blank_title("   ", "body", "title")]
    #[case::empty_body("title", "", "body")]
    #[case::blank_body("title", " \n ", "body")]
    fn draft_rejects_blank_fields(#[case] title: &str, #[case] body: &str, #[case] field: &str) {
        let err = PostDraft::new(title, body).unwrap_err();
        assert!(matches!(err, PostError::EmptyField(f) if f == field));
    }

    #[test]
    fn local_post_uses_camel_case_on_disk() {
        let draft = PostDraft::new("t", "b").unwrap();
        let post = LocalPost::new(PostId::new(1700000000000), draft, at(12));

        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["id"], 1700000000000u64);
        assert_eq!(json["createdAt"], "2024-01-01T12:00:00Z");
        assert!(json["updatedAt"].is_null());
    }

    #[test]
    fn local_post_accepts_legacy_is_local_flag() {
        let raw = r#"{"id":5,"title":"t","body":"b","createdAt":"2024-01-01T12:00:00.000Z","updatedAt":null,"isLocal":true}"#;
        let post: LocalPost = serde_json::from_str(raw).unwrap();
        assert_eq!(post.id, PostId::new(5));
        assert_eq!(post.updated_at, None);
    }

    #[test]
    fn revise_stamps_updated_at() {
        let mut post = LocalPost::new(PostId::new(1), PostDraft::new("a", "b").unwrap(), at(1));
        post.revise(PostDraft::new("c", "d").unwrap(), at(2));

        assert_eq!(post.title, "c");
        assert_eq!(post.body, "d");
        assert_eq!(post.created_at, at(1));
        assert_eq!(post.updated_at, Some(at(2)));
    }

    #[test]
    fn remote_post_decodes_api_shape() {
        let raw = r#"{"userId":1,"id":3,"title":"ea molestias","body":"et iusto"}"#;
        let post: RemotePost = serde_json::from_str(raw).unwrap();
        assert_eq!(post.user_id, UserId::new(1));

        let merged = Post::Remote(post);
        assert!(!merged.is_local());
        assert_eq!(merged.key(), PostKey::remote(PostId::new(3)));
        assert_eq!(merged.user_id(), Some(UserId::new(1)));
    }

    #[test]
    fn remote_revision_keeps_author() {
        let post = RemotePost {
            id: PostId::new(3),
            user_id: UserId::new(9),
            title: "old".into(),
            body: "old".into(),
        };
        let revised = post.revised(PostDraft::new("new", "text").unwrap());
        assert_eq!(revised.user_id, UserId::new(9));
        assert_eq!(revised.title, "new");

        let json = serde_json::to_value(&revised).unwrap();
        assert_eq!(json["userId"], 9);
    }
}
