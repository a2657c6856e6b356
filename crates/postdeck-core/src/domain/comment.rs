use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::PostError;
use super::ids::{CommentId, PostId};

/// A comment, either fetched from the remote service or added on this client.
///
/// Fetched comments come without `isUserComment`/`timestamp`; both default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub name: String,
    pub email: String,
    pub body: String,
    #[serde(default)]
    pub is_user_comment: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Comment {
    /// Build a user comment from a validated draft.
    pub fn authored(
        id: CommentId,
        post_id: PostId,
        draft: CommentDraft,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            post_id,
            name: draft.name,
            email: draft.email,
            body: draft.body,
            is_user_comment: true,
            timestamp: Some(timestamp),
        }
    }
}

/// Validated input for a new comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDraft {
    name: String,
    email: String,
    body: String,
}

impl CommentDraft {
    pub fn new(
        name: impl AsRef<str>,
        email: impl AsRef<str>,
        body: impl AsRef<str>,
    ) -> Result<Self, PostError> {
        let fields = [
            ("name", name.as_ref().trim()),
            ("email", email.as_ref().trim()),
            ("body", body.as_ref().trim()),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, value)| value.is_empty()) {
            return Err(PostError::EmptyField(*field));
        }
        let [(_, name), (_, email), (_, body)] = fields;
        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
            body: body.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}
