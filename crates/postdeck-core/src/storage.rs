//! PostStore - ローカル投稿とユーザーコメントの永続化アダプタ
//!
//! # キー
//! - `localPosts`: ローカル投稿の JSON 配列
//! - `comments_{local|api}_{postId}`: 投稿ごとのユーザーコメントの JSON 配列
//!
//! # 失敗時の扱い
//! 読み込み・パース・書き込みの失敗はすべて `tracing::error!` でログに出し、
//! 呼び出し元には伝播しません。読み込み失敗は空のコレクションになります。

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::domain::{Comment, LocalPost, PostKey};
use crate::ports::KeyValueStore;

pub const LOCAL_POSTS_KEY: &str = "localPosts";

/// コメント保存キー（例: `comments_api_1`）
pub fn comments_key(post: PostKey) -> String {
    format!("comments_{}_{}", post.origin.storage_label(), post.id)
}

pub struct PostStore<S> {
    store: S,
}

impl<S: KeyValueStore> PostStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn load_local_posts(&self) -> Vec<LocalPost> {
        self.load_list(LOCAL_POSTS_KEY, "local posts")
    }

    pub fn save_local_posts(&self, posts: &[LocalPost]) {
        self.save_list(LOCAL_POSTS_KEY, posts, "local posts");
    }

    pub fn load_comments(&self, post: PostKey) -> Vec<Comment> {
        self.load_list(&comments_key(post), "comments")
    }

    /// ユーザーコメントだけを保存する（取得したコメントは捨てる）
    pub fn save_comments(&self, post: PostKey, comments: &[Comment]) {
        let user_comments: Vec<&Comment> =
            comments.iter().filter(|c| c.is_user_comment).collect();
        self.save_list(&comments_key(post), &user_comments, "comments");
    }

    fn load_list<T: DeserializeOwned>(&self, key: &str, what: &str) -> Vec<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                error!(key, error = %e, "Could not load {what}");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(items) => {
                debug!(key, count = items.len(), "loaded {what}");
                items
            }
            Err(e) => {
                error!(key, error = %e, "Could not load {what}");
                Vec::new()
            }
        }
    }

    fn save_list<T: Serialize>(&self, key: &str, items: &[T], what: &str) {
        let serialized = match serde_json::to_string(items) {
            Ok(s) => s,
            Err(e) => {
                error!(key, error = %e, "Could not save {what}");
                return;
            }
        };
        if let Err(e) = self.store.set(key, &serialized) {
            error!(key, error = %e, "Could not save {what}");
        }
    }
}
