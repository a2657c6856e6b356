//! PostState - 状態コンテナ
//!
//! ローカル投稿・取得済み投稿の 2 コレクションと、loading / notice の
//! 一時フラグを持ちます。状態遷移はすべて `apply` を通る純粋関数で、
//! I/O（永続化、ネットワーク）は呼び出し側（`PostContext`）が行います。
//!
//! # 学習ポイント
//! - リモート操作は Pending / Fulfilled / Rejected の 3 フェーズ
//! - 永続化が必要かどうかは戻り値の `Effect` で呼び出し側に伝える

use chrono::{DateTime, Duration, Utc};

use crate::domain::{LocalPost, Notice, Post, PostDraft, PostId, RemotePost};

pub const POST_CREATED: &str = "Post created successfully!";
pub const POST_UPDATED: &str = "Post updated successfully!";
pub const POST_DELETED: &str = "Post deleted successfully!";

/// 非同期操作のフェーズ
#[derive(Debug, Clone, PartialEq)]
pub enum Phase<T> {
    Pending,
    Fulfilled(T),
    /// ネットワーク層のメッセージをそのまま持つ
    Rejected(String),
}

/// 状態遷移のトリガー
#[derive(Debug, Clone, PartialEq)]
pub enum PostEvent {
    LocalAdded(LocalPost),
    LocalUpdated { id: PostId, draft: PostDraft },
    LocalDeleted(PostId),
    MessagesCleared,
    Fetch(Phase<Vec<RemotePost>>),
    RemoteUpdate(Phase<RemotePost>),
    RemoteDelete(Phase<PostId>),
}

/// 遷移の結果、呼び出し側がやるべきこと
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    PersistLocalPosts,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostState {
    local_posts: Vec<LocalPost>,
    fetched_posts: Vec<RemotePost>,
    loading: bool,
    notice: Option<Notice>,
}

impl PostState {
    /// 永続化済みのローカル投稿から初期状態を作る
    pub fn with_local_posts(local_posts: Vec<LocalPost>) -> Self {
        Self {
            local_posts,
            ..Self::default()
        }
    }

    pub fn local_posts(&self) -> &[LocalPost] {
        &self.local_posts
    }

    pub fn fetched_posts(&self) -> &[RemotePost] {
        &self.fetched_posts
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// ローカル投稿 → 取得済み投稿の順で並べた統合リスト
    pub fn all_posts(&self) -> Vec<Post> {
        self.local_posts
            .iter()
            .cloned()
            .map(Post::Local)
            .chain(self.fetched_posts.iter().cloned().map(Post::Remote))
            .collect()
    }

    /// ID で検索。ID はコレクション間で重複しうるのでローカルを優先する
    pub fn find(&self, id: PostId) -> Option<Post> {
        self.find_local(id)
            .cloned()
            .map(Post::Local)
            .or_else(|| self.find_fetched(id).cloned().map(Post::Remote))
    }

    pub fn find_local(&self, id: PostId) -> Option<&LocalPost> {
        self.local_posts.iter().find(|p| p.id == id)
    }

    pub fn find_fetched(&self, id: PostId) -> Option<&RemotePost> {
        self.fetched_posts.iter().find(|p| p.id == id)
    }

    pub fn apply(&mut self, event: PostEvent, now: DateTime<Utc>) -> Effect {
        match event {
            PostEvent::LocalAdded(post) => {
                self.local_posts.push(post);
                self.notice = Some(Notice::success(POST_CREATED, now));
                Effect::PersistLocalPosts
            }
            PostEvent::LocalUpdated { id, draft } => {
                let Some(post) = self.local_posts.iter_mut().find(|p| p.id == id) else {
                    return Effect::None;
                };
                post.revise(draft, now);
                self.notice = Some(Notice::success(POST_UPDATED, now));
                Effect::PersistLocalPosts
            }
            PostEvent::LocalDeleted(id) => {
                self.local_posts.retain(|p| p.id != id);
                self.notice = Some(Notice::success(POST_DELETED, now));
                Effect::PersistLocalPosts
            }
            PostEvent::MessagesCleared => {
                self.notice = None;
                Effect::None
            }
            PostEvent::Fetch(phase) => {
                if let Some(posts) = self.settle(phase, now) {
                    self.fetched_posts = posts;
                }
                Effect::None
            }
            PostEvent::RemoteUpdate(phase) => {
                if let Some(updated) = self.settle(phase, now) {
                    if let Some(slot) = self.fetched_posts.iter_mut().find(|p| p.id == updated.id) {
                        *slot = updated;
                    }
                    self.notice = Some(Notice::success(POST_UPDATED, now));
                }
                Effect::None
            }
            PostEvent::RemoteDelete(phase) => {
                if let Some(deleted) = self.settle(phase, now) {
                    self.fetched_posts.retain(|p| p.id != deleted);
                    self.notice = Some(Notice::success(POST_DELETED, now));
                }
                Effect::None
            }
        }
    }

    /// `ttl` を過ぎた notice を消す。消した場合は true
    pub fn expire_notice(&mut self, now: DateTime<Utc>, ttl: Duration) -> bool {
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now, ttl)) {
            self.notice = None;
            return true;
        }
        false
    }

    /// 3 フェーズ共通の loading / error の扱い。Fulfilled の値だけを返す
    fn settle<T>(&mut self, phase: Phase<T>, now: DateTime<Utc>) -> Option<T> {
        match phase {
            Phase::Pending => {
                self.loading = true;
                // success は残す
                if self.notice.as_ref().is_some_and(Notice::is_error) {
                    self.notice = None;
                }
                None
            }
            Phase::Fulfilled(value) => {
                self.loading = false;
                Some(value)
            }
            Phase::Rejected(message) => {
                self.loading = false;
                self.notice = Some(Notice::error(message, now));
                None
            }
        }
    }
}
