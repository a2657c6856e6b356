//! PostContext - 画面ハンドラに渡す明示的なコンテキスト
//!
//! グローバルな store の代わりに、状態（PostState）と ports をまとめて
//! 保持するオブジェクトを各ハンドラに `&mut` で渡します。
//!
//! # 操作の種類
//! - ローカル投稿: 同期。状態を更新したらすぐ永続化する
//! - リモート投稿: 非同期。Pending → Fulfilled / Rejected の 3 フェーズ
//!
//! リモートの失敗は ApiError のメッセージをそのまま notice に入れ、
//! さらに `Err` として呼び出し元にも返します。リトライはしません。

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info};

use crate::app::builder::ContextBuilder;
use crate::app::state::{Effect, Phase, PostEvent, PostState};
use crate::domain::{
    LocalPost, Post, PostDraft, PostError, PostId, PostKey, PostOrigin, User, UserId,
};
use crate::ports::{Clock, IdGenerator, KeyValueStore, PostsApi};
use crate::storage::PostStore;

pub struct PostContext<A, S> {
    pub(crate) api: A,
    pub(crate) store: PostStore<S>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) ids: Box<dyn IdGenerator>,
    state: PostState,
    notice_ttl: Duration,
}

impl<A: PostsApi, S: KeyValueStore> PostContext<A, S> {
    pub fn builder() -> ContextBuilder<A, S> {
        ContextBuilder::new()
    }

    pub(crate) fn from_parts(
        api: A,
        store: PostStore<S>,
        clock: Arc<dyn Clock>,
        ids: Box<dyn IdGenerator>,
        state: PostState,
        notice_ttl: Duration,
    ) -> Self {
        Self {
            api,
            store,
            clock,
            ids,
            state,
            notice_ttl,
        }
    }

    pub fn state(&self) -> &PostState {
        &self.state
    }

    pub fn all_posts(&self) -> Vec<Post> {
        self.state.all_posts()
    }

    pub fn find_post(&self, id: PostId) -> Option<Post> {
        self.state.find(id)
    }

    /// 出自まで指定して検索（ID 衝突時にリモート側を指したい場合）
    pub fn find_by_key(&self, key: PostKey) -> Option<Post> {
        match key.origin {
            PostOrigin::Local => self.state.find_local(key.id).cloned().map(Post::Local),
            PostOrigin::Remote => self.state.find_fetched(key.id).cloned().map(Post::Remote),
        }
    }

    fn dispatch(&mut self, event: PostEvent) {
        let now = self.clock.now();
        if self.state.apply(event, now) == Effect::PersistLocalPosts {
            self.store.save_local_posts(self.state.local_posts());
        }
    }

    // ========================================
    // ローカル投稿（同期）
    // ========================================

    pub fn create_post(&mut self, draft: PostDraft) -> PostId {
        let id = self.ids.next_post_id();
        let post = LocalPost::new(id, draft, self.clock.now());
        self.dispatch(PostEvent::LocalAdded(post));
        info!(post_id = %id, "local post created");
        id
    }

    pub fn update_local_post(&mut self, id: PostId, draft: PostDraft) -> Result<(), PostError> {
        if self.state.find_local(id).is_none() {
            return Err(PostError::PostNotFound(id));
        }
        self.dispatch(PostEvent::LocalUpdated { id, draft });
        info!(post_id = %id, "local post updated");
        Ok(())
    }

    pub fn delete_local_post(&mut self, id: PostId) {
        self.dispatch(PostEvent::LocalDeleted(id));
        info!(post_id = %id, "local post deleted");
    }

    // ========================================
    // リモート投稿（非同期）
    // ========================================

    pub async fn fetch_posts(&mut self) -> Result<(), PostError> {
        self.dispatch(PostEvent::Fetch(Phase::Pending));
        match self.api.list_posts().await {
            Ok(posts) => {
                debug!(count = posts.len(), "fetched remote posts");
                self.dispatch(PostEvent::Fetch(Phase::Fulfilled(posts)));
                Ok(())
            }
            Err(e) => {
                self.dispatch(PostEvent::Fetch(Phase::Rejected(e.to_string())));
                Err(e.into())
            }
        }
    }

    /// 取得済み投稿が空のときだけ取得する（一覧画面の初回表示と同じ）
    pub async fn ensure_fetched(&mut self) -> Result<(), PostError> {
        if self.state.fetched_posts().is_empty() {
            self.fetch_posts().await?;
        }
        Ok(())
    }

    pub async fn update_remote_post(&mut self, id: PostId, draft: PostDraft) -> Result<(), PostError> {
        let revised = self
            .state
            .find_fetched(id)
            .map(|p| p.revised(draft))
            .ok_or(PostError::PostNotFound(id))?;

        self.dispatch(PostEvent::RemoteUpdate(Phase::Pending));
        match self.api.update_post(&revised).await {
            Ok(updated) => {
                self.dispatch(PostEvent::RemoteUpdate(Phase::Fulfilled(updated)));
                info!(post_id = %id, "remote post updated");
                Ok(())
            }
            Err(e) => {
                self.dispatch(PostEvent::RemoteUpdate(Phase::Rejected(e.to_string())));
                Err(e.into())
            }
        }
    }

    pub async fn delete_remote_post(&mut self, id: PostId) -> Result<(), PostError> {
        self.dispatch(PostEvent::RemoteDelete(Phase::Pending));
        match self.api.delete_post(id).await {
            Ok(deleted) => {
                self.dispatch(PostEvent::RemoteDelete(Phase::Fulfilled(deleted)));
                info!(post_id = %id, "remote post deleted");
                Ok(())
            }
            Err(e) => {
                self.dispatch(PostEvent::RemoteDelete(Phase::Rejected(e.to_string())));
                Err(e.into())
            }
        }
    }

    // ========================================
    // 出自による振り分け
    // ========================================

    /// 同じ ID のローカル投稿があればローカル、なければリモートを更新
    pub async fn update_post(&mut self, id: PostId, draft: PostDraft) -> Result<PostOrigin, PostError> {
        if self.state.find_local(id).is_some() {
            self.update_local_post(id, draft)?;
            return Ok(PostOrigin::Local);
        }
        self.update_remote_post(id, draft).await?;
        Ok(PostOrigin::Remote)
    }

    /// 同じ ID のローカル投稿があればローカル、なければリモートを削除
    pub async fn delete_post(&mut self, id: PostId) -> Result<PostOrigin, PostError> {
        if self.state.find_local(id).is_some() {
            self.delete_local_post(id);
            return Ok(PostOrigin::Local);
        }
        self.delete_remote_post(id).await?;
        Ok(PostOrigin::Remote)
    }

    // ========================================
    // その他
    // ========================================

    pub async fn fetch_author(&self, user_id: UserId) -> Result<User, PostError> {
        Ok(self.api.get_user(user_id).await?)
    }

    pub fn clear_messages(&mut self) {
        self.dispatch(PostEvent::MessagesCleared);
    }

    /// 表示期限を過ぎた notice を消す（画面側が描画前に呼ぶ）
    pub fn expire_notice(&mut self) -> bool {
        let now = self.clock.now();
        self.state.expire_notice(now, self.notice_ttl)
    }
}
