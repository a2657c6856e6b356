//! Comments - 投稿ごとのコメント
//!
//! - ローカル投稿: 保存済みのユーザーコメントだけ
//! - リモート投稿: 取得したコメント + 保存済みのユーザーコメント
//!
//! 取得したコメントは保存しません。コメントの取得に失敗した場合は
//! ログを出して保存済みのコメントだけを返します（notice は立てない）。

use tracing::{info, warn};

use crate::app::context::PostContext;
use crate::domain::{Comment, CommentDraft, CommentId, PostError, PostKey, PostOrigin};
use crate::ports::{KeyValueStore, PostsApi};

impl<A: PostsApi, S: KeyValueStore> PostContext<A, S> {
    pub async fn load_comments(&self, post: PostKey) -> Vec<Comment> {
        let saved = self.store.load_comments(post);
        if post.origin == PostOrigin::Local {
            return saved;
        }
        match self.api.list_comments(post.id).await {
            Ok(mut fetched) => {
                fetched.extend(saved);
                fetched
            }
            Err(e) => {
                warn!(post = %post, error = %e, "Failed to fetch comments; showing saved comments only");
                saved
            }
        }
    }

    pub fn add_comment(&mut self, post: PostKey, draft: CommentDraft) -> Result<Comment, PostError> {
        if self.find_by_key(post).is_none() {
            return Err(PostError::PostNotFound(post.id));
        }
        let comment = Comment::authored(
            self.ids.next_comment_id(),
            post.id,
            draft,
            self.clock.now(),
        );
        let mut saved = self.store.load_comments(post);
        saved.push(comment.clone());
        self.store.save_comments(post, &saved);
        info!(post = %post, comment_id = %comment.id, "comment added");
        Ok(comment)
    }

    /// ユーザーコメントだけ削除できる
    ///
    /// リモート投稿で保存済みに見つからない場合は、取得したコメントかどうかを
    /// 確認してエラーを出し分ける。
    pub async fn delete_comment(&mut self, post: PostKey, comment_id: CommentId) -> Result<(), PostError> {
        let mut saved = self.store.load_comments(post);
        let before = saved.len();
        saved.retain(|c| c.id != comment_id);
        if saved.len() != before {
            self.store.save_comments(post, &saved);
            info!(post = %post, comment_id = %comment_id, "comment deleted");
            return Ok(());
        }

        if post.origin == PostOrigin::Remote
            && let Ok(fetched) = self.api.list_comments(post.id).await
            && fetched.iter().any(|c| c.id == comment_id)
        {
            return Err(PostError::NotUserComment(comment_id));
        }
        Err(PostError::CommentNotFound(comment_id))
    }
}
