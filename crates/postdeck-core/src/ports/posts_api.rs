//! PostsApi port - リモート REST サービス
//!
//! | 操作             | HTTP                       |
//! |------------------|----------------------------|
//! | `list_posts`     | `GET /posts`               |
//! | `update_post`    | `PUT /posts/:id`           |
//! | `delete_post`    | `DELETE /posts/:id`        |
//! | `list_comments`  | `GET /posts/:id/comments`  |
//! | `get_user`       | `GET /users/:id`           |
//!
//! リトライ・バックオフは行いません。失敗はすべて `ApiError` に畳み込みます。

use async_trait::async_trait;

use crate::domain::{ApiError, Comment, PostId, RemotePost, User, UserId};

/// PostsApi はステートレスな request/response ラッパー
#[async_trait]
pub trait PostsApi: Send + Sync {
    async fn list_posts(&self) -> Result<Vec<RemotePost>, ApiError>;

    /// サーバーが返した投稿（置き換え後）を返す
    async fn update_post(&self, post: &RemotePost) -> Result<RemotePost, ApiError>;

    /// 成功時は削除した ID を返す
    async fn delete_post(&self, id: PostId) -> Result<PostId, ApiError>;

    async fn list_comments(&self, post_id: PostId) -> Result<Vec<Comment>, ApiError>;

    async fn get_user(&self, id: UserId) -> Result<User, ApiError>;
}

#[async_trait]
impl<A: PostsApi + ?Sized> PostsApi for std::sync::Arc<A> {
    async fn list_posts(&self) -> Result<Vec<RemotePost>, ApiError> {
        (**self).list_posts().await
    }

    async fn update_post(&self, post: &RemotePost) -> Result<RemotePost, ApiError> {
        (**self).update_post(post).await
    }

    async fn delete_post(&self, id: PostId) -> Result<PostId, ApiError> {
        (**self).delete_post(id).await
    }

    async fn list_comments(&self, post_id: PostId) -> Result<Vec<Comment>, ApiError> {
        (**self).list_comments(post_id).await
    }

    async fn get_user(&self, id: UserId) -> Result<User, ApiError> {
        (**self).get_user(id).await
    }
}
