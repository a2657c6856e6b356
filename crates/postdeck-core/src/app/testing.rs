//! テスト用の PostsApi フェイク

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{ApiError, Comment, PostId, RemotePost, User, UserId};
use crate::ports::PostsApi;

/// 固定データを返す PostsApi
///
/// `fail_with` を設定している間は全呼び出しがそのエラーになる。
#[derive(Default)]
pub struct FakeApi {
    posts: Mutex<Vec<RemotePost>>,
    comments: Mutex<HashMap<PostId, Vec<Comment>>>,
    users: Mutex<Vec<User>>,
    failure: Mutex<Option<ApiError>>,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn with_posts(posts: Vec<RemotePost>) -> Self {
        let api = Self::default();
        *api.posts.lock().unwrap() = posts;
        api
    }

    pub fn add_comments(&self, post_id: PostId, comments: Vec<Comment>) {
        self.comments.lock().unwrap().insert(post_id, comments);
    }

    pub fn add_user(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }

    pub fn fail_with(&self, error: ApiError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PostsApi for FakeApi {
    async fn list_posts(&self) -> Result<Vec<RemotePost>, ApiError> {
        self.record("GET /posts".into())?;
        Ok(self.posts.lock().unwrap().clone())
    }

    async fn update_post(&self, post: &RemotePost) -> Result<RemotePost, ApiError> {
        self.record(format!("PUT /posts/{}", post.id))?;
        Ok(post.clone())
    }

    async fn delete_post(&self, id: PostId) -> Result<PostId, ApiError> {
        self.record(format!("DELETE /posts/{id}"))?;
        Ok(id)
    }

    async fn list_comments(&self, post_id: PostId) -> Result<Vec<Comment>, ApiError> {
        self.record(format!("GET /posts/{post_id}/comments"))?;
        Ok(self
            .comments
            .lock()
            .unwrap()
            .get(&post_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_user(&self, id: UserId) -> Result<User, ApiError> {
        self.record(format!("GET /users/{id}"))?;
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(ApiError::Status(crate::domain::ApiOperation::FetchUser))
    }
}
