//! HttpPostsApi - reqwest による PostsApi 実装
//!
//! 非 2xx はすべて `ApiError::Status(op)` に変換します（原因は区別しない）。

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ClientConfig;
use crate::domain::{ApiError, ApiOperation, Comment, PostId, RemotePost, User, UserId};
use crate::ports::PostsApi;

pub struct HttpPostsApi {
    client: Client,
    base_url: String,
}

impl HttpPostsApi {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base().to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(
        &self,
        op: ApiOperation,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        debug!(%op, %status, url = %response.url(), "remote call finished");
        if !status.is_success() {
            return Err(ApiError::Status(op));
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        op: ApiOperation,
        path: &str,
    ) -> Result<T, ApiError> {
        let response = self.send(op, self.client.get(self.url(path))).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl PostsApi for HttpPostsApi {
    async fn list_posts(&self) -> Result<Vec<RemotePost>, ApiError> {
        self.get_json(ApiOperation::FetchPosts, "/posts").await
    }

    async fn update_post(&self, post: &RemotePost) -> Result<RemotePost, ApiError> {
        let body = serde_json::to_string(post).map_err(|e| ApiError::Decode(e.to_string()))?;
        let request = self
            .client
            .put(self.url(&format!("/posts/{}", post.id)))
            .header("Content-type", "application/json; charset=UTF-8")
            .body(body);
        let response = self.send(ApiOperation::UpdatePost, request).await?;
        response
            .json::<RemotePost>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn delete_post(&self, id: PostId) -> Result<PostId, ApiError> {
        let request = self.client.delete(self.url(&format!("/posts/{id}")));
        self.send(ApiOperation::DeletePost, request).await?;
        Ok(id)
    }

    async fn list_comments(&self, post_id: PostId) -> Result<Vec<Comment>, ApiError> {
        self.get_json(
            ApiOperation::FetchComments,
            &format!("/posts/{post_id}/comments"),
        )
        .await
    }

    async fn get_user(&self, id: UserId) -> Result<User, ApiError> {
        self.get_json(ApiOperation::FetchUser, &format!("/users/{id}"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// 1 リクエストだけ受けて固定レスポンスを返すサーバー
    ///
    /// 受け取ったリクエスト（ヘッダー部分）を返す
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });
        (format!("http://{addr}"), handle)
    }

    /// ヘッダーと Content-Length 分の本文を読み切る
    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut raw = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&raw);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if raw.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&raw).to_string()
    }

    fn api(base_url: String) -> HttpPostsApi {
        HttpPostsApi::new(&ClientConfig::new(base_url)).unwrap()
    }

    #[tokio::test]
    async fn list_posts_decodes_body() {
        let (base, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"[{"userId":1,"id":1,"title":"a","body":"b"},{"userId":2,"id":2,"title":"c","body":"d"}]"#,
        )
        .await;

        let posts = api(base).list_posts().await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[1].user_id, UserId::new(2));

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /posts HTTP/1.1"));
    }

    #[tokio::test]
    async fn non_success_status_collapses_to_generic_failure() {
        let (base, _server) = serve_once("HTTP/1.1 500 Internal Server Error", "{}").await;

        let err = api(base).list_posts().await.unwrap_err();
        assert_eq!(err, ApiError::Status(ApiOperation::FetchPosts));
        assert_eq!(err.to_string(), "Failed to fetch posts");
    }

    #[tokio::test]
    async fn not_found_on_delete_is_the_same_generic_failure() {
        let (base, server) = serve_once("HTTP/1.1 404 Not Found", "{}").await;

        let err = api(base).delete_post(PostId::new(9)).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to delete post");

        let request = server.await.unwrap();
        assert!(request.starts_with("DELETE /posts/9 HTTP/1.1"));
    }

    #[tokio::test]
    async fn update_sends_json_with_user_id() {
        let (base, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"userId":4,"id":7,"title":"new","body":"text"}"#,
        )
        .await;
        let post = RemotePost {
            id: PostId::new(7),
            user_id: UserId::new(4),
            title: "new".into(),
            body: "text".into(),
        };

        let updated = api(base).update_post(&post).await.unwrap();
        assert_eq!(updated, post);

        let request = server.await.unwrap();
        assert!(request.starts_with("PUT /posts/7 HTTP/1.1"));
        assert!(request.to_ascii_lowercase().contains("content-type: application/json; charset=utf-8"));
        assert!(request.contains(r#""userId":4"#));
    }

    #[tokio::test]
    async fn get_user_decodes_profile() {
        let (base, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"id":1,"name":"Leanne Graham","username":"Bret","email":"Sincere@april.biz","phone":"1-770-736-8031","website":"hildegard.org","company":{"name":"Romaguera-Crona"}}"#,
        )
        .await;

        let user = api(base).get_user(UserId::new(1)).await.unwrap();
        assert_eq!(user.username, "Bret");
        assert_eq!(user.website.as_deref(), Some("hildegard.org"));

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /users/1 HTTP/1.1"));
    }

    #[tokio::test]
    async fn list_comments_decodes_fetched_comments() {
        let (base, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"[{"postId":1,"id":1,"name":"id labore","email":"Eliseo@gardner.biz","body":"laudantium"}]"#,
        )
        .await;

        let comments = api(base).list_comments(PostId::new(1)).await.unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].post_id, PostId::new(1));
        assert!(!comments[0].is_user_comment);
        assert_eq!(comments[0].timestamp, None);

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /posts/1/comments HTTP/1.1"));
    }

    #[tokio::test]
    async fn get_user_failure_names_the_operation() {
        let (base, _server) = serve_once("HTTP/1.1 404 Not Found", "{}").await;

        let err = api(base).get_user(UserId::new(99)).await.unwrap_err();
        assert_eq!(err, ApiError::Status(ApiOperation::FetchUser));
        assert_eq!(err.to_string(), "Failed to fetch user");
    }

    #[tokio::test]
    async fn list_comments_failure_names_the_operation() {
        let (base, _server) = serve_once("HTTP/1.1 503 Service Unavailable", "{}").await;

        let err = api(base).list_comments(PostId::new(1)).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch comments");
    }

    #[tokio::test]
    async fn connection_failure_is_a_transport_error() {
        // 一度 bind して閉じたポートには誰も listen していない
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = api(format!("http://{addr}")).list_posts().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
