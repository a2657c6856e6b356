//! Client configuration.

use std::time::Duration;

/// JSONPlaceholder 互換の公開 API
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// 成功 / エラーメッセージを表示しておく時間
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// 末尾の `/` を除いたベース URL
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
