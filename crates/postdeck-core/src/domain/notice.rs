//! Notice - 一時的な成功 / エラーメッセージ
//!
//! 成功とエラーは同時に存在しないので、`Option<Notice>` の 1 スロットで持ちます。

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

impl Notice {
    pub fn success(message: impl Into<String>, raised_at: DateTime<Utc>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
            raised_at,
        }
    }

    pub fn error(message: impl Into<String>, raised_at: DateTime<Utc>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
            raised_at,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }

    /// `ttl` 以上経過していれば true
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.raised_at >= ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn expires_after_ttl() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let notice = Notice::success("ok", t0);
        let ttl = Duration::seconds(3);

        assert!(!notice.is_expired(t0 + Duration::milliseconds(2999), ttl));
        assert!(notice.is_expired(t0 + Duration::seconds(3), ttl));
    }
}
