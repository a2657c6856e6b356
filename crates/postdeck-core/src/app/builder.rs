//! ContextBuilder - PostContext の構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）: 必須の port が足りなければ BuildError
//! - 任意の port（Clock, IdGenerator）はデフォルト実装で埋める

use std::sync::Arc;
use std::time::Duration;

use crate::app::context::PostContext;
use crate::app::state::PostState;
use crate::config::DEFAULT_NOTICE_TTL;
use crate::ports::{Clock, IdGenerator, KeyValueStore, MillisIdGenerator, PostsApi, SystemClock};
use crate::storage::PostStore;

/// ContextBuilder は PostContext を構築
///
/// # 使用例
/// ```ignore
/// let ctx = PostContext::builder()
///     .api(HttpPostsApi::new(&config)?)
///     .store(FileKeyValueStore::open(dir)?)
///     .build()?;
/// ```
pub struct ContextBuilder<A, S> {
    api: Option<A>,
    store: Option<S>,
    clock: Option<Arc<dyn Clock>>,
    ids: Option<Box<dyn IdGenerator>>,
    notice_ttl: Duration,
}

/// BuildError は構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("missing {0}: register it on the builder before calling build()")]
    MissingPort(&'static str),
}

impl<A: PostsApi, S: KeyValueStore> ContextBuilder<A, S> {
    pub fn new() -> Self {
        Self {
            api: None,
            store: None,
            clock: None,
            ids: None,
            notice_ttl: DEFAULT_NOTICE_TTL,
        }
    }

    pub fn api(mut self, api: A) -> Self {
        self.api = Some(api);
        self
    }

    pub fn store(mut self, store: S) -> Self {
        self.store = Some(store);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// 省略時は Clock のミリ秒を使う MillisIdGenerator
    pub fn id_generator(mut self, ids: Box<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    pub fn notice_ttl(mut self, ttl: Duration) -> Self {
        self.notice_ttl = ttl;
        self
    }

    /// ストアからローカル投稿を読み込んで PostContext を作る
    ///
    /// # 検証
    /// - api / store が未設定なら BuildError::MissingPort
    pub fn build(self) -> Result<PostContext<A, S>, BuildError> {
        let api = self.api.ok_or(BuildError::MissingPort("api"))?;
        let store = self.store.ok_or(BuildError::MissingPort("store"))?;
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let ids = self
            .ids
            .unwrap_or_else(|| Box::new(MillisIdGenerator::new(clock.clone())));
        let notice_ttl =
            chrono::Duration::from_std(self.notice_ttl).unwrap_or(chrono::Duration::seconds(3));

        let store = PostStore::new(store);
        let state = PostState::with_local_posts(store.load_local_posts());

        Ok(PostContext::from_parts(
            api, store, clock, ids, state, notice_ttl,
        ))
    }
}

impl<A: PostsApi, S: KeyValueStore> Default for ContextBuilder<A, S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::FakeApi;
    use crate::impls::InMemoryKeyValueStore;
    use crate::storage::LOCAL_POSTS_KEY;

    #[test]
    fn build_requires_api_and_store() {
        let missing_api = ContextBuilder::<FakeApi, InMemoryKeyValueStore>::new()
            .store(InMemoryKeyValueStore::new())
            .build();
        assert!(matches!(missing_api, Err(BuildError::MissingPort("api"))));

        let missing_store = ContextBuilder::<FakeApi, InMemoryKeyValueStore>::new()
            .api(FakeApi::default())
            .build();
        assert!(matches!(missing_store, Err(BuildError::MissingPort("store"))));
    }

    #[test]
    fn build_restores_local_posts() {
        let raw = r#"[{"id":1,"title":"t","body":"b","createdAt":"2024-01-01T00:00:00Z","updatedAt":null,"isLocal":true}]"#;
        let ctx = ContextBuilder::new()
            .api(FakeApi::default())
            .store(InMemoryKeyValueStore::with_entries([(LOCAL_POSTS_KEY, raw)]))
            .build()
            .unwrap();

        assert_eq!(ctx.state().local_posts().len(), 1);
        assert!(ctx.state().fetched_posts().is_empty());
    }

    #[test]
    fn build_with_corrupt_storage_starts_empty() {
        let ctx = ContextBuilder::new()
            .api(FakeApi::default())
            .store(InMemoryKeyValueStore::with_entries([(LOCAL_POSTS_KEY, "[{")]))
            .build()
            .unwrap();

        assert!(ctx.state().local_posts().is_empty());
    }
}
