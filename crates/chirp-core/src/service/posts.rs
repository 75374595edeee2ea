//! The post service: authoring and feed retrieval.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{AuthorView, EnrichedPost, Post, content};
use crate::error::DomainError;
use crate::ports::{PostRepository, RateLimiter, UserDirectory};

/// Feed page size for the global and per-author feeds.
pub const FEED_PAGE_SIZE: u64 = 100;

/// The directory rejects batches larger than this, so enrichment never asks
/// for more ids per page.
const DIRECTORY_PAGE_LIMIT: u64 = 100;

/// Orchestrates the post store, user directory and rate limiter.
///
/// All collaborators are injected once at construction; the service itself
/// holds no mutable state and every call is an independent unit of work.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    directory: Arc<dyn UserDirectory>,
    limiter: Arc<dyn RateLimiter>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        directory: Arc<dyn UserDirectory>,
        limiter: Arc<dyn RateLimiter>,
    ) -> Self {
        Self {
            posts,
            directory,
            limiter,
        }
    }

    /// Create a post for the authenticated author.
    ///
    /// The order is fixed: validate, then consume a rate-limit permit, then
    /// persist. An allowed permit is spent even if the insert later fails.
    pub async fn create(&self, author_id: &str, content: &str) -> Result<Post, DomainError> {
        content::validate(content)?;

        let decision = self.limiter.try_consume(author_id).await?;
        if !decision.allowed {
            tracing::warn!(author_id, "post creation rate limited");
            return Err(DomainError::RateLimited {
                retry_after: decision.reset_after,
            });
        }

        let post = self.posts.insert(author_id, content).await?;
        tracing::info!(post_id = %post.id, author_id, "post created");
        Ok(post)
    }

    /// The global feed: the 100 most recent posts, newest first, with
    /// author profiles joined on.
    pub async fn get_all(&self) -> Result<Vec<EnrichedPost>, DomainError> {
        let posts = self.posts.find_recent(FEED_PAGE_SIZE).await?;
        self.enrich(posts).await
    }

    /// A single post by id, enriched with its author.
    pub async fn get_by_id(&self, id: Uuid) -> Result<EnrichedPost, DomainError> {
        let post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound { entity: "post" })?;

        let enriched = self.enrich(vec![post]).await?;
        enriched
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::Internal("enrichment dropped the post".to_string()))
    }

    /// One author's feed: up to 100 posts, newest first, enriched.
    pub async fn get_by_author(&self, author_id: &str) -> Result<Vec<EnrichedPost>, DomainError> {
        let posts = self.posts.find_by_author(author_id, FEED_PAGE_SIZE).await?;
        self.enrich(posts).await
    }

    /// Join author profiles onto posts with a single batched directory call.
    ///
    /// The output has the same length and order as the input. Posts whose
    /// author the directory does not return carry `author: None`. An empty
    /// input performs no directory call at all.
    async fn enrich(&self, posts: Vec<Post>) -> Result<Vec<EnrichedPost>, DomainError> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let mut author_ids: Vec<String> = Vec::new();
        for post in &posts {
            if !author_ids.contains(&post.author_id) {
                author_ids.push(post.author_id.clone());
            }
        }

        let authors: HashMap<String, AuthorView> = self
            .directory
            .find_by_ids(&author_ids, DIRECTORY_PAGE_LIMIT)
            .await?
            .into_iter()
            .map(|user| (user.id.clone(), AuthorView::from(user)))
            .collect();

        Ok(posts
            .into_iter()
            .map(|post| {
                let author = authors.get(&post.author_id).cloned();
                EnrichedPost { post, author }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::{TimeDelta, Utc};

    use super::*;
    use crate::error::RepoError;
    use crate::ports::{DirectoryError, RateLimitError, RateLimitResult, UserRecord};

    struct FakePosts {
        posts: Mutex<Vec<Post>>,
    }

    impl FakePosts {
        fn new() -> Self {
            Self {
                posts: Mutex::new(Vec::new()),
            }
        }

        fn seed(&self, post: Post) {
            self.posts.lock().unwrap().push(post);
        }
    }

    #[async_trait]
    impl PostRepository for FakePosts {
        async fn insert(&self, author_id: &str, content: &str) -> Result<Post, RepoError> {
            let post = Post::new(author_id, content);
            self.posts.lock().unwrap().push(post.clone());
            Ok(post)
        }

        async fn find_recent(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
            let mut posts = self.posts.lock().unwrap().clone();
            posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            posts.truncate(limit as usize);
            Ok(posts)
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
            Ok(self
                .posts
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.id == id)
                .cloned())
        }

        async fn find_by_author(&self, author_id: &str, limit: u64) -> Result<Vec<Post>, RepoError> {
            let mut posts: Vec<Post> = self
                .posts
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.author_id == author_id)
                .cloned()
                .collect();
            posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            posts.truncate(limit as usize);
            Ok(posts)
        }
    }

    struct FakeDirectory {
        users: Vec<UserRecord>,
        calls: AtomicUsize,
        requested: Mutex<Vec<Vec<String>>>,
    }

    impl FakeDirectory {
        fn new(users: Vec<UserRecord>) -> Self {
            Self {
                users,
                calls: AtomicUsize::new(0),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl UserDirectory for FakeDirectory {
        async fn find_by_ids(
            &self,
            ids: &[String],
            limit: u64,
        ) -> Result<Vec<UserRecord>, DirectoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requested.lock().unwrap().push(ids.to_vec());
            Ok(self
                .users
                .iter()
                .filter(|u| ids.contains(&u.id))
                .take(limit as usize)
                .cloned()
                .collect())
        }

        async fn find_by_username(
            &self,
            username: &str,
        ) -> Result<Option<UserRecord>, DirectoryError> {
            Ok(self
                .users
                .iter()
                .find(|u| u.username.as_deref() == Some(username))
                .cloned())
        }
    }

    struct FakeLimiter {
        limit: u32,
        consumed: AtomicU32,
    }

    impl FakeLimiter {
        fn new(limit: u32) -> Self {
            Self {
                limit,
                consumed: AtomicU32::new(0),
            }
        }

        fn permits_consumed(&self) -> u32 {
            self.consumed.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RateLimiter for FakeLimiter {
        async fn try_consume(&self, _key: &str) -> Result<RateLimitResult, RateLimitError> {
            let used = self.consumed.fetch_add(1, Ordering::SeqCst);
            let allowed = used < self.limit;
            Ok(RateLimitResult {
                allowed,
                remaining: self.limit.saturating_sub(used + 1),
                reset_after: Duration::from_secs(60),
            })
        }
    }

    fn user(id: &str, username: &str) -> UserRecord {
        UserRecord {
            id: id.to_string(),
            username: Some(username.to_string()),
            profile_image_url: format!("https://img.example/{id}.png"),
        }
    }

    fn post_at(author_id: &str, content: &str, seconds_ago: i64) -> Post {
        let mut post = Post::new(author_id, content);
        post.created_at = Utc::now() - TimeDelta::seconds(seconds_ago);
        post
    }

    fn service(
        posts: Arc<FakePosts>,
        directory: Arc<FakeDirectory>,
        limiter: Arc<FakeLimiter>,
    ) -> PostService {
        PostService::new(posts, directory, limiter)
    }

    #[tokio::test]
    async fn create_persists_valid_post() {
        let posts = Arc::new(FakePosts::new());
        let directory = Arc::new(FakeDirectory::new(vec![]));
        let limiter = Arc::new(FakeLimiter::new(3));
        let svc = service(posts.clone(), directory, limiter);

        let post = svc.create("user_1", "👍").await.unwrap();

        assert_eq!(post.author_id, "user_1");
        assert_eq!(post.content, "👍");
        assert_eq!(posts.posts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_rejects_non_emoji_without_side_effects() {
        let posts = Arc::new(FakePosts::new());
        let directory = Arc::new(FakeDirectory::new(vec![]));
        let limiter = Arc::new(FakeLimiter::new(3));
        let svc = service(posts.clone(), directory, limiter.clone());

        let err = svc.create("user_1", "hello").await.unwrap_err();

        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert!(posts.posts.lock().unwrap().is_empty());
        // Validation runs before the rate limit check, so no permit is spent.
        assert_eq!(limiter.permits_consumed(), 0);
    }

    #[tokio::test]
    async fn fourth_create_in_window_is_rate_limited() {
        let posts = Arc::new(FakePosts::new());
        let directory = Arc::new(FakeDirectory::new(vec![]));
        let limiter = Arc::new(FakeLimiter::new(3));
        let svc = service(posts.clone(), directory, limiter);

        for _ in 0..3 {
            svc.create("user_2", "🎉").await.unwrap();
        }
        let err = svc.create("user_2", "🎉").await.unwrap_err();

        assert!(matches!(err, DomainError::RateLimited { .. }));
        assert_eq!(posts.posts.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn get_all_returns_newest_first_capped_at_page_size() {
        let posts = Arc::new(FakePosts::new());
        for i in 0..120 {
            posts.seed(post_at("user_1", "🌊", i));
        }
        let directory = Arc::new(FakeDirectory::new(vec![user("user_1", "alice")]));
        let limiter = Arc::new(FakeLimiter::new(3));
        let svc = service(posts, directory, limiter);

        let feed = svc.get_all().await.unwrap();

        assert_eq!(feed.len(), FEED_PAGE_SIZE as usize);
        for pair in feed.windows(2) {
            assert!(pair[0].post.created_at >= pair[1].post.created_at);
        }
    }

    #[tokio::test]
    async fn get_all_enriches_with_one_batched_directory_call() {
        let posts = Arc::new(FakePosts::new());
        posts.seed(post_at("user_1", "🍕", 3));
        posts.seed(post_at("user_2", "🍔", 2));
        posts.seed(post_at("user_1", "🌮", 1));
        let directory = Arc::new(FakeDirectory::new(vec![
            user("user_1", "alice"),
            user("user_2", "bob"),
        ]));
        let limiter = Arc::new(FakeLimiter::new(3));
        let svc = service(posts, directory.clone(), limiter);

        let feed = svc.get_all().await.unwrap();

        assert_eq!(feed.len(), 3);
        assert_eq!(directory.call_count(), 1);
        // Distinct author ids only, despite user_1 appearing twice.
        let requested = directory.requested.lock().unwrap();
        assert_eq!(requested.len(), 1);
        assert_eq!(requested[0].len(), 2);
        // Every post carries its own author.
        assert_eq!(
            feed[0].author.as_ref().unwrap().username.as_deref(),
            Some("alice")
        );
        assert_eq!(
            feed[1].author.as_ref().unwrap().username.as_deref(),
            Some("bob")
        );
    }

    #[tokio::test]
    async fn get_all_on_empty_store_skips_the_directory() {
        let posts = Arc::new(FakePosts::new());
        let directory = Arc::new(FakeDirectory::new(vec![]));
        let limiter = Arc::new(FakeLimiter::new(3));
        let svc = service(posts, directory.clone(), limiter);

        let feed = svc.get_all().await.unwrap();

        assert!(feed.is_empty());
        assert_eq!(directory.call_count(), 0);
    }

    #[tokio::test]
    async fn directory_miss_degrades_to_absent_author() {
        let posts = Arc::new(FakePosts::new());
        posts.seed(post_at("user_gone", "👻", 1));
        let directory = Arc::new(FakeDirectory::new(vec![]));
        let limiter = Arc::new(FakeLimiter::new(3));
        let svc = service(posts, directory, limiter);

        let feed = svc.get_all().await.unwrap();

        assert_eq!(feed.len(), 1);
        assert!(feed[0].author.is_none());
    }

    #[tokio::test]
    async fn get_by_id_returns_enriched_post() {
        let posts = Arc::new(FakePosts::new());
        let seeded = post_at("user_1", "👍", 1);
        let id = seeded.id;
        posts.seed(seeded);
        let directory = Arc::new(FakeDirectory::new(vec![user("user_1", "alice")]));
        let limiter = Arc::new(FakeLimiter::new(3));
        let svc = service(posts, directory, limiter);

        let enriched = svc.get_by_id(id).await.unwrap();

        assert_eq!(enriched.post.id, id);
        assert_eq!(enriched.post.content, "👍");
        assert_eq!(
            enriched.author.as_ref().unwrap().username.as_deref(),
            Some("alice")
        );
    }

    #[tokio::test]
    async fn get_by_id_unknown_is_not_found() {
        let posts = Arc::new(FakePosts::new());
        let directory = Arc::new(FakeDirectory::new(vec![]));
        let limiter = Arc::new(FakeLimiter::new(3));
        let svc = service(posts, directory, limiter);

        let err = svc.get_by_id(Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, DomainError::NotFound { entity: "post" }));
    }

    #[tokio::test]
    async fn get_by_author_filters_and_orders() {
        let posts = Arc::new(FakePosts::new());
        posts.seed(post_at("user_1", "🍕", 3));
        posts.seed(post_at("user_2", "🍔", 2));
        posts.seed(post_at("user_1", "🌮", 1));
        let directory = Arc::new(FakeDirectory::new(vec![user("user_1", "alice")]));
        let limiter = Arc::new(FakeLimiter::new(3));
        let svc = service(posts, directory, limiter);

        let feed = svc.get_by_author("user_1").await.unwrap();

        assert_eq!(feed.len(), 2);
        assert!(feed.iter().all(|e| e.post.author_id == "user_1"));
        assert_eq!(feed[0].post.content, "🌮");
        assert_eq!(feed[1].post.content, "🍕");
    }
}
