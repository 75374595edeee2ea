//! In-memory post store - used as fallback when no database is configured.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use chirp_core::domain::Post;
use chirp_core::error::RepoError;
use chirp_core::ports::PostRepository;

/// In-memory post store over a Vec with an async RwLock.
///
/// Data is lost on process restart; reads see the same newest-first order as
/// the Postgres repository. A stable sort keeps insertion order for posts
/// created in the same instant.
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, author_id: &str, content: &str) -> Result<Post, RepoError> {
        let post = Post::new(author_id, content);
        self.posts.write().await.push(post.clone());
        Ok(post)
    }

    async fn find_recent(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
        let mut posts = self.posts.read().await.clone();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts.truncate(limit as usize);
        Ok(posts)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_author(&self, author_id: &str, limit: u64) -> Result<Vec<Post>, RepoError> {
        let mut posts: Vec<Post> = self
            .posts
            .read()
            .await
            .iter()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts.truncate(limit as usize);
        Ok(posts)
    }
}
