use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Post;
use crate::error::RepoError;

/// Post store port.
///
/// Posts are append-only: there are no update or delete operations. Both
/// listing methods return posts ordered by `created_at` descending; ties
/// keep the store's insertion order.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Persist a new post with a server-assigned id and timestamp.
    async fn insert(&self, author_id: &str, content: &str) -> Result<Post, RepoError>;

    /// The most recent posts across all authors, up to `limit`.
    async fn find_recent(&self, limit: u64) -> Result<Vec<Post>, RepoError>;

    /// Find a post by its unique ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// The most recent posts by one author, up to `limit`.
    async fn find_by_author(&self, author_id: &str, limit: u64) -> Result<Vec<Post>, RepoError>;
}
