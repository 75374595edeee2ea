use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AuthorView;

/// Post entity - a single emoji message.
///
/// `author_id` is the opaque id the external user directory issued for the
/// author; it is stored verbatim and never parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post with generated ID and creation timestamp.
    ///
    /// Callers are expected to have validated `content` already; the store
    /// never sees an unvalidated post.
    pub fn new(author_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id: author_id.into(),
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// A post paired with its author's directory profile, built per response.
///
/// `author` is `None` when the directory lookup did not return the author;
/// consumers render such posts without profile data instead of failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedPost {
    pub post: Post,
    pub author: Option<AuthorView>,
}
