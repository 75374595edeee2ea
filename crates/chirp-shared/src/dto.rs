//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
}

/// A single post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub author_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// An author's public profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorResponse {
    pub id: String,
    pub username: Option<String>,
    pub profile_image_url: String,
}

/// A feed entry: a post plus its author's profile, when the directory
/// returned one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedItemResponse {
    pub post: PostResponse,
    pub author: Option<AuthorResponse>,
}
