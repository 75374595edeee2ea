//! User directory port - the external identity service's read surface.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A user record as returned by the directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub username: Option<String>,
    pub profile_image_url: String,
}

/// User directory trait - lookups against the external identity service.
///
/// The directory owns all user data; chirp never writes to it.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch the records for the given ids, capped at `limit`.
    ///
    /// Ids with no record are simply absent from the result; this is not an
    /// error.
    async fn find_by_ids(
        &self,
        ids: &[String],
        limit: u64,
    ) -> Result<Vec<UserRecord>, DirectoryError>;

    /// Fetch a record by exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, DirectoryError>;
}

/// Directory errors.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("directory returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("directory unreachable: {0}")]
    Transport(String),
}
