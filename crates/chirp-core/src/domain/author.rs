use serde::{Deserialize, Serialize};

use crate::ports::UserRecord;

/// Read-only projection of a user directory record, joined onto posts.
///
/// The directory owns these fields; chirp only reads per-request snapshots.
/// `username` is optional because the directory does not require one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorView {
    pub id: String,
    pub username: Option<String>,
    pub profile_image_url: String,
}

impl From<UserRecord> for AuthorView {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            username: user.username,
            profile_image_url: user.profile_image_url,
        }
    }
}
