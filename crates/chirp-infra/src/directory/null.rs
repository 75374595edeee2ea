use async_trait::async_trait;

use chirp_core::ports::{DirectoryError, UserDirectory, UserRecord};

/// Directory fallback for when no secret key is configured.
///
/// Serves no records, so feeds render without author profiles; the read
/// path keeps working instead of failing outright.
pub struct NullUserDirectory;

#[async_trait]
impl UserDirectory for NullUserDirectory {
    async fn find_by_ids(
        &self,
        ids: &[String],
        _limit: u64,
    ) -> Result<Vec<UserRecord>, DirectoryError> {
        tracing::warn!(requested = ids.len(), "user directory not configured - serving posts without authors");
        Ok(Vec::new())
    }

    async fn find_by_username(&self, _username: &str) -> Result<Option<UserRecord>, DirectoryError> {
        tracing::warn!("user directory not configured - profile lookups always miss");
        Ok(None)
    }
}
