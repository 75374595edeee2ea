//! Profile lookups against the user directory.

use std::sync::Arc;

use crate::domain::AuthorView;
use crate::error::DomainError;
use crate::ports::UserDirectory;

/// Read-only profile service over the user directory.
pub struct ProfileService {
    directory: Arc<dyn UserDirectory>,
}

impl ProfileService {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    /// Look up a profile by exact username.
    pub async fn get_by_username(&self, username: &str) -> Result<AuthorView, DomainError> {
        let user = self
            .directory
            .find_by_username(username)
            .await?
            .ok_or(DomainError::NotFound { entity: "user" })?;

        Ok(AuthorView::from(user))
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::ports::{DirectoryError, UserRecord};

    struct StaticDirectory {
        users: Vec<UserRecord>,
    }

    #[async_trait]
    impl UserDirectory for StaticDirectory {
        async fn find_by_ids(
            &self,
            ids: &[String],
            _limit: u64,
        ) -> Result<Vec<UserRecord>, DirectoryError> {
            Ok(self
                .users
                .iter()
                .filter(|u| ids.contains(&u.id))
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

    #[tokio::test]
    async fn returns_profile_for_known_username() {
        let svc = ProfileService::new(Arc::new(StaticDirectory {
            users: vec![UserRecord {
                id: "user_1".to_string(),
                username: Some("alice".to_string()),
                profile_image_url: "https://img.example/alice.png".to_string(),
            }],
        }));

        let profile = svc.get_by_username("alice").await.unwrap();

        assert_eq!(profile.id, "user_1");
        assert_eq!(profile.username.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn unknown_username_is_not_found() {
        let svc = ProfileService::new(Arc::new(StaticDirectory { users: vec![] }));

        let err = svc.get_by_username("nobody").await.unwrap_err();

        assert!(matches!(err, DomainError::NotFound { entity: "user" }));
    }
}
