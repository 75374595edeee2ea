//! HTTP client for the user directory REST API.

use std::time::Duration;

use async_trait::async_trait;

use chirp_core::ports::{DirectoryError, UserDirectory, UserRecord};

const DEFAULT_BASE_URL: &str = "https://api.directory.example";

/// User directory client configuration.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub base_url: String,
    pub secret_key: String,
    pub timeout: Duration,
}

impl DirectoryConfig {
    /// Read the configuration from environment variables.
    ///
    /// Returns `None` when `DIRECTORY_SECRET_KEY` is unset; the caller then
    /// falls back to `NullUserDirectory` and feeds stay author-less.
    pub fn from_env() -> Option<Self> {
        let secret_key = std::env::var("DIRECTORY_SECRET_KEY").ok()?;

        Some(Self {
            base_url: std::env::var("DIRECTORY_API_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            secret_key,
            timeout: Duration::from_secs(
                std::env::var("DIRECTORY_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
        })
    }
}

/// User directory client over the directory's REST API.
///
/// Lookups hit `GET {base}/v1/users` with repeated `user_id` parameters for
/// the batched form and a `username` parameter for the exact-match form,
/// bearer-authenticated with the directory secret key.
pub struct HttpUserDirectory {
    client: reqwest::Client,
    config: DirectoryConfig,
}

impl HttpUserDirectory {
    pub fn new(config: DirectoryConfig) -> Result<Self, DirectoryError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DirectoryError::Transport(e.to_string()))?;

        Ok(Self { client, config })
    }

    async fn fetch_users(&self, query: &[(&str, String)]) -> Result<Vec<UserRecord>, DirectoryError> {
        let url = format!("{}/v1/users", self.config.base_url);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.config.secret_key)
            .query(query)
            .send()
            .await
            .map_err(|e| DirectoryError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DirectoryError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        resp.json::<Vec<UserRecord>>()
            .await
            .map_err(|e| DirectoryError::Transport(e.to_string()))
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn find_by_ids(
        &self,
        ids: &[String],
        limit: u64,
    ) -> Result<Vec<UserRecord>, DirectoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query: Vec<(&str, String)> = vec![("limit", limit.to_string())];
        for id in ids {
            query.push(("user_id", id.clone()));
        }

        let users = self.fetch_users(&query).await?;
        tracing::debug!(requested = ids.len(), found = users.len(), "directory batch lookup");
        Ok(users)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, DirectoryError> {
        let query = [("username", username.to_string())];
        let users = self.fetch_users(&query).await?;
        Ok(users.into_iter().next())
    }
}
