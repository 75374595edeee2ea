//! Application state - shared across all handlers.

use std::sync::Arc;

use chirp_core::ports::{PostRepository, RateLimiter, TokenVerifier, UserDirectory};
use chirp_core::service::{PostService, ProfileService};
use chirp_infra::database::{self, InMemoryPostRepository, PostgresPostRepository};
use chirp_infra::rate_limit::{KeyedRateLimiter, RedisRateLimitConfig, RedisRateLimiter};
use chirp_infra::{DirectoryConfig, HttpUserDirectory, JwtTokenVerifier, NullUserDirectory};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub profiles: Arc<ProfileService>,
    pub verifier: Arc<dyn TokenVerifier>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// Each collaborator degrades gracefully when unconfigured: posts fall
    /// back to an in-memory store, the directory to an empty one, and the
    /// rate limiter to its in-process variant.
    pub async fn new(config: &AppConfig) -> Self {
        let posts: Arc<dyn PostRepository> = match &config.database {
            Some(db_config) => match database::connect(db_config).await {
                Ok(conn) => Arc::new(PostgresPostRepository::new(conn)),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory store.",
                        e
                    );
                    Arc::new(InMemoryPostRepository::new())
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Posts are stored in memory.");
                Arc::new(InMemoryPostRepository::new())
            }
        };

        let directory: Arc<dyn UserDirectory> = match DirectoryConfig::from_env() {
            Some(dir_config) => match HttpUserDirectory::new(dir_config) {
                Ok(client) => Arc::new(client),
                Err(e) => {
                    tracing::error!("Failed to build directory client: {}. Serving without author profiles.", e);
                    Arc::new(NullUserDirectory)
                }
            },
            None => {
                tracing::warn!(
                    "DIRECTORY_SECRET_KEY not set. Serving posts without author profiles."
                );
                Arc::new(NullUserDirectory)
            }
        };

        // Constructed once here and injected; the services never reach for a
        // process-wide limiter.
        let limiter: Arc<dyn RateLimiter> = match RedisRateLimitConfig::from_env() {
            Some(redis_config) => match RedisRateLimiter::new(redis_config).await {
                Ok(l) => Arc::new(l),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to Redis: {}. Rate limits are per-process.",
                        e
                    );
                    Arc::new(KeyedRateLimiter::from_env())
                }
            },
            None => {
                tracing::warn!("REDIS_URL not set. Rate limits are per-process.");
                Arc::new(KeyedRateLimiter::from_env())
            }
        };

        let verifier: Arc<dyn TokenVerifier> = Arc::new(JwtTokenVerifier::from_env());

        tracing::info!("Application state initialized");

        Self {
            posts: Arc::new(PostService::new(posts, directory.clone(), limiter)),
            profiles: Arc::new(ProfileService::new(directory)),
            verifier,
        }
    }
}
