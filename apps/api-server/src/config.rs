//! Application configuration loaded from environment variables.

use std::env;

use chirp_infra::DatabaseConfig;

/// Application configuration.
///
/// The directory, rate limiter and session-secret settings are read by
/// their adapters' own `from_env` constructors in `chirp_infra`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database: DatabaseConfig::from_env(),
        }
    }
}
