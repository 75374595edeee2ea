//! Rate limiting port.

use async_trait::async_trait;
use std::time::Duration;

/// Rate limiter trait - abstraction over rate limiting backends.
///
/// The contract is a sliding window per key: an allowed call consumes one
/// permit immediately, whether or not the operation it guards later succeeds.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Consume one permit for `key` if the window has room.
    async fn try_consume(&self, key: &str) -> Result<RateLimitResult, RateLimitError>;
}

/// Result of a rate limit check.
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_after: Duration,
}

/// Rate limit errors.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("rate limiter backend error: {0}")]
    Backend(String),
}
