//! Redis rate limiter implementation using a sliding window over a sorted set.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{Client, Script};

use chirp_core::ports::{RateLimitError, RateLimitResult, RateLimiter};

/// Redis rate limiter configuration.
#[derive(Debug, Clone)]
pub struct RedisRateLimitConfig {
    /// Redis connection URL.
    pub url: String,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Maximum permits per window per key.
    pub max_requests: u32,
    /// Window duration.
    pub window: Duration,
    /// Key prefix for rate limit keys.
    pub key_prefix: String,
}

impl RedisRateLimitConfig {
    /// Read the configuration from environment variables.
    ///
    /// Returns `None` when `REDIS_URL` is unset; the caller then falls back
    /// to the in-process keyed limiter.
    pub fn from_env() -> Option<Self> {
        let url = std::env::var("REDIS_URL").ok()?;

        Some(Self {
            url,
            connect_timeout: Duration::from_secs(5),
            max_requests: std::env::var("RATE_LIMIT_MAX_REQUESTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3),
            window: Duration::from_secs(
                std::env::var("RATE_LIMIT_WINDOW_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
            ),
            key_prefix: std::env::var("RATE_LIMIT_KEY_PREFIX")
                .unwrap_or_else(|_| "ratelimit".to_string()),
        })
    }
}

/// Redis-backed sliding window rate limiter, shared across instances.
///
/// Each check runs one Lua script: drop members older than the window,
/// count what is left, and admit the caller only if the count is under the
/// quota. Every permit is a sorted-set member scored by its timestamp, so
/// the window truly slides instead of resetting at fixed boundaries.
pub struct RedisRateLimiter {
    conn: ConnectionManager,
    config: RedisRateLimitConfig,
    script: Script,
}

impl RedisRateLimiter {
    pub async fn new(config: RedisRateLimitConfig) -> Result<Self, RateLimitError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| RateLimitError::Backend(e.to_string()))?;

        // Use timeout to prevent hanging if Redis is unreachable
        let conn_manager_fut = ConnectionManager::new(client);
        let conn = tokio::time::timeout(config.connect_timeout, conn_manager_fut)
            .await
            .map_err(|_| RateLimitError::Backend("connection timed out".to_string()))?
            .map_err(|e| RateLimitError::Backend(e.to_string()))?;

        // Returns: [allowed, remaining, reset_after_ms]
        let script = Script::new(
            r#"
            local key = KEYS[1]
            local now_ms = tonumber(ARGV[1])
            local window_ms = tonumber(ARGV[2])
            local max_requests = tonumber(ARGV[3])
            local member = ARGV[4]

            redis.call('ZREMRANGEBYSCORE', key, 0, now_ms - window_ms)
            local count = redis.call('ZCARD', key)

            if count < max_requests then
                redis.call('ZADD', key, now_ms, member)
                redis.call('PEXPIRE', key, window_ms)
                return {1, max_requests - count - 1, window_ms}
            end

            local reset_ms = window_ms
            local oldest = redis.call('ZRANGE', key, 0, 0, 'WITHSCORES')
            if oldest[2] then
                reset_ms = tonumber(oldest[2]) + window_ms - now_ms
            end
            return {0, 0, reset_ms}
            "#,
        );

        tracing::info!(url = %config.url, "connected to Redis rate limiter");

        Ok(Self {
            conn,
            config,
            script,
        })
    }

    fn make_key(&self, key: &str) -> String {
        format!("{}:{}", self.config.key_prefix, key)
    }
}

#[async_trait]
impl RateLimiter for RedisRateLimiter {
    async fn try_consume(&self, key: &str) -> Result<RateLimitResult, RateLimitError> {
        let redis_key = self.make_key(key);
        let mut conn = self.conn.clone();

        let now_ms = chrono::Utc::now().timestamp_millis();
        // Unique member per attempt; the score carries the timestamp.
        let member = format!("{}-{}", now_ms, uuid::Uuid::new_v4());

        let result: Vec<i64> = self
            .script
            .key(&redis_key)
            .arg(now_ms)
            .arg(self.config.window.as_millis() as u64)
            .arg(self.config.max_requests)
            .arg(member)
            .invoke_async(&mut conn)
            .await
            .map_err(|e| RateLimitError::Backend(e.to_string()))?;

        let allowed = result.first().copied().unwrap_or(0) == 1;
        let remaining = result.get(1).copied().unwrap_or(0).max(0) as u32;
        let reset_ms = result.get(2).copied().unwrap_or(0).max(0) as u64;

        Ok(RateLimitResult {
            allowed,
            remaining,
            reset_after: Duration::from_millis(reset_ms),
        })
    }
}
