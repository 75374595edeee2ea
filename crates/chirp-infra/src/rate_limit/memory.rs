//! In-process keyed rate limiter using the governor crate.

use std::num::NonZeroU32;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::keyed::DefaultKeyedStateStore;
use governor::{Quota, RateLimiter as GovernorRateLimiter};

use chirp_core::ports::{RateLimitError, RateLimitResult, RateLimiter};

type KeyedGovernor = GovernorRateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>;

/// Rate limiter configuration.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum permits per window per key.
    pub max_requests: u32,
    /// Window duration.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 3,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_requests: std::env::var("RATE_LIMIT_MAX_REQUESTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_requests),
            window: Duration::from_secs(
                std::env::var("RATE_LIMIT_WINDOW_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.window.as_secs()),
            ),
        }
    }
}

/// Per-key in-process rate limiter on governor's keyed GCRA state.
///
/// The fallback when Redis is not available. Limits are per-process, not
/// shared across instances.
pub struct KeyedRateLimiter {
    limiter: KeyedGovernor,
    config: RateLimitConfig,
}

impl KeyedRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        let quota = Quota::with_period(config.window / config.max_requests)
            .expect("window must be non-zero")
            .allow_burst(NonZeroU32::new(config.max_requests).expect("max_requests must be non-zero"));

        Self {
            limiter: GovernorRateLimiter::keyed(quota),
            config,
        }
    }

    pub fn from_env() -> Self {
        Self::new(RateLimitConfig::from_env())
    }
}

#[async_trait]
impl RateLimiter for KeyedRateLimiter {
    async fn try_consume(&self, key: &str) -> Result<RateLimitResult, RateLimitError> {
        match self.limiter.check_key(&key.to_string()) {
            Ok(_) => Ok(RateLimitResult {
                allowed: true,
                remaining: self.config.max_requests, // GCRA has no exact count
                reset_after: self.config.window,
            }),
            Err(not_until) => Ok(RateLimitResult {
                allowed: false,
                remaining: 0,
                reset_after: not_until.wait_time_from(governor::clock::Clock::now(
                    &governor::clock::DefaultClock::default(),
                )),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter() -> KeyedRateLimiter {
        KeyedRateLimiter::new(RateLimitConfig {
            max_requests: 3,
            window: Duration::from_secs(60),
        })
    }

    #[tokio::test]
    async fn allows_burst_then_denies_fourth() {
        let limiter = limiter();

        for _ in 0..3 {
            let res = limiter.try_consume("user_1").await.unwrap();
            assert!(res.allowed);
        }

        let res = limiter.try_consume("user_1").await.unwrap();
        assert!(!res.allowed);
        assert!(res.reset_after > Duration::ZERO);
    }

    #[tokio::test]
    async fn keys_are_limited_independently() {
        let limiter = limiter();

        for _ in 0..3 {
            assert!(limiter.try_consume("user_1").await.unwrap().allowed);
        }
        assert!(!limiter.try_consume("user_1").await.unwrap().allowed);

        // A different identity still has its full quota.
        assert!(limiter.try_consume("user_2").await.unwrap().allowed);
    }
}
