//! Rate limiter adapters.

mod memory;
mod redis;

pub use memory::{KeyedRateLimiter, RateLimitConfig};
pub use redis::{RedisRateLimitConfig, RedisRateLimiter};
