//! # Chirp Infrastructure
//!
//! Concrete implementations of the ports defined in `chirp-core`:
//! the Postgres post store, the user directory HTTP client, the rate
//! limiters, and session token verification.

pub mod auth;
pub mod database;
pub mod directory;
pub mod rate_limit;

pub use auth::JwtTokenVerifier;
pub use database::{DatabaseConfig, InMemoryPostRepository, PostgresPostRepository};
pub use directory::{DirectoryConfig, HttpUserDirectory, NullUserDirectory};
pub use rate_limit::{KeyedRateLimiter, RateLimitConfig, RedisRateLimitConfig, RedisRateLimiter};
