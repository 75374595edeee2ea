//! Session token verification.

mod jwt;

pub use jwt::{JwtConfig, JwtTokenVerifier};
