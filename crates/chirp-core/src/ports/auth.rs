//! Session verification port.
//!
//! The identity protocol itself lives in the external identity service;
//! chirp only verifies the session tokens it mints and extracts the caller's
//! directory id.

/// Claims extracted from a verified session token.
#[derive(Debug, Clone)]
pub struct SessionClaims {
    /// The caller's user directory id.
    pub user_id: String,
    pub exp: i64,
}

/// Verifies session tokens issued by the identity layer.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<SessionClaims, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("token expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("missing authorization header")]
    MissingAuth,
}
