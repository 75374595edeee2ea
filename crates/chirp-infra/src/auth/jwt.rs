//! JWT session verification.
//!
//! The identity layer mints session tokens; chirp only checks the signature
//! and expiry and pulls the caller's directory id out of `sub`.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;

use chirp_core::ports::{AuthError, SessionClaims, TokenVerifier};

/// JWT verification configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
        }
    }
}

/// Wire shape of the session token claims.
#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
}

/// HS256 session token verifier.
pub struct JwtTokenVerifier {
    decoding_key: DecodingKey,
}

impl JwtTokenVerifier {
    pub fn new(config: JwtConfig) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
        }
    }

    pub fn from_env() -> Self {
        let secret = std::env::var("SESSION_JWT_SECRET")
            .unwrap_or_else(|_| JwtConfig::default().secret);

        if secret == JwtConfig::default().secret {
            tracing::warn!("using default session secret - set SESSION_JWT_SECRET for production");
        }

        Self::new(JwtConfig { secret })
    }
}

impl TokenVerifier for JwtTokenVerifier {
    fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let validation = Validation::default();

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            })?;

        Ok(SessionClaims {
            user_id: token_data.claims.sub,
            exp: token_data.claims.exp,
        })
    }
}
