//! Identity extraction.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Authenticated caller identity extractor.
///
/// Use this in handlers to require authentication:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.user_id)
/// }
/// ```
///
/// `user_id` is the caller's directory id as verified from the session
/// token; it is never taken from client-supplied request data.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: String,
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = match req.app_data::<web::Data<AppState>>() {
            Some(state) => state,
            None => {
                tracing::error!("AppState not found in app data");
                return ready(Err(AppError::Internal(
                    "server configuration error".to_string(),
                )));
            }
        };

        let auth_header = match req.headers().get(header::AUTHORIZATION) {
            Some(value) => value,
            None => return ready(Err(AppError::Unauthorized)),
        };

        let auth_str = match auth_header.to_str() {
            Ok(s) => s,
            Err(_) => return ready(Err(AppError::Unauthorized)),
        };

        // Parse "Bearer <token>"
        let token = match auth_str.strip_prefix("Bearer ") {
            Some(t) => t,
            None => return ready(Err(AppError::Unauthorized)),
        };

        match state.verifier.verify(token) {
            Ok(claims) => ready(Ok(Identity {
                user_id: claims.user_id,
            })),
            Err(e) => {
                tracing::debug!("session token rejected: {}", e);
                ready(Err(AppError::Unauthorized))
            }
        }
    }
}
