//! Error handling - maps domain failures to RFC 7807 responses.

use std::time::Duration;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use chirp_core::DomainError;
use chirp_shared::ErrorResponse;
use thiserror::Error;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("{0} not found")]
    NotFound(String),

    #[error("rate limit exceeded")]
    TooManyRequests { retry_after: Duration },

    #[error("internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::BadRequest(detail) => {
                HttpResponse::BadRequest().json(ErrorResponse::bad_request(detail))
            }
            AppError::Unauthorized => {
                HttpResponse::Unauthorized().json(ErrorResponse::unauthorized())
            }
            AppError::NotFound(entity) => {
                HttpResponse::NotFound().json(ErrorResponse::not_found(format!("{entity} not found")))
            }
            AppError::TooManyRequests { retry_after } => HttpResponse::TooManyRequests()
                .insert_header(("Retry-After", retry_after.as_secs().max(1).to_string()))
                .json(ErrorResponse::too_many_requests(format!(
                    "Rate limit exceeded. Try again in {} seconds.",
                    retry_after.as_secs().max(1)
                ))),
            AppError::Internal(detail) => {
                // Log internal errors; the response stays opaque.
                tracing::error!("Internal error: {}", detail);
                HttpResponse::InternalServerError().json(ErrorResponse::internal_error())
            }
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Unauthorized => AppError::Unauthorized,
            DomainError::InvalidInput(msg) => AppError::BadRequest(msg),
            DomainError::RateLimited { retry_after } => AppError::TooManyRequests { retry_after },
            DomainError::NotFound { entity } => AppError::NotFound(entity.to_string()),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
