//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting internal errors to appropriate HTTP responses.
//!
//! Authentication and authorization failures short-circuit the request:
//! once a handler or extractor returns one of these, no business logic
//! runs. Internal errors keep their diagnostic detail in the logs only.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use medtrack_shared::errors::{AccessError, AuthError, CredentialError};
use medtrack_shared::types::ErrorBody;
use thiserror::Error;
use tracing::error;

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Email is already registered")]
    AlreadyRegistered,

    #[error("No account exists for that email")]
    UnknownAccount,

    #[error("Wrong password")]
    WrongPassword,

    #[error("Missing token")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Forbidden")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken => ApiError::MissingToken,
            AuthError::InvalidToken => ApiError::InvalidToken,
        }
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Forbidden => ApiError::Forbidden,
            AccessError::NotFound => ApiError::NotFound("Resource not found".to_string()),
        }
    }
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::AlreadyRegistered => ApiError::AlreadyRegistered,
            CredentialError::UnknownAccount => ApiError::UnknownAccount,
            CredentialError::WrongPassword => ApiError::WrongPassword,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::AlreadyRegistered => (
                StatusCode::BAD_REQUEST,
                "Email is already registered".to_string(),
            ),
            // The two login failures stay textually distinct on purpose;
            // collapsing them is a contract change, not a cleanup.
            ApiError::UnknownAccount => (
                StatusCode::BAD_REQUEST,
                "No account exists for that email".to_string(),
            ),
            ApiError::WrongPassword => (StatusCode::BAD_REQUEST, "Wrong password".to_string()),
            ApiError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "Missing authentication token".to_string(),
            ),
            ApiError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Invalid or expired token".to_string(),
            ),
            ApiError::Forbidden => (
                StatusCode::FORBIDDEN,
                "You do not have access to this resource".to_string(),
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
            ApiError::Database(err) => {
                error!("Database error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
