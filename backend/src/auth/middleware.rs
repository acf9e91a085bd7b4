//! Token validation middleware
//!
//! Authenticates every protected request by verifying the bearer
//! token's signature and expiry, then attaches the role-scoped
//! identity to the request. Ownership checks live in
//! [`super::ownership`], not here.
//!
//! The check is pure and synchronous; it never touches storage. A
//! missing header and an invalid token produce distinct 401 messages,
//! but nothing finer: expired, malformed, and badly-signed tokens are
//! indistinguishable to the caller.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts},
};
use medtrack_shared::errors::AuthError;
use medtrack_shared::types::Role;
use uuid::Uuid;

/// Authenticated role-scoped identity extracted from a bearer token
///
/// The subject id is the patient or doctor record id embedded at
/// login, never the account id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthIdentity {
    pub subject_id: Uuid,
    pub role: Role,
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthIdentity
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        // No Authorization header at all is its own failure mode
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::MissingToken)
            .map_err(ApiError::from)?;

        // A header without the Bearer prefix is treated as a malformed
        // token; verification below will reject it
        let token = auth_header.strip_prefix("Bearer ").unwrap_or(auth_header);

        let claims = app_state.tokens().verify(token).map_err(ApiError::from)?;

        // A subject that is not a UUID cannot name any record
        let subject_id =
            Uuid::parse_str(&claims.sub).map_err(|_| ApiError::from(AuthError::InvalidToken))?;

        Ok(AuthIdentity {
            subject_id,
            role: claims.role,
        })
    }
}
