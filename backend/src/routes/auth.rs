//! Authentication routes
//!
//! Registration and login. Both are public; everything else in the
//! API sits behind the bearer-token extractor.

use crate::error::ApiResult;
use crate::services::AccountService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use medtrack_shared::types::{LoginRequest, MessageResponse, RegisterRequest, TokenResponse};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new patient account
///
/// POST /api/auth/register
///
/// 201 on success; 400 when the email is taken or a field fails
/// validation. Password hashing is offloaded to the blocking pool.
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    AccountService::register(&state.db, &req).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Patient registered successfully".to_string(),
        }),
    ))
}

/// Login with email and password
///
/// POST /api/auth/login
///
/// 200 with `{token}` on success; 400 with a distinct message for
/// unknown email vs wrong password; 500 on unexpected failure.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let response = AccountService::login(&state.db, state.tokens(), &req.email, &req.password).await?;
    Ok(Json(response))
}
