//! Doctor routes

use crate::error::ApiResult;
use crate::services::DoctorService;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use medtrack_shared::types::DoctorSummary;

/// Create doctor routes
pub fn doctor_routes() -> Router<AppState> {
    Router::new().route("/", get(list))
}

/// GET /api/doctors - public list for the registration form
async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<DoctorSummary>>> {
    let doctors = DoctorService::list(&state.db).await?;
    Ok(Json(doctors))
}
