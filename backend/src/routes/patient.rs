//! Patient routes
//!
//! Self-service profile operations plus the doctor's roster view.
//! Every handler takes `AuthIdentity`, so a missing or invalid token
//! is rejected before any of this code runs.

use crate::auth::AuthIdentity;
use crate::error::ApiResult;
use crate::services::PatientService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use medtrack_shared::types::{MessageResponse, PatientProfile, RosterEntry, UpdatePatientRequest};
use uuid::Uuid;

/// Create patient routes
pub fn patient_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_self))
        .route("/doctor", get(roster))
        .route("/:id", axum::routing::put(update).delete(delete))
}

/// GET /api/patients/me - the caller's own profile
async fn get_self(
    State(state): State<AppState>,
    identity: AuthIdentity,
) -> ApiResult<Json<PatientProfile>> {
    let profile = PatientService::get_self(&state.db, &identity).await?;
    Ok(Json(profile))
}

/// GET /api/patients/doctor - the authenticated doctor's patients
///
/// Scoped server-side by the doctor's subject id.
async fn roster(
    State(state): State<AppState>,
    identity: AuthIdentity,
) -> ApiResult<Json<Vec<RosterEntry>>> {
    let patients = PatientService::roster(&state.db, &identity).await?;
    Ok(Json(patients))
}

/// PUT /api/patients/:id - update own profile
///
/// 404 if the patient does not exist, 403 if it belongs to someone
/// else, in that order.
async fn update(
    State(state): State<AppState>,
    identity: AuthIdentity,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePatientRequest>,
) -> ApiResult<Json<PatientProfile>> {
    let profile = PatientService::update(&state.db, &identity, id, req).await?;
    Ok(Json(profile))
}

/// DELETE /api/patients/:id - delete own profile
///
/// Cascades: measurements, then the profile, then the account.
async fn delete(
    State(state): State<AppState>,
    identity: AuthIdentity,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    PatientService::delete(&state.db, &identity, id).await?;
    Ok(Json(MessageResponse {
        message: "Patient deleted".to_string(),
    }))
}
