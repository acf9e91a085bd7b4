//! Measurement routes
//!
//! Patient self-service CRUD plus the doctor's aggregate read view.
//! Mutations pass the transitive ownership guard (the measurement's
//! patient, not the measurement id, is what gets compared).

use crate::auth::AuthIdentity;
use crate::error::ApiResult;
use crate::services::MeasurementService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use medtrack_shared::types::{
    DoctorMeasurement, MeasurementResponse, MessageResponse, NewMeasurementRequest,
    UpdateMeasurementRequest,
};
use uuid::Uuid;

/// Create measurement routes
pub fn measurement_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_own).post(create))
        .route("/doctor", get(doctor_view))
        .route("/:id", axum::routing::put(update).delete(delete))
}

/// GET /api/measurements - the caller's own measurements, newest first
async fn list_own(
    State(state): State<AppState>,
    identity: AuthIdentity,
) -> ApiResult<Json<Vec<MeasurementResponse>>> {
    let measurements = MeasurementService::list_own(&state.db, &identity).await?;
    Ok(Json(measurements))
}

/// POST /api/measurements - create a measurement for the caller
///
/// The owning patient is the token subject; the body cannot override it.
async fn create(
    State(state): State<AppState>,
    identity: AuthIdentity,
    Json(req): Json<NewMeasurementRequest>,
) -> ApiResult<(StatusCode, Json<MeasurementResponse>)> {
    let measurement = MeasurementService::create(&state.db, &identity, req).await?;
    Ok((StatusCode::CREATED, Json(measurement)))
}

/// GET /api/measurements/doctor - aggregate view across the doctor's
/// patients, scoped server-side by the doctor's subject id
async fn doctor_view(
    State(state): State<AppState>,
    identity: AuthIdentity,
) -> ApiResult<Json<Vec<DoctorMeasurement>>> {
    let measurements = MeasurementService::doctor_view(&state.db, &identity).await?;
    Ok(Json(measurements))
}

/// PUT /api/measurements/:id - update an owned measurement
async fn update(
    State(state): State<AppState>,
    identity: AuthIdentity,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateMeasurementRequest>,
) -> ApiResult<Json<MeasurementResponse>> {
    let measurement = MeasurementService::update(&state.db, &identity, id, req).await?;
    Ok(Json(measurement))
}

/// DELETE /api/measurements/:id - delete an owned measurement
async fn delete(
    State(state): State<AppState>,
    identity: AuthIdentity,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    MeasurementService::delete(&state.db, &identity, id).await?;
    Ok(Json(MessageResponse {
        message: "Measurement deleted".to_string(),
    }))
}
