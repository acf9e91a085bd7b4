//! Ownership guard
//!
//! Per-route authorization checks that run after token validation and
//! before any handler logic. The rules:
//!
//! - A mutation on a patient-owned resource succeeds only if the
//!   resource's owner id equals the token's subject id.
//! - Measurement ownership is transitive: the loaded measurement's
//!   `patient_id` is compared, not the measurement's own id.
//! - Existence is checked before ownership: a missing resource is 404
//!   regardless of who asks; an ownership mismatch on a real resource
//!   is 403. The two failure modes stay distinguishable.
//! - Doctors only ever read, via server-side filters on their own id;
//!   they can never pass an ownership check for a mutation. The role
//!   gate runs before the lookup, so a doctor addressing even a
//!   nonexistent resource gets 403; the existence-first ordering
//!   applies within the patient role.
//!
//! Lookups here are awaited to completion (or failure) before the
//! protected handler runs; nothing executes speculatively.

use crate::auth::AuthIdentity;
use crate::error::{ApiError, ApiResult};
use crate::repositories::{
    MeasurementRecord, MeasurementRepository, PatientRecord, PatientRepository,
};
use medtrack_shared::errors::AccessError;
use medtrack_shared::types::Role;
use sqlx::PgPool;
use uuid::Uuid;

/// Require the caller to hold a specific role
pub fn require_role(identity: &AuthIdentity, role: Role) -> Result<(), AccessError> {
    if identity.role == role {
        Ok(())
    } else {
        Err(AccessError::Forbidden)
    }
}

/// Core ownership decision: existence first, then owner comparison
///
/// `owner_id` is None when the addressed resource does not exist.
pub fn check_ownership(owner_id: Option<Uuid>, subject_id: Uuid) -> Result<(), AccessError> {
    match owner_id {
        None => Err(AccessError::NotFound),
        Some(owner) if owner != subject_id => Err(AccessError::Forbidden),
        Some(_) => Ok(()),
    }
}

/// Load a patient record the caller is allowed to mutate
///
/// The caller must be a patient and must be the addressed patient.
pub async fn require_owned_patient(
    pool: &PgPool,
    identity: &AuthIdentity,
    patient_id: Uuid,
) -> ApiResult<PatientRecord> {
    require_role(identity, Role::Patient)?;

    let patient = PatientRepository::find_by_id(pool, patient_id)
        .await
        .map_err(ApiError::Internal)?;

    check_ownership(patient.as_ref().map(|p| p.id), identity.subject_id)
        .map_err(|e| not_found_as(e, "Patient not found"))?;

    // check_ownership only passes when the record exists
    patient.ok_or_else(|| ApiError::NotFound("Patient not found".to_string()))
}

/// Load a measurement the caller is allowed to mutate
///
/// Ownership is transitive through the measurement's patient.
pub async fn require_owned_measurement(
    pool: &PgPool,
    identity: &AuthIdentity,
    measurement_id: Uuid,
) -> ApiResult<MeasurementRecord> {
    require_role(identity, Role::Patient)?;

    let measurement = MeasurementRepository::find_by_id(pool, measurement_id)
        .await
        .map_err(ApiError::Internal)?;

    check_ownership(
        measurement.as_ref().map(|m| m.patient_id),
        identity.subject_id,
    )
    .map_err(|e| not_found_as(e, "Measurement not found"))?;

    measurement.ok_or_else(|| ApiError::NotFound("Measurement not found".to_string()))
}

fn not_found_as(err: AccessError, message: &str) -> ApiError {
    match err {
        AccessError::NotFound => ApiError::NotFound(message.to_string()),
        other => other.into(),
    }
}
