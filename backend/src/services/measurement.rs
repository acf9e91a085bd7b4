//! Measurement service: patient self-service CRUD and the doctor's
//! aggregate read view

use crate::auth::{require_owned_measurement, require_role, AuthIdentity};
use crate::error::ApiError;
use crate::repositories::{
    MeasurementRecord, MeasurementRepository, NewMeasurement, PatientRepository, UpdateMeasurement,
};
use medtrack_shared::types::{
    DoctorMeasurement, MeasurementResponse, NewMeasurementRequest, Role, UpdateMeasurementRequest,
};
use sqlx::PgPool;
use uuid::Uuid;

fn to_response(m: MeasurementRecord) -> MeasurementResponse {
    MeasurementResponse {
        id: m.id,
        patient_id: m.patient_id,
        recorded_on: m.recorded_on,
        blood_pressure: m.blood_pressure,
        pulse: m.pulse,
        weight_kg: m.weight_kg,
        blood_sugar: m.blood_sugar,
    }
}

/// Measurement service
pub struct MeasurementService;

impl MeasurementService {
    /// List the caller's own measurements, newest first
    pub async fn list_own(
        pool: &PgPool,
        identity: &AuthIdentity,
    ) -> Result<Vec<MeasurementResponse>, ApiError> {
        require_role(identity, Role::Patient)?;

        // The patient record must still exist; a deleted profile with
        // a live token reads as NotFound
        PatientRepository::find_by_id(pool, identity.subject_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Patient not found".to_string()))?;

        let measurements = MeasurementRepository::list_for_patient(pool, identity.subject_id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(measurements.into_iter().map(to_response).collect())
    }

    /// Create a measurement owned by the caller
    ///
    /// The owner is the token's subject id; the body cannot name a
    /// different patient.
    pub async fn create(
        pool: &PgPool,
        identity: &AuthIdentity,
        req: NewMeasurementRequest,
    ) -> Result<MeasurementResponse, ApiError> {
        require_role(identity, Role::Patient)?;

        PatientRepository::find_by_id(pool, identity.subject_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Patient not found".to_string()))?;

        let measurement = MeasurementRepository::create(
            pool,
            identity.subject_id,
            NewMeasurement {
                recorded_on: req.recorded_on,
                blood_pressure: req.blood_pressure,
                pulse: req.pulse,
                weight_kg: req.weight_kg,
                blood_sugar: req.blood_sugar,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        Ok(to_response(measurement))
    }

    /// Update a measurement; transitive ownership is checked first
    pub async fn update(
        pool: &PgPool,
        identity: &AuthIdentity,
        measurement_id: Uuid,
        req: UpdateMeasurementRequest,
    ) -> Result<MeasurementResponse, ApiError> {
        require_owned_measurement(pool, identity, measurement_id).await?;

        let updated = MeasurementRepository::update(
            pool,
            measurement_id,
            UpdateMeasurement {
                recorded_on: req.recorded_on,
                blood_pressure: req.blood_pressure,
                pulse: req.pulse,
                weight_kg: req.weight_kg,
                blood_sugar: req.blood_sugar,
            },
        )
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| ApiError::NotFound("Measurement not found".to_string()))?;

        Ok(to_response(updated))
    }

    /// Delete a measurement; transitive ownership is checked first
    pub async fn delete(
        pool: &PgPool,
        identity: &AuthIdentity,
        measurement_id: Uuid,
    ) -> Result<(), ApiError> {
        require_owned_measurement(pool, identity, measurement_id).await?;

        MeasurementRepository::delete(pool, measurement_id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(())
    }

    /// Aggregate read across the authenticated doctor's patients
    pub async fn doctor_view(
        pool: &PgPool,
        identity: &AuthIdentity,
    ) -> Result<Vec<DoctorMeasurement>, ApiError> {
        require_role(identity, Role::Doctor)?;

        let measurements = MeasurementRepository::list_for_doctor(pool, identity.subject_id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(measurements
            .into_iter()
            .map(|m| DoctorMeasurement {
                id: m.id,
                patient_id: m.patient_id,
                patient_name: m.patient_name,
                recorded_on: m.recorded_on,
                blood_pressure: m.blood_pressure,
                pulse: m.pulse,
                weight_kg: m.weight_kg,
                blood_sugar: m.blood_sugar,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    // Guard ordering is covered in auth::ownership; storage paths need
    // a live database.
}
