//! Patient service: self-service profile operations and the doctor
//! roster view

use crate::auth::{require_owned_patient, require_role, AuthIdentity};
use crate::error::ApiError;
use crate::repositories::{PatientRepository, UpdatePatient};
use medtrack_shared::types::{PatientProfile, Role, RosterEntry, UpdatePatientRequest};
use medtrack_shared::validation;
use sqlx::PgPool;
use uuid::Uuid;

/// Patient service
pub struct PatientService;

impl PatientService {
    /// Get the caller's own profile
    pub async fn get_self(pool: &PgPool, identity: &AuthIdentity) -> Result<PatientProfile, ApiError> {
        require_role(identity, Role::Patient)?;

        let patient = PatientRepository::find_by_id(pool, identity.subject_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Patient not found".to_string()))?;

        Ok(PatientProfile {
            id: patient.id,
            full_name: patient.full_name,
            birth_date: patient.birth_date,
            birth_place: patient.birth_place,
            phone: patient.phone,
            doctor_id: patient.doctor_id,
        })
    }

    /// Update a patient profile; the ownership guard runs first
    pub async fn update(
        pool: &PgPool,
        identity: &AuthIdentity,
        patient_id: Uuid,
        req: UpdatePatientRequest,
    ) -> Result<PatientProfile, ApiError> {
        require_owned_patient(pool, identity, patient_id).await?;

        if let Some(name) = &req.full_name {
            validation::validate_full_name(name).map_err(ApiError::Validation)?;
        }
        if let Some(phone) = &req.phone {
            validation::validate_phone(phone).map_err(ApiError::Validation)?;
        }
        if let Some(place) = &req.birth_place {
            validation::validate_birth_place(place).map_err(ApiError::Validation)?;
        }
        if let Some(date) = req.birth_date {
            validation::validate_birth_date(date).map_err(ApiError::Validation)?;
        }

        let updated = PatientRepository::update(
            pool,
            patient_id,
            UpdatePatient {
                full_name: req.full_name,
                phone: req.phone,
                birth_place: req.birth_place,
                birth_date: req.birth_date,
            },
        )
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| ApiError::NotFound("Patient not found".to_string()))?;

        Ok(PatientProfile {
            id: updated.id,
            full_name: updated.full_name,
            birth_date: updated.birth_date,
            birth_place: updated.birth_place,
            phone: updated.phone,
            doctor_id: updated.doctor_id,
        })
    }

    /// Delete a patient profile, its measurements, and the account
    pub async fn delete(
        pool: &PgPool,
        identity: &AuthIdentity,
        patient_id: Uuid,
    ) -> Result<(), ApiError> {
        let patient = require_owned_patient(pool, identity, patient_id).await?;

        PatientRepository::delete_cascade(pool, patient.id, patient.account_id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(())
    }

    /// List the authenticated doctor's patients
    ///
    /// The filter is the doctor's own subject id; nothing from the
    /// request scopes this query.
    pub async fn roster(pool: &PgPool, identity: &AuthIdentity) -> Result<Vec<RosterEntry>, ApiError> {
        require_role(identity, Role::Doctor)?;

        let patients = PatientRepository::list_by_doctor(pool, identity.subject_id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(patients
            .into_iter()
            .map(|p| RosterEntry {
                id: p.id,
                full_name: p.full_name,
                birth_date: p.birth_date,
                birth_place: p.birth_place,
                phone: p.phone,
                email: p.email,
            })
            .collect())
    }
}
