//! Doctor service: public listing for the registration picker

use crate::error::ApiError;
use crate::repositories::DoctorRepository;
use medtrack_shared::types::DoctorSummary;
use sqlx::PgPool;

/// Doctor service
pub struct DoctorService;

impl DoctorService {
    /// List all doctors (id and name only)
    ///
    /// Unauthenticated: the registration form needs this before any
    /// account exists.
    pub async fn list(pool: &PgPool) -> Result<Vec<DoctorSummary>, ApiError> {
        let doctors = DoctorRepository::list(pool)
            .await
            .map_err(ApiError::Internal)?;

        Ok(doctors
            .into_iter()
            .map(|d| DoctorSummary {
                id: d.id,
                full_name: d.full_name,
            })
            .collect())
    }
}
