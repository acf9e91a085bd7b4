//! Doctor repository for database operations
//!
//! Doctor accounts are provisioned out of band (seed data or an admin
//! process); there is no registration path for them.

use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

/// Doctor record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DoctorRecord {
    pub id: Uuid,
    pub account_id: Uuid,
    pub full_name: String,
}

/// Doctor repository for database operations
pub struct DoctorRepository;

impl DoctorRepository {
    /// List all doctors (id and display name only, for the
    /// registration picker)
    pub async fn list(pool: &PgPool) -> Result<Vec<DoctorRecord>> {
        let doctors = sqlx::query_as::<_, DoctorRecord>(
            r#"
            SELECT id, account_id, full_name
            FROM doctors
            ORDER BY full_name
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(doctors)
    }

    /// Find doctor by id
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<DoctorRecord>> {
        let doctor = sqlx::query_as::<_, DoctorRecord>(
            r#"
            SELECT id, account_id, full_name
            FROM doctors
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(doctor)
    }

    /// Find doctor by owning account (subject resolution at login)
    pub async fn find_by_account_id(pool: &PgPool, account_id: Uuid) -> Result<Option<DoctorRecord>> {
        let doctor = sqlx::query_as::<_, DoctorRecord>(
            r#"
            SELECT id, account_id, full_name
            FROM doctors
            WHERE account_id = $1
            "#,
        )
        .bind(account_id)
        .fetch_optional(pool)
        .await?;

        Ok(doctor)
    }
}
