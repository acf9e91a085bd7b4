//! Patient repository for database operations
//!
//! Registration and deletion touch more than one table; both run in a
//! single transaction so an account can never exist without its
//! patient profile or vice versa.

use anyhow::Result;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

/// Patient record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PatientRecord {
    pub id: Uuid,
    pub account_id: Uuid,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub birth_place: String,
    pub phone: String,
    pub doctor_id: Uuid,
}

/// Patient joined with the account email, for a doctor's roster
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RosterRecord {
    pub id: Uuid,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub birth_place: String,
    pub phone: String,
    pub email: String,
}

/// Profile fields for a new patient registration
#[derive(Debug, Clone)]
pub struct NewPatient {
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub birth_place: String,
    pub phone: String,
    pub doctor_id: Uuid,
}

/// Partial profile update; None keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct UpdatePatient {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub birth_place: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

/// Patient repository for database operations
pub struct PatientRepository;

impl PatientRepository {
    /// Create a patient account: account row plus patient profile in
    /// one transaction
    pub async fn create_with_account(
        pool: &PgPool,
        email: &str,
        password_hash: &str,
        profile: NewPatient,
    ) -> Result<PatientRecord> {
        let mut tx = pool.begin().await?;

        let account_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO accounts (email, password_hash, role)
            VALUES ($1, $2, 'patient')
            RETURNING id
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await?;

        let patient = sqlx::query_as::<_, PatientRecord>(
            r#"
            INSERT INTO patients (account_id, full_name, birth_date, birth_place, phone, doctor_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, account_id, full_name, birth_date, birth_place, phone, doctor_id
            "#,
        )
        .bind(account_id)
        .bind(&profile.full_name)
        .bind(profile.birth_date)
        .bind(&profile.birth_place)
        .bind(&profile.phone)
        .bind(profile.doctor_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(patient)
    }

    /// Find patient by id
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<PatientRecord>> {
        let patient = sqlx::query_as::<_, PatientRecord>(
            r#"
            SELECT id, account_id, full_name, birth_date, birth_place, phone, doctor_id
            FROM patients
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(patient)
    }

    /// Find patient by owning account (subject resolution at login)
    pub async fn find_by_account_id(pool: &PgPool, account_id: Uuid) -> Result<Option<PatientRecord>> {
        let patient = sqlx::query_as::<_, PatientRecord>(
            r#"
            SELECT id, account_id, full_name, birth_date, birth_place, phone, doctor_id
            FROM patients
            WHERE account_id = $1
            "#,
        )
        .bind(account_id)
        .fetch_optional(pool)
        .await?;

        Ok(patient)
    }

    /// List a doctor's patients, joined with the account email
    ///
    /// Scoping is always by the authenticated doctor's id; no
    /// client-supplied id reaches this query.
    pub async fn list_by_doctor(pool: &PgPool, doctor_id: Uuid) -> Result<Vec<RosterRecord>> {
        let patients = sqlx::query_as::<_, RosterRecord>(
            r#"
            SELECT p.id, p.full_name, p.birth_date, p.birth_place, p.phone, a.email
            FROM patients p
            JOIN accounts a ON a.id = p.account_id
            WHERE p.doctor_id = $1
            ORDER BY p.full_name
            "#,
        )
        .bind(doctor_id)
        .fetch_all(pool)
        .await?;

        Ok(patients)
    }

    /// Update a patient profile; absent fields keep their value
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        updates: UpdatePatient,
    ) -> Result<Option<PatientRecord>> {
        let patient = sqlx::query_as::<_, PatientRecord>(
            r#"
            UPDATE patients SET
                full_name = COALESCE($2, full_name),
                phone = COALESCE($3, phone),
                birth_place = COALESCE($4, birth_place),
                birth_date = COALESCE($5, birth_date)
            WHERE id = $1
            RETURNING id, account_id, full_name, birth_date, birth_place, phone, doctor_id
            "#,
        )
        .bind(id)
        .bind(updates.full_name)
        .bind(updates.phone)
        .bind(updates.birth_place)
        .bind(updates.birth_date)
        .fetch_optional(pool)
        .await?;

        Ok(patient)
    }

    /// Delete a patient and everything that hangs off it:
    /// measurements, the profile, and the account, in one transaction
    pub async fn delete_cascade(pool: &PgPool, id: Uuid, account_id: Uuid) -> Result<()> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM measurements WHERE patient_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM patients WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(account_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}
