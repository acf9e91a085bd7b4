//! Measurement repository for database operations

use anyhow::Result;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

/// Measurement record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MeasurementRecord {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub recorded_on: NaiveDate,
    pub blood_pressure: Option<i32>,
    pub pulse: Option<i32>,
    pub weight_kg: Option<f64>,
    pub blood_sugar: Option<f64>,
}

/// Measurement joined with the patient's display name, for the
/// doctor's aggregate view
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DoctorMeasurementRecord {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub patient_name: String,
    pub recorded_on: NaiveDate,
    pub blood_pressure: Option<i32>,
    pub pulse: Option<i32>,
    pub weight_kg: Option<f64>,
    pub blood_sugar: Option<f64>,
}

/// Fields for a new measurement
#[derive(Debug, Clone)]
pub struct NewMeasurement {
    pub recorded_on: NaiveDate,
    pub blood_pressure: Option<i32>,
    pub pulse: Option<i32>,
    pub weight_kg: Option<f64>,
    pub blood_sugar: Option<f64>,
}

/// Partial measurement update; None keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct UpdateMeasurement {
    pub recorded_on: Option<NaiveDate>,
    pub blood_pressure: Option<i32>,
    pub pulse: Option<i32>,
    pub weight_kg: Option<f64>,
    pub blood_sugar: Option<f64>,
}

/// Measurement repository for database operations
pub struct MeasurementRepository;

impl MeasurementRepository {
    /// Create a measurement owned by the given patient
    ///
    /// The owner always comes from the authenticated identity, never
    /// from request input.
    pub async fn create(
        pool: &PgPool,
        patient_id: Uuid,
        input: NewMeasurement,
    ) -> Result<MeasurementRecord> {
        let measurement = sqlx::query_as::<_, MeasurementRecord>(
            r#"
            INSERT INTO measurements (patient_id, recorded_on, blood_pressure, pulse, weight_kg, blood_sugar)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, patient_id, recorded_on, blood_pressure, pulse, weight_kg, blood_sugar
            "#,
        )
        .bind(patient_id)
        .bind(input.recorded_on)
        .bind(input.blood_pressure)
        .bind(input.pulse)
        .bind(input.weight_kg)
        .bind(input.blood_sugar)
        .fetch_one(pool)
        .await?;

        Ok(measurement)
    }

    /// Find measurement by id
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<MeasurementRecord>> {
        let measurement = sqlx::query_as::<_, MeasurementRecord>(
            r#"
            SELECT id, patient_id, recorded_on, blood_pressure, pulse, weight_kg, blood_sugar
            FROM measurements
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(measurement)
    }

    /// List a patient's measurements, newest first
    pub async fn list_for_patient(pool: &PgPool, patient_id: Uuid) -> Result<Vec<MeasurementRecord>> {
        let measurements = sqlx::query_as::<_, MeasurementRecord>(
            r#"
            SELECT id, patient_id, recorded_on, blood_pressure, pulse, weight_kg, blood_sugar
            FROM measurements
            WHERE patient_id = $1
            ORDER BY recorded_on DESC
            "#,
        )
        .bind(patient_id)
        .fetch_all(pool)
        .await?;

        Ok(measurements)
    }

    /// List all measurements across a doctor's patients, newest first,
    /// each carrying the patient's name
    ///
    /// Scoping happens server-side on the doctor's own id.
    pub async fn list_for_doctor(
        pool: &PgPool,
        doctor_id: Uuid,
    ) -> Result<Vec<DoctorMeasurementRecord>> {
        let measurements = sqlx::query_as::<_, DoctorMeasurementRecord>(
            r#"
            SELECT m.id, m.patient_id, p.full_name AS patient_name,
                   m.recorded_on, m.blood_pressure, m.pulse, m.weight_kg, m.blood_sugar
            FROM measurements m
            JOIN patients p ON p.id = m.patient_id
            WHERE p.doctor_id = $1
            ORDER BY m.recorded_on DESC
            "#,
        )
        .bind(doctor_id)
        .fetch_all(pool)
        .await?;

        Ok(measurements)
    }

    /// Update a measurement; absent fields keep their value
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        updates: UpdateMeasurement,
    ) -> Result<Option<MeasurementRecord>> {
        let measurement = sqlx::query_as::<_, MeasurementRecord>(
            r#"
            UPDATE measurements SET
                recorded_on = COALESCE($2, recorded_on),
                blood_pressure = COALESCE($3, blood_pressure),
                pulse = COALESCE($4, pulse),
                weight_kg = COALESCE($5, weight_kg),
                blood_sugar = COALESCE($6, blood_sugar)
            WHERE id = $1
            RETURNING id, patient_id, recorded_on, blood_pressure, pulse, weight_kg, blood_sugar
            "#,
        )
        .bind(id)
        .bind(updates.recorded_on)
        .bind(updates.blood_pressure)
        .bind(updates.pulse)
        .bind(updates.weight_kg)
        .bind(updates.blood_sugar)
        .fetch_optional(pool)
        .await?;

        Ok(measurement)
    }

    /// Delete a measurement by id
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM measurements WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }
}
