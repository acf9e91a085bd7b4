//! API request and response types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Role of an authenticated identity.
///
/// Serialized in lowercase both in JSON bodies and in token claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Doctor,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Patient => write!(f, "patient"),
            Role::Doctor => write!(f, "doctor"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "patient" => Ok(Role::Patient),
            "doctor" => Ok(Role::Doctor),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token response returned by a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Registration request (account + patient profile fields)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub birth_date: NaiveDate,
    pub birth_place: String,
    pub phone: String,
    pub doctor_id: Uuid,
}

/// Simple confirmation message body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Flat error envelope used by every failure response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Doctor entry for the public registration picker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorSummary {
    pub id: Uuid,
    pub full_name: String,
}

/// Patient profile (self-service view)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientProfile {
    pub id: Uuid,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub birth_place: String,
    pub phone: String,
    pub doctor_id: Uuid,
}

/// Patient entry in a doctor's roster, joined with the account email
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: Uuid,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub birth_place: String,
    pub phone: String,
    pub email: String,
}

/// Partial patient profile update; absent fields keep their value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePatientRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
}

/// New measurement request; the owning patient comes from the token,
/// never from the body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMeasurementRequest {
    pub recorded_on: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pulse: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_sugar: Option<f64>,
}

/// Partial measurement update; absent fields keep their value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMeasurementRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pulse: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_sugar: Option<f64>,
}

/// Measurement as returned to its owning patient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementResponse {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub recorded_on: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pulse: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_sugar: Option<f64>,
}

/// Measurement row in the doctor's aggregate view, carrying the
/// patient's display name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorMeasurement {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub patient_name: String,
    pub recorded_on: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pulse: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_sugar: Option<f64>,
}
