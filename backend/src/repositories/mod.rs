//! Database repositories
//!
//! Provides the data access layer for accounts, role profiles, and
//! measurements.

pub mod account;
pub mod doctor;
pub mod measurement;
pub mod patient;

pub use account::{AccountRecord, AccountRepository};
pub use doctor::{DoctorRecord, DoctorRepository};
pub use measurement::{
    DoctorMeasurementRecord, MeasurementRecord, MeasurementRepository, NewMeasurement,
    UpdateMeasurement,
};
pub use patient::{NewPatient, PatientRecord, PatientRepository, RosterRecord, UpdatePatient};
