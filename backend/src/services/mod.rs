//! Business logic services
//!
//! Services encapsulate business logic and coordinate between the
//! auth layer and the repositories.

pub mod account;
pub mod doctor;
pub mod measurement;
pub mod patient;

pub use account::AccountService;
pub use doctor::DoctorService;
pub use measurement::MeasurementService;
pub use patient::PatientService;
