//! MedTrack Shared Library
//!
//! This crate contains the types, error taxonomy, and validation helpers
//! shared between the backend and the client session layer.

pub mod errors;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
