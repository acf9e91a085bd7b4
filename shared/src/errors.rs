//! Error types for the MedTrack application

use thiserror::Error;

/// Credential verification error types
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Email is already registered")]
    AlreadyRegistered,

    #[error("No account exists for that email")]
    UnknownAccount,

    #[error("Wrong password")]
    WrongPassword,
}

/// Authentication error types
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing token")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,
}

/// Authorization error types
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AccessError {
    #[error("Not the owner of this resource")]
    Forbidden,

    #[error("Resource not found")]
    NotFound,
}
