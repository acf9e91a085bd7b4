//! Authentication and authorization module
//!
//! Provides JWT-based authentication with argon2 password hashing,
//! plus the per-request ownership checks that gate identity-scoped
//! routes.

mod jwt;
mod middleware;
mod ownership;
mod password;

pub use jwt::{Claims, TokenService};
pub use middleware::AuthIdentity;
pub use ownership::{
    check_ownership, require_owned_measurement, require_owned_patient, require_role,
};
pub use password::PasswordService;
