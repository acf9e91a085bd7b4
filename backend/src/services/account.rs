//! Account service: credential verification and token issuance
//!
//! Registration creates the account and the patient profile in one
//! transaction. Login resolves the role-record id (patient or doctor
//! profile) after the password check; that id, not the account id,
//! becomes the token subject.

use crate::auth::{PasswordService, TokenService};
use crate::error::ApiError;
use crate::repositories::{
    AccountRepository, DoctorRepository, NewPatient, PatientRepository,
};
use medtrack_shared::errors::CredentialError;
use medtrack_shared::types::{RegisterRequest, Role, TokenResponse};
use medtrack_shared::validation;
use sqlx::PgPool;

/// Account service for authentication operations
pub struct AccountService;

impl AccountService {
    /// Register a new patient account
    ///
    /// Doctor accounts are provisioned out of band; this endpoint only
    /// ever creates patients. Password hashing runs on the blocking
    /// thread pool.
    pub async fn register(pool: &PgPool, req: &RegisterRequest) -> Result<(), ApiError> {
        validation::validate_email(&req.email).map_err(ApiError::Validation)?;
        validation::validate_password(&req.password).map_err(ApiError::Validation)?;
        validation::validate_full_name(&req.full_name).map_err(ApiError::Validation)?;
        validation::validate_phone(&req.phone).map_err(ApiError::Validation)?;
        validation::validate_birth_date(req.birth_date).map_err(ApiError::Validation)?;
        validation::validate_birth_place(&req.birth_place).map_err(ApiError::Validation)?;

        // Email uniqueness is checked before any identity is issued;
        // the unique index backs this up against races
        if AccountRepository::email_exists(pool, &req.email)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(CredentialError::AlreadyRegistered.into());
        }

        // The chosen doctor must exist before we create anything
        DoctorRepository::find_by_id(pool, req.doctor_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Validation("Unknown doctor".to_string()))?;

        let password_hash = PasswordService::hash_async(req.password.clone())
            .await
            .map_err(ApiError::Internal)?;

        PatientRepository::create_with_account(
            pool,
            &req.email,
            &password_hash,
            NewPatient {
                full_name: req.full_name.clone(),
                birth_date: req.birth_date,
                birth_place: req.birth_place.clone(),
                phone: req.phone.clone(),
                doctor_id: req.doctor_id,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        Ok(())
    }

    /// Verify credentials and issue a signed token
    ///
    /// Unknown email and wrong password keep distinct messages (both
    /// 400). Password verification runs on the blocking thread pool.
    pub async fn login(
        pool: &PgPool,
        tokens: &TokenService,
        email: &str,
        password: &str,
    ) -> Result<TokenResponse, ApiError> {
        let account = AccountRepository::find_by_email(pool, email)
            .await
            .map_err(ApiError::Internal)?
            .ok_or(CredentialError::UnknownAccount)?;

        let valid = PasswordService::verify_async(password.to_string(), account.password_hash.clone())
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            return Err(CredentialError::WrongPassword.into());
        }

        let role: Role = account
            .role
            .parse()
            .map_err(|e: String| ApiError::Internal(anyhow::anyhow!(e)))?;

        // Resolve the role-record id; this is the token subject
        let subject_id = match role {
            Role::Patient => PatientRepository::find_by_account_id(pool, account.id)
                .await
                .map_err(ApiError::Internal)?
                .map(|p| p.id),
            Role::Doctor => DoctorRepository::find_by_account_id(pool, account.id)
                .await
                .map_err(ApiError::Internal)?
                .map(|d| d.id),
        }
        .ok_or_else(|| {
            ApiError::Internal(anyhow::anyhow!(
                "Account {} has no {} record",
                account.id,
                role
            ))
        })?;

        let token = tokens.issue(subject_id, role).map_err(ApiError::Internal)?;

        Ok(TokenResponse { token })
    }
}
