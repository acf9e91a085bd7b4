//! JWT token issuance and validation
//!
//! Provides signed, expiring tokens with pre-computed keys for
//! efficient per-request verification.
//!
//! Tokens embed the role-record id (a patient or doctor profile id),
//! never the account id. They are held client-side only; the server
//! keeps no session state.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use medtrack_shared::errors::AuthError;
use medtrack_shared::types::Role;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// JWT claims
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the role-record id (patient or doctor profile)
    pub sub: String,
    /// Role of the subject
    pub role: Role,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Pre-computed JWT keys for efficient token operations
/// These are expensive to create, so we cache them in AppState
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    /// Create new JWT keys from the server secret, once at startup
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }

    pub fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

/// Token service for issuing and verifying signed identity tokens
///
/// Uses pre-computed HMAC keys to avoid key derivation on every
/// request. Keys are wrapped in Arc for cheap cloning.
#[derive(Clone)]
pub struct TokenService {
    keys: JwtKeys,
    expiry_secs: i64,
}

impl TokenService {
    /// Create a new token service with pre-computed keys
    ///
    /// Call once at application startup and store in AppState.
    pub fn new(secret: &str, expiry_secs: i64) -> Self {
        Self {
            keys: JwtKeys::new(secret),
            expiry_secs,
        }
    }

    /// Issue a signed token for a role-scoped identity
    ///
    /// The subject is the role-record id resolved at login, not the
    /// account id. No refresh token exists; after expiry the caller
    /// must log in again.
    pub fn issue(&self, subject_id: Uuid, role: Role) -> anyhow::Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.expiry_secs);

        let claims = Claims {
            sub: subject_id.to_string(),
            role,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, self.keys.encoding())
            .map_err(|e| anyhow::anyhow!("Failed to issue token: {}", e))
    }

    /// Verify a token's signature and expiry and return its claims
    ///
    /// Expired, malformed, and badly-signed tokens all collapse into
    /// `InvalidToken`; callers get no finer detail. This check is pure
    /// and never touches storage.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, self.keys.decoding(), &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidToken)
    }

    /// Token lifetime in seconds
    #[inline]
    pub fn expiry_secs(&self) -> i64 {
        self.expiry_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> TokenService {
        TokenService::new("test-secret", 3600)
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let service = create_test_service();
        let subject_id = Uuid::new_v4();

        let token = service.issue(subject_id, Role::Patient).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.sub, subject_id.to_string());
        assert_eq!(claims.role, Role::Patient);
    }

    #[test]
    fn test_doctor_role_preserved() {
        let service = create_test_service();
        let subject_id = Uuid::new_v4();

        let token = service.issue(subject_id, Role::Doctor).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.role, Role::Doctor);
    }

    #[test]
    fn test_token_has_three_segments() {
        let service = create_test_service();
        let token = service.issue(Uuid::new_v4(), Role::Patient).unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_expired_token_rejected() {
        // Validation::default() allows 60s of leeway, so back-date well past it
        let service = TokenService::new("test-secret", -300);
        let token = service.issue(Uuid::new_v4(), Role::Patient).unwrap();

        assert_eq!(service.verify(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service = create_test_service();
        let other = TokenService::new("another-secret", 3600);

        let token = other.issue(Uuid::new_v4(), Role::Patient).unwrap();
        assert_eq!(service.verify(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let service = create_test_service();
        let token = service.issue(Uuid::new_v4(), Role::Patient).unwrap();

        // Flip a character in the payload segment; the signature no
        // longer matches
        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        let mut payload = parts[1].clone().into_bytes();
        payload[0] = if payload[0] == b'A' { b'B' } else { b'A' };
        parts[1] = String::from_utf8(payload).unwrap();
        let tampered = parts.join(".");

        assert_eq!(service.verify(&tampered), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = create_test_service();
        assert_eq!(service.verify("not.a.token"), Err(AuthError::InvalidToken));
        assert_eq!(service.verify(""), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_service_is_clone_cheap() {
        let service = create_test_service();
        let _cloned = service.clone(); // Should be cheap due to Arc
    }
}
