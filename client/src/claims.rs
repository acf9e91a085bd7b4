//! Local token payload decoding
//!
//! After login the client peeks at the token payload to decide which
//! data-loading calls to issue (doctor aggregate vs patient self).
//! The signature is NOT checked and expiry is ignored: this is a hint
//! for UI branching only, never an enforcement point. The server
//! re-derives role and ownership on every request regardless of what
//! the client believes.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use medtrack_shared::types::Role;
use serde::Deserialize;
use uuid::Uuid;

/// Non-authoritative view of a token's payload
#[derive(Debug, Clone, Deserialize)]
pub struct TokenHint {
    pub sub: String,
    pub role: Role,
    pub exp: i64,
}

impl TokenHint {
    /// Subject id, if the payload carries a well-formed one
    pub fn subject_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}

/// Decode a token's payload without verifying its signature
///
/// Returns None for anything that is not a structurally valid JWT.
/// Do not make authorization decisions from the result.
pub fn decode_role_hint(token: &str) -> Option<TokenHint> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;

    decode::<TokenHint>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestClaims {
        sub: String,
        role: Role,
        exp: i64,
        iat: i64,
    }

    fn make_token(role: Role, secret: &str) -> String {
        let claims = TestClaims {
            sub: Uuid::new_v4().to_string(),
            role,
            exp: chrono::Utc::now().timestamp() + 3600,
            iat: chrono::Utc::now().timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_decodes_role_without_knowing_the_secret() {
        // The client never holds the server secret; the payload is
        // still readable
        let token = make_token(Role::Doctor, "server-only-secret");
        let hint = decode_role_hint(&token).unwrap();

        assert_eq!(hint.role, Role::Doctor);
        assert!(hint.subject_id().is_some());
    }

    #[test]
    fn test_patient_role_decoded() {
        let token = make_token(Role::Patient, "another-secret");
        let hint = decode_role_hint(&token).unwrap();
        assert_eq!(hint.role, Role::Patient);
    }

    #[test]
    fn test_expired_token_still_decodes() {
        // Expiry is a server concern; the hint ignores it
        let claims = TestClaims {
            sub: Uuid::new_v4().to_string(),
            role: Role::Patient,
            exp: chrono::Utc::now().timestamp() - 7200,
            iat: chrono::Utc::now().timestamp() - 10800,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        assert!(decode_role_hint(&token).is_some());
    }

    #[test]
    fn test_garbage_yields_none() {
        assert!(decode_role_hint("").is_none());
        assert!(decode_role_hint("not-a-jwt").is_none());
        assert!(decode_role_hint("a.b.c").is_none());
    }
}
