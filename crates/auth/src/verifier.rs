//! Bearer token verification.
//!
//! The router only depends on the [`TokenVerifier`] trait, so swapping the
//! shipped HS256 verifier for a JWKS-backed one (remote identity provider)
//! is a wiring change, not a routing change.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use thiserror::Error;

use crate::claims::{validate_claims, IdentityClaims, TokenValidationError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The token could not be decoded or its signature did not verify.
    #[error("malformed or unverifiable token")]
    Malformed,

    /// The token decoded but its claims are outside the validity window.
    #[error(transparent)]
    Claims(#[from] TokenValidationError),
}

/// Verify a bearer token and extract identity claims.
///
/// Pure function of the token and the supplied clock; verification failures
/// are terminal for the request.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<IdentityClaims, TokenError>;
}

/// HS256 shared-secret verifier.
pub struct Hs256TokenVerifier {
    decoding_key: DecodingKey,
}

impl Hs256TokenVerifier {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret),
        }
    }
}

impl TokenVerifier for Hs256TokenVerifier {
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<IdentityClaims, TokenError> {
        // Time-window checks are done by `validate_claims` against the caller's
        // `now`, so the library's own exp handling is disabled.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = jsonwebtoken::decode::<IdentityClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                tracing::debug!("token rejected: {e}");
                TokenError::Malformed
            })?;

        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use jsonwebtoken::{EncodingKey, Header};

    const SECRET: &[u8] = b"test-secret";

    fn mint(secret: &[u8], issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> String {
        let claims = IdentityClaims {
            sub: "uid-1".to_string(),
            email: "donor@example.com".to_string(),
            issued_at,
            expires_at,
        };
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret),
        )
        .expect("failed to encode jwt")
    }

    #[test]
    fn verifies_valid_token() {
        let now = Utc::now();
        let token = mint(SECRET, now - Duration::minutes(1), now + Duration::minutes(10));

        let verifier = Hs256TokenVerifier::new(SECRET);
        let claims = verifier.verify(&token, now).expect("valid token");
        assert_eq!(claims.email, "donor@example.com");
        assert_eq!(claims.sub, "uid-1");
    }

    #[test]
    fn rejects_token_signed_with_wrong_secret() {
        let now = Utc::now();
        let token = mint(b"other-secret", now, now + Duration::minutes(10));

        let verifier = Hs256TokenVerifier::new(SECRET);
        assert_eq!(verifier.verify(&token, now), Err(TokenError::Malformed));
    }

    #[test]
    fn rejects_expired_token() {
        let now = Utc::now();
        let token = mint(SECRET, now - Duration::hours(2), now - Duration::hours(1));

        let verifier = Hs256TokenVerifier::new(SECRET);
        assert_eq!(
            verifier.verify(&token, now),
            Err(TokenError::Claims(TokenValidationError::Expired))
        );
    }

    #[test]
    fn rejects_garbage() {
        let verifier = Hs256TokenVerifier::new(SECRET);
        assert_eq!(
            verifier.verify("not.a.jwt", Utc::now()),
            Err(TokenError::Malformed)
        );
    }
}
