//! Session token issuance and verification
//!
//! Tokens are HMAC-signed JWTs with pre-computed keys for optimal
//! performance. Verification is pure: it performs no I/O and trusts the
//! identity claims as of issuance time.

use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Session token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: String,
    /// Account email at issuance time
    pub email: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Parse the subject claim as an account id
    pub fn account_id(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::Invalid)
    }
}

/// Token verification failure
///
/// Expiry and tampering are distinct outcomes: an expired token carried a
/// valid signature, a tampered token never did.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token")]
    Invalid,
}

/// Pre-computed signing keys for efficient token operations
/// These are expensive to create, so we cache them in AppState
#[derive(Clone)]
struct TokenKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl TokenKeys {
    fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }
}

/// Token service for issuing and verifying session tokens
///
/// The signing secret is injected at construction; verification never
/// reads ambient state. Keys are wrapped in Arc for cheap cloning.
#[derive(Clone)]
pub struct TokenService {
    keys: TokenKeys,
    ttl_secs: i64,
}

impl TokenService {
    /// Create a new token service with pre-computed keys
    ///
    /// Call this once at application startup and store in AppState.
    /// Do NOT create per-request.
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            keys: TokenKeys::new(secret),
            ttl_secs,
        }
    }

    /// Issue a signed session token for an account
    ///
    /// The signature covers the full claim payload; no claim is trusted
    /// unless the signature verified.
    pub fn issue(&self, account_id: Uuid, email: &str) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.ttl_secs);

        let claims = Claims {
            sub: account_id.to_string(),
            email: email.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.keys.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to sign session token: {}", e))
    }

    /// Verify a token and return its claims
    ///
    /// Rejects when the signature does not match or when the current time
    /// is at or past the embedded expiry (zero leeway).
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        decode::<Claims>(token, &self.keys.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }

    /// Token lifetime in seconds (also the cookie max-age)
    #[inline]
    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> TokenService {
        TokenService::new("test-secret", 86400)
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let service = create_test_service();
        let account_id = Uuid::new_v4();

        let token = service.issue(account_id, "a@x.com").unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.sub, account_id.to_string());
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.account_id().unwrap(), account_id);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = create_test_service();
        assert_eq!(service.verify("invalid.token.here"), Err(TokenError::Invalid));
        assert_eq!(service.verify(""), Err(TokenError::Invalid));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service = create_test_service();
        let other = TokenService::new("another-secret", 86400);
        let token = other.issue(Uuid::new_v4(), "a@x.com").unwrap();

        assert_eq!(service.verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_single_byte_mutation_invalidates() {
        let service = create_test_service();
        let token = service.issue(Uuid::new_v4(), "a@x.com").unwrap();

        // Flip one character in the signature segment
        let mut bytes = token.into_bytes();
        let last = bytes.len() - 1;
        bytes[last] = if bytes[last] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert_eq!(service.verify(&tampered), Err(TokenError::Invalid));
    }

    #[test]
    fn test_expired_token_rejected_as_expired() {
        // Negative TTL puts the expiry in the past at issuance
        let service = TokenService::new("test-secret", -60);
        let token = service.issue(Uuid::new_v4(), "a@x.com").unwrap();

        assert_eq!(service.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_service_is_clone_cheap() {
        let service = create_test_service();
        let cloned = service.clone(); // Should be cheap due to Arc
        let token = service.issue(Uuid::new_v4(), "a@x.com").unwrap();
        assert!(cloned.verify(&token).is_ok());
    }
}
