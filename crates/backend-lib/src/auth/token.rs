// ============================
// crates/backend-lib/src/auth/token.rs
// ============================
//! Stateless session tokens.
//!
//! A token is a signed HS256 JWT carrying exactly the identity's primary key
//! and an expiry instant. Nothing is persisted server-side: validity is
//! signature + expiry at verification time, plus the gate's re-check that
//! the subject still exists. There is no refresh and no revocation list;
//! rotating the signing secret invalidates every outstanding token.
use crate::error::AppError;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Token payload: subject id and expiry, nothing else.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Identity primary key.
    pub sub: String,
    /// Expiration, seconds since the Unix epoch.
    pub exp: i64,
}

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("token creation failed: {0}")]
    Creation(String),
    /// Malformed token, bad signature, expired, or a subject that is not
    /// a valid id. The reason is for server-side logs only.
    #[error("{0}")]
    Invalid(String),
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Creation(msg) => AppError::Internal(msg),
            TokenError::Invalid(reason) => AppError::InvalidToken(reason),
        }
    }
}

/// Issues and verifies session tokens with a process-wide secret.
///
/// The keys are built once at startup and passed in explicitly; there is no
/// ambient global, so tests can run with throwaway secrets.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Mint a fresh token for `user_id`, expiring one TTL from now.
    pub fn issue(&self, user_id: Uuid) -> Result<String, TokenError> {
        let claims = Claims {
            sub: user_id.to_string(),
            exp: Utc::now().timestamp() + self.ttl.as_secs() as i64,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Creation(e.to_string()))
    }

    /// Check signature and expiry, then return the embedded identity id.
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| TokenError::Invalid(e.to_string()))?;
        Uuid::parse_str(&data.claims.sub)
            .map_err(|_| TokenError::Invalid("subject is not a valid id".to_string()))
    }
}
