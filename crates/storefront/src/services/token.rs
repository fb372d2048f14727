//! Bearer token issuing and verification.
//!
//! Tokens are HS256 JWTs carrying the user id in `sub`. Verification is
//! stateless: the only input besides the token is the process-wide signing
//! secret, and the only outcome a caller can observe is `Some(user_id)` or
//! `None`. There is no revocation list.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use driftline_core::UserId;

/// Default token lifetime on issue.
const TOKEN_TTL_DAYS: i64 = 7;

/// Errors that can occur when issuing a token.
///
/// Verification never surfaces errors; a bad token is simply `None`.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Signing failed.
    #[error("failed to sign token: {0}")]
    Sign(#[from] jsonwebtoken::errors::Error),
}

/// JWT claims carried by a bearer token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User id the token authenticates.
    sub: String,
    /// Issued-at, seconds since epoch.
    iat: i64,
    /// Expiry, seconds since epoch.
    exp: i64,
}

/// Issues and verifies bearer tokens with a shared HS256 secret.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    /// Build a token service from the signing secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
        }
    }

    /// Issue a token for `user_id` with the default 7-day expiry.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Sign` if signing fails.
    pub fn issue(&self, user_id: &UserId) -> Result<String, TokenError> {
        self.issue_with_ttl(user_id, Duration::days(TOKEN_TTL_DAYS))
    }

    /// Issue a token for `user_id` expiring after `ttl`.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Sign` if signing fails.
    pub fn issue_with_ttl(&self, user_id: &UserId, ttl: Duration) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.as_str().to_owned(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };
        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    /// Verify a token and extract the user id it authenticates.
    ///
    /// Returns `None` for anything that is not a currently-valid token
    /// signed by this service: malformed input, a bad signature, or an
    /// expired claim. Callers treat `None` as unauthenticated; the reason
    /// is never exposed.
    #[must_use]
    pub fn verify(&self, token: &str) -> Option<UserId> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .ok()
            .map(|data| UserId::new(data.claims.sub))
    }
}
