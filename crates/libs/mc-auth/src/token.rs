//! HS256 access tokens.
//!
//! A token is three `.`-joined segments: the base64url JSON header
//! `{"alg":"HS256","typ":"JWT"}`, the base64url JSON [`Claims`], and the
//! HMAC-SHA256 signature of the first two segments. A token is accepted iff
//! it has exactly three segments, its signature matches, and its `exp`
//! (when present) is not in the past.

use chrono::{TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::codec::{constant_time_eq, decode, encode, sign};
use crate::prelude::*;

pub const ALGORITHM: &str = "HS256";
pub const TOKEN_TYPE: &str = "JWT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    pub alg: String,
    pub typ: String,
}

impl Default for TokenHeader {
    fn default() -> Self {
        Self {
            alg: String::from(ALGORITHM),
            typ: String::from(TOKEN_TYPE),
        }
    }
}

/// Payload carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Username of the authenticated user.
    pub username: String,
    /// Subject (user id).
    pub sub: u64,
    /// Issued at, seconds since the epoch.
    pub iat: i64,
    /// Expiration, seconds since the epoch. Tokens without it never expire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Builds claims issued at `now` that expire `ttl` later.
    pub fn new(username: &str, sub: u64, now: i64, ttl: TimeDelta) -> Self {
        Self {
            username: String::from(username),
            sub,
            iat: now,
            exp: Some(now.saturating_add(ttl.num_seconds())),
        }
    }
}

/// Signs and verifies tokens with one shared secret.
#[derive(Clone)]
pub struct TokenSigner {
    secret: String,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("secret", &"REDACTED")
            .finish()
    }
}

impl TokenSigner {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Encodes `claims` into a signed token string.
    pub fn issue(&self, claims: &Claims) -> Result<String> {
        let header = encode(&TokenHeader::default())?;
        let payload = encode(claims)?;
        let signing_input = format!("{header}.{payload}");
        let signature = sign(&signing_input, &self.secret)?;
        Ok(format!("{signing_input}.{signature}"))
    }

    /// Verifies `token` against the current wall-clock time.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verifies `token` as if the current time were `now`.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims> {
        let segments: Vec<&str> = token.split('.').collect();
        let [header, payload, signature] = segments.as_slice() else {
            return Err(Error::InvalidToken);
        };

        let expected = sign(&format!("{header}.{payload}"), &self.secret)?;
        if !constant_time_eq(expected.as_bytes(), signature.as_bytes()) {
            log::debug!("Token signature mismatch");
            return Err(Error::InvalidToken);
        }

        let claims: Claims = decode(payload)?;
        if claims.exp.is_some_and(|exp| exp < now) {
            return Err(Error::TokenExpired);
        }
        Ok(claims)
    }
}
