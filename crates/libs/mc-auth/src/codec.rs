//! Base64url JSON segments and HMAC-SHA256 signatures.
//!
//! These are the building blocks of the access token wire format
//! `base64url(header).base64url(payload).signature`:
//! - [`encode`]/[`decode`]: JSON value <-> unpadded base64url segment
//! - [`sign`]: HMAC-SHA256 of a string, rendered as unpadded base64url
//! - [`constant_time_eq`]: comparison that does not short-circuit on the
//!   first differing byte
//!
//! # Examples
//!
//! ```rust
//! use mc_auth::codec::{decode, encode, sign};
//! use serde_json::json;
//!
//! let segment = encode(&json!({"alg": "HS256", "typ": "JWT"})).unwrap();
//! assert_eq!(segment, "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9");
//!
//! let value: serde_json::Value = decode(&segment).unwrap();
//! assert_eq!(value["alg"], "HS256");
//!
//! assert_eq!(sign("a.b", "secret").unwrap(), sign("a.b", "secret").unwrap());
//! ```

use base64::{
    Engine, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use hmac::{Hmac, Mac};
use serde::{Serialize, de::DeserializeOwned};
use sha2::Sha256;

use crate::prelude::*;

type HmacSha256 = Hmac<Sha256>;

/// URL-safe alphabet, never emits padding, accepts input with or without it.
const BASE64_URL: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Serializes `value` to JSON and encodes it as an unpadded base64url segment.
pub fn encode<T>(value: &T) -> Result<String>
where
    T: Serialize + ?Sized,
{
    let json = serde_json::to_vec(value)?;
    Ok(BASE64_URL.encode(json))
}

/// Decodes a base64url segment and parses the JSON it carries.
///
/// Any malformed input, whether bad base64 or bad JSON, is reported as
/// [`Error::InvalidToken`].
pub fn decode<T>(segment: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let bytes = BASE64_URL.decode(segment).map_err(|err| {
        log::debug!("Failed to decode base64url segment {err}");
        Error::InvalidToken
    })?;
    serde_json::from_slice(&bytes).map_err(|err| {
        log::debug!("Failed to parse token segment {err}");
        Error::InvalidToken
    })
}

/// Computes HMAC-SHA256(`secret`, `input`) as unpadded base64url.
pub fn sign(input: &str, secret: &str) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| Error::SigningKey)?;
    mac.update(input.as_bytes());
    Ok(BASE64_URL.encode(mac.finalize().into_bytes()))
}

/// Compares two byte slices in time that only depends on their length.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }

    result == 0
}
