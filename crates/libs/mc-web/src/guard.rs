//! The two request guards.
//!
//! Both are plain functions over the request headers so they can be tested
//! without a router; [`crate::mw_auth`] decides which of them run.

use axum::http::{HeaderMap, HeaderValue, header::AUTHORIZATION, header::ToStrError};
use mc_auth::{codec::constant_time_eq, error::Error as AuthError, service::AuthService};
use tracing::{debug, warn};

use crate::ctx::Ctx;
use crate::prelude::*;

pub const API_TOKEN_HEADER: &str = "x-api-token";
pub const AUTH_HEADER_PREFIX: &str = "Bearer ";
pub const DEFAULT_API_TOKEN: &str = "demo-supersecret-token";

/// Value of the first of `names` that is present and non-empty. A value
/// that is not visible ASCII is an error; it never falls through to the
/// next name.
fn first_header<'a>(
    headers: &'a HeaderMap,
    names: &[&str],
) -> Option<std::result::Result<&'a str, ToStrError>> {
    names
        .iter()
        .find_map(|name| headers.get(*name).filter(|value| !value.is_empty()))
        .map(HeaderValue::to_str)
}

/// Token sent for the user guard: `Authorization`, else `x-api-token`,
/// with an optional `Bearer ` prefix removed.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str> {
    let value = first_header(headers, &[AUTHORIZATION.as_str(), API_TOKEN_HEADER])
        .ok_or(AuthError::TokenMissing)?
        .map_err(|_| AuthError::InvalidToken)?;
    let token = value
        .strip_prefix(AUTH_HEADER_PREFIX)
        .unwrap_or(value)
        .trim();
    if token.is_empty() {
        return Err(AuthError::TokenMissing.into());
    }
    Ok(token)
}

/// Verifies the user token and returns the context for the handler.
pub fn access_guard(auth: &AuthService, headers: &HeaderMap) -> Result<Ctx> {
    let token = bearer_token(headers).inspect_err(|err| {
        debug!("Rejected user token header: {err}");
    })?;
    let claims = auth.verify_token(token).inspect_err(|err| {
        debug!("Rejected user token: {err}");
    })?;
    Ok(Ctx::new(claims))
}

/// Checks the administrative token sent in `x-api-token`, else
/// `Authorization`, either raw or as `Bearer <token>`.
///
/// An empty `api_token` rejects every request.
pub fn api_key_guard(api_token: &str, headers: &HeaderMap) -> Result<()> {
    if api_token.trim().is_empty() {
        warn!("No API token configured, rejecting administrative request");
        return Err(Error::ApiTokenRejected);
    }
    let provided = match first_header(headers, &[API_TOKEN_HEADER, AUTHORIZATION.as_str()]) {
        Some(Ok(value)) => value,
        Some(Err(_)) => {
            debug!("Rejected request with an unreadable API token header");
            return Err(Error::ApiTokenRejected);
        }
        None => {
            debug!("Rejected request without API token");
            return Err(Error::ApiTokenRejected);
        }
    };

    let is_api_token = |candidate: &str| {
        !candidate.is_empty() && constant_time_eq(candidate.as_bytes(), api_token.as_bytes())
    };
    let accepted = match provided.strip_prefix(AUTH_HEADER_PREFIX) {
        Some(rest) => is_api_token(rest.trim()) || is_api_token(provided),
        None => is_api_token(provided),
    };
    if !accepted {
        debug!("Rejected request with a wrong API token");
        return Err(Error::ApiTokenRejected);
    }
    Ok(())
}
