//! Request context for authenticated handlers.
//!
//! The access middleware inserts a [`Ctx`] into the request extensions once
//! the bearer token has been verified. Handlers take `Ctx` as an argument;
//! on a route that never ran the user guard the extractor fails with
//! [`Error::CtxMissing`].

use axum::{extract::FromRequestParts, http::request::Parts};
use mc_auth::token::Claims;

use crate::prelude::*;

/// Request context containing the verified token payload.
#[derive(Clone, Debug)]
pub struct Ctx {
    pub claims: Claims,
}

impl Ctx {
    pub fn new(claims: Claims) -> Self {
        Self { claims }
    }

    pub fn user_id(&self) -> u64 {
        self.claims.sub
    }

    pub fn username(&self) -> &str {
        &self.claims.username
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Ctx {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        parts
            .extensions
            .get::<Ctx>()
            .cloned()
            .ok_or(Error::CtxMissing)
    }
}
