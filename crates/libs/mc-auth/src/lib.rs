//! Authentication for the movie catalog.
//!
//! Provides the HS256 token codec, the in-memory user repository and the
//! [`service::AuthService`] that registers users, checks credentials and
//! issues and verifies access tokens.

pub mod auth_body;
pub mod codec;
pub mod error;
pub mod prelude;
pub mod secret_hash;
pub mod service;
pub mod token;
pub mod user_store;

pub const CONNECTION_TOKEN_TYPE: &str = "Bearer";
