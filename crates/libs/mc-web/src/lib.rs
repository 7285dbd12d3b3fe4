//! Web building blocks for the movie catalog.
//!
//! The access guards, the [`policy::RoutePolicy`] table that decides which
//! of them apply to a route, the request [`ctx::Ctx`] handed to handlers and
//! the [`error::Error`] that turns every failure, extractor rejections
//! included, into a JSON response.

pub mod ctx;
pub mod error;
pub mod extract;
pub mod guard;
pub mod mw_auth;
pub mod policy;
pub mod prelude;
