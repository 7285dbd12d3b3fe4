//! Common types and utilities.

/// Catalog error type.
pub use crate::error::Error;

/// Catalog result type.
pub type Result<T> = core::result::Result<T, Error>;
