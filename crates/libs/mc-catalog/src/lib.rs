//! Movie catalog storage.
//!
//! Movies, actors and ratings live in one in-memory [`store::Catalog`].
//! Listings are paginated with [`page::PageRequest`] and returned as
//! [`page::Page`]s; the catalog can be filled from a TOML
//! [`seed::CatalogSeed`].

pub mod actor;
pub mod error;
pub mod movie;
pub mod page;
pub mod prelude;
pub mod rating;
pub mod seed;
pub mod store;
