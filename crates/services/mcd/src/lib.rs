//! Movie Catalog Service (mcd)
//!
//! A REST backend for movies, actors and ratings:
//!
//! - **Auth**: login and registration against an in-memory user store,
//!   HS256 access tokens
//! - **Catalog**: paginated listing and search, administrative writes
//!   guarded by a shared API token
//! - **Seeding**: the bundled demo catalog is loaded at startup
//!
//! The binary reads its [`config::ServerConfig`] from the environment, builds
//! the [`state::AppState`] and serves the [`api::router`] until Ctrl-C.

pub mod api;
pub mod config;
pub mod error;
pub mod prelude;
pub mod state;
