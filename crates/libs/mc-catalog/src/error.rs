//! Catalog error types.

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// No entity with the requested id.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A unique field is already used by another entity.
    #[error("{entity} '{value}' already exists")]
    Conflict { entity: &'static str, value: String },

    /// Input rejected before touching the store.
    #[error("{0}")]
    Validation(String),

    /// Seed file could not be parsed.
    #[error(transparent)]
    Seed(#[from] toml::de::Error),
}
