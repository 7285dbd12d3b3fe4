//! Main Crate Error

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Auth(#[from] mc_auth::error::Error),

    #[error(transparent)]
    Catalog(#[from] mc_catalog::error::Error),

    #[error("Invalid value '{value}' for {var}")]
    InvalidConfig { var: &'static str, value: String },
}
