//! Shared state of the request handlers.

use std::sync::Arc;

use mc_auth::service::AuthService;
use mc_catalog::{seed::CatalogSeed, store::Catalog};
use tracing::info;

use crate::config::ServerConfig;
use crate::prelude::*;

/// Demo catalog applied at startup when `SEED_CATALOG` is on.
pub const CATALOG_SEED: &str = include_str!("../seed/catalog.toml");

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub catalog: Arc<Catalog>,
}

impl AppState {
    /// Creates the auth service with the demo user and, if configured, seeds
    /// the catalog.
    pub async fn new(config: &ServerConfig) -> Result<Self> {
        let auth = AuthService::with_demo_user(config.auth_config()).await?;
        let catalog = Catalog::new();
        if config.seed_catalog {
            let report = catalog.seed(&bundled_seed()?).await?;
            info!("Applied bundled seed: {report:?}");
        }

        Ok(Self {
            auth: Arc::new(auth),
            catalog: Arc::new(catalog),
        })
    }
}

pub fn bundled_seed() -> Result<CatalogSeed> {
    Ok(CatalogSeed::from_toml(CATALOG_SEED)?)
}
