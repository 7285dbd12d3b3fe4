//! Movie Catalog Service (mcd)
//!
//! The service is typically started with:
//! ```bash
//! export JWT_SECRET=your_jwt_secret
//! export API_TOKEN=your_api_token
//! mcd
//! ```

use mcd::{api::setup_api, config::ServerConfig, prelude::*, state::AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{}=debug,mc_web=debug,mc_catalog=info,mc_auth=info,tower_http=debug",
                    env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!("Starting with {config}");
    let state = AppState::new(&config).await?;
    let (_, api_handle) = setup_api(&config, state).await?;

    tokio::select! {
        result = api_handle => {
            tracing::error!("API server stopped: {:?}", result);
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down");
        }
    }

    Ok(())
}
