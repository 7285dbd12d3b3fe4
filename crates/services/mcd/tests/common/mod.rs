#![allow(dead_code)]

use std::error::Error;

use api_client::ApiClient;
use mc_auth::auth_body::{AuthBody, AuthPayload};
use mcd::{api::setup_api, config::ServerConfig, state::AppState};

pub mod api_client;

/// Starts the service on an ephemeral port and returns a client for it.
pub async fn spawn_server(config: ServerConfig) -> ApiClient {
    let config = ServerConfig { port: 0, ..config };
    let state = AppState::new(&config)
        .await
        .expect("Failed to build application state");
    let (addr, _handle) = setup_api(&config, state)
        .await
        .expect("Failed to start the API server");
    ApiClient::new(format!("http://{addr}/api"))
}

pub async fn login(api: &ApiClient, username: &str, password: &str) -> Result<String, Box<dyn Error>> {
    let payload = AuthPayload {
        username: String::from(username),
        password: String::from(password),
    };
    let body: AuthBody = api.post("auth/login", &payload).await?;
    Ok(body.access_token)
}
