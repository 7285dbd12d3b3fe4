use axum::{extract::State, http::StatusCode};
use mc_auth::{
    auth_body::{AuthBody, AuthPayload, RegisterBody},
    token::Claims,
};
use mc_web::{ctx::Ctx, extract::Json, prelude::Result as McWebResult};

use crate::state::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<AuthPayload>,
) -> McWebResult<Json<AuthBody>> {
    Ok(Json(
        state
            .auth
            .login(&payload.username, &payload.password)
            .await?,
    ))
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<AuthPayload>,
) -> McWebResult<(StatusCode, Json<RegisterBody>)> {
    let user = state
        .auth
        .register(&payload.username, &payload.password)
        .await?;
    Ok((StatusCode::CREATED, Json(RegisterBody { user })))
}

/// Payload of the caller's token.
pub async fn me(ctx: Ctx) -> Json<Claims> {
    Json(ctx.claims)
}
