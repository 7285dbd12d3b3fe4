use axum::{extract::State, http::StatusCode};
use mc_catalog::{
    actor::{ActorUpdate, NewActor},
    page::{Page, PageRequest},
    store::{ActorView, MovieSummary},
};
use mc_web::{
    extract::{Json, Path, Query},
    prelude::Result as McWebResult,
};

use super::SearchQuery;
use crate::state::AppState;

pub async fn list_actors(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Json<Page<ActorView>> {
    Json(state.catalog.list_actors(&page).await)
}

pub async fn search_actors(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Page<ActorView>> {
    Json(
        state
            .catalog
            .search_actors(&query.q, &query.page_request())
            .await,
    )
}

pub async fn get_actor(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> McWebResult<Json<ActorView>> {
    Ok(Json(state.catalog.get_actor(id).await?))
}

/// Movies the actor appears in.
pub async fn actor_movies(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> McWebResult<Json<Vec<MovieSummary>>> {
    Ok(Json(state.catalog.actor_movies(id).await?))
}

pub async fn create_actor(
    State(state): State<AppState>,
    Json(actor): Json<NewActor>,
) -> McWebResult<(StatusCode, Json<ActorView>)> {
    let actor = state.catalog.create_actor(actor).await?;
    Ok((StatusCode::CREATED, Json(actor)))
}

pub async fn update_actor(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(update): Json<ActorUpdate>,
) -> McWebResult<Json<ActorView>> {
    Ok(Json(state.catalog.update_actor(id, update).await?))
}

pub async fn delete_actor(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> McWebResult<Json<ActorView>> {
    Ok(Json(state.catalog.delete_actor(id).await?))
}
