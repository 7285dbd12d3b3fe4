use axum::{extract::State, http::StatusCode};
use mc_catalog::{
    movie::{MovieUpdate, NewMovie},
    page::{Page, PageRequest},
    store::MovieView,
};
use mc_web::{
    extract::{Json, Path, Query},
    prelude::Result as McWebResult,
};

use super::SearchQuery;
use crate::state::AppState;

pub async fn list_movies(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Json<Page<MovieView>> {
    Json(state.catalog.list_movies(&page).await)
}

pub async fn search_movies(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Page<MovieView>> {
    Json(
        state
            .catalog
            .search_movies(&query.q, &query.page_request())
            .await,
    )
}

pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> McWebResult<Json<MovieView>> {
    Ok(Json(state.catalog.get_movie(id).await?))
}

pub async fn create_movie(
    State(state): State<AppState>,
    Json(movie): Json<NewMovie>,
) -> McWebResult<(StatusCode, Json<MovieView>)> {
    let movie = state.catalog.create_movie(movie).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}

pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(update): Json<MovieUpdate>,
) -> McWebResult<Json<MovieView>> {
    Ok(Json(state.catalog.update_movie(id, update).await?))
}

pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> McWebResult<Json<MovieView>> {
    Ok(Json(state.catalog.delete_movie(id).await?))
}
