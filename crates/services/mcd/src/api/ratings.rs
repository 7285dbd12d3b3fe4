use axum::{extract::State, http::StatusCode};
use mc_catalog::{
    rating::{NewRating, RatingUpdate},
    store::RatingView,
};
use mc_web::{
    extract::{Json, Path},
    prelude::Result as McWebResult,
};

use crate::state::AppState;

/// Every rating with its movie; not paginated.
pub async fn list_ratings(State(state): State<AppState>) -> Json<Vec<RatingView>> {
    Json(state.catalog.list_ratings().await)
}

pub async fn get_rating(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> McWebResult<Json<RatingView>> {
    Ok(Json(state.catalog.get_rating(id).await?))
}

pub async fn create_rating(
    State(state): State<AppState>,
    Json(rating): Json<NewRating>,
) -> McWebResult<(StatusCode, Json<RatingView>)> {
    let rating = state.catalog.create_rating(rating).await?;
    Ok((StatusCode::CREATED, Json(rating)))
}

pub async fn update_rating(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(update): Json<RatingUpdate>,
) -> McWebResult<Json<RatingView>> {
    Ok(Json(state.catalog.update_rating(id, update).await?))
}

pub async fn delete_rating(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> McWebResult<Json<RatingView>> {
    Ok(Json(state.catalog.delete_rating(id).await?))
}
