//! Rating operations.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::prelude::*;
use crate::store::{Catalog, RatingView, valid_score};

/// Body of `POST /ratings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRating {
    pub score: i32,
    #[serde(default)]
    pub review: Option<String>,
    pub movie_id: u64,
}

/// Body of `PUT /ratings/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingUpdate {
    #[serde(default)]
    pub score: Option<i32>,
    #[serde(default)]
    pub review: Option<String>,
    /// Moves the rating to another movie.
    #[serde(default)]
    pub movie_id: Option<u64>,
}

impl Catalog {
    pub async fn create_rating(&self, rating: NewRating) -> Result<RatingView> {
        let mut data = self.data.write().await;
        let record = data.insert_rating(rating.score, rating.review, rating.movie_id)?;
        info!(
            "Created rating {} ({}/10) for movie {}",
            record.id, record.score, record.movie_id
        );
        data.rating_view(&record)
    }

    /// Every rating with its movie, oldest first.
    pub async fn list_ratings(&self) -> Vec<RatingView> {
        let data = self.data.read().await;
        data.ratings
            .values()
            .filter_map(|rating| data.rating_view(rating).ok())
            .collect()
    }

    pub async fn get_rating(&self, id: u64) -> Result<RatingView> {
        let data = self.data.read().await;
        data.rating_view(data.rating(id)?)
    }

    pub async fn update_rating(&self, id: u64, update: RatingUpdate) -> Result<RatingView> {
        let mut data = self.data.write().await;
        let mut rating = data.rating(id)?.clone();

        if let Some(score) = update.score {
            rating.score = valid_score(score)?;
        }
        if let Some(review) = update.review {
            rating.review = Some(review);
        }
        if let Some(movie_id) = update.movie_id {
            data.movie(movie_id)?;
            rating.movie_id = movie_id;
        }

        let view = data.rating_view(&rating)?;
        data.ratings.insert(id, rating);
        Ok(view)
    }

    pub async fn delete_rating(&self, id: u64) -> Result<RatingView> {
        let mut data = self.data.write().await;
        let view = data.rating_view(data.rating(id)?)?;
        data.ratings.remove(&id);
        info!("Deleted rating {id}");
        Ok(view)
    }
}
