//! Movie operations.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::page::{Page, PageRequest};
use crate::prelude::*;
use crate::store::{Catalog, CatalogData, MovieRecord, MovieView, required};

/// Body of `POST /movies`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMovie {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Cast; ids that name no actor are ignored.
    #[serde(default)]
    pub actor_ids: Vec<u64>,
}

/// Body of `PUT /movies/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Replaces the whole cast when present.
    #[serde(default)]
    pub actor_ids: Option<Vec<u64>>,
}

fn title_matches(movie: &MovieRecord, needle: &str) -> bool {
    movie.title.to_lowercase().contains(needle)
}

impl Catalog {
    pub async fn create_movie(&self, movie: NewMovie) -> Result<MovieView> {
        let title = required("title", &movie.title)?;
        let mut data = self.data.write().await;
        let record = data.insert_movie(title, movie.description, movie.actor_ids)?;
        info!("Created movie {} '{}'", record.id, record.title);
        Ok(data.movie_view(&record))
    }

    pub async fn list_movies(&self, request: &PageRequest) -> Page<MovieView> {
        let data = self.data.read().await;
        let all: Vec<&MovieRecord> = data.movies.values().collect();
        Page::paginate(all, request).map(|movie| data.movie_view(movie))
    }

    /// Case-insensitive substring search on the title.
    pub async fn search_movies(&self, query: &str, request: &PageRequest) -> Page<MovieView> {
        let needle = query.trim().to_lowercase();
        let data = self.data.read().await;
        let matching: Vec<&MovieRecord> = data
            .movies
            .values()
            .filter(|movie| title_matches(movie, &needle))
            .collect();
        Page::paginate(matching, request).map(|movie| data.movie_view(movie))
    }

    pub async fn get_movie(&self, id: u64) -> Result<MovieView> {
        let data = self.data.read().await;
        Ok(data.movie_view(data.movie(id)?))
    }

    pub async fn update_movie(&self, id: u64, update: MovieUpdate) -> Result<MovieView> {
        let mut data = self.data.write().await;
        let mut movie = data.movie(id)?.clone();

        if let Some(title) = update.title {
            let title = required("title", &title)?;
            data.ensure_title_free(&title, Some(id))?;
            movie.title = title;
        }
        if let Some(description) = update.description {
            movie.description = Some(description);
        }
        if let Some(actor_ids) = update.actor_ids {
            movie.actor_ids = data.existing_actors(&actor_ids);
        }

        let view = data.movie_view(&movie);
        data.movies.insert(id, movie);
        Ok(view)
    }

    /// Removes the movie together with its ratings and returns it as it was.
    pub async fn delete_movie(&self, id: u64) -> Result<MovieView> {
        let mut data = self.data.write().await;
        let view = data.movie_view(data.movie(id)?);
        remove_movie(&mut data, id);
        info!("Deleted movie {id} and {} ratings", view.ratings.len());
        Ok(view)
    }
}

fn remove_movie(data: &mut CatalogData, id: u64) {
    data.movies.remove(&id);
    data.ratings.retain(|_, rating| rating.movie_id != id);
}
