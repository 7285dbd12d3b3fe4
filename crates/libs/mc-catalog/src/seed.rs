//! Demo data loaded from TOML.
//!
//! ```toml
//! [[movies]]
//! title = "The Matrix"
//! description = "A computer hacker learns about the true nature of reality."
//! actors = ["Keanu Reeves", "Laurence Fishburne"]
//!
//! [[movies.ratings]]
//! score = 9
//! review = "Great sci-fi"
//! ```
//!
//! Seeding is find-or-create: actors are matched by name, movies by title
//! and ratings by `(movie, score, review)`, so applying the same seed twice
//! leaves the catalog unchanged. A seed that fails anywhere leaves the
//! catalog as it was.

use serde::Deserialize;
use tracing::{debug, info};

use crate::prelude::*;
use crate::store::{Catalog, required};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub movies: Vec<SeedMovie>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedMovie {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub actors: Vec<String>,
    #[serde(default)]
    pub ratings: Vec<SeedRating>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedRating {
    pub score: i32,
    #[serde(default)]
    pub review: Option<String>,
}

/// What a seed run added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub movies: usize,
    pub actors: usize,
    pub ratings: usize,
}

impl CatalogSeed {
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }
}

impl Catalog {
    /// Applies `seed` under a single write lock. Changes are made on a copy
    /// of the catalog that replaces it only once every entry succeeded.
    pub async fn seed(&self, seed: &CatalogSeed) -> Result<SeedReport> {
        let mut report = SeedReport::default();
        let mut guard = self.data.write().await;
        let mut data = guard.clone();

        for entry in &seed.movies {
            let mut cast = Vec::with_capacity(entry.actors.len());
            for name in &entry.actors {
                let name = required("name", name)?;
                let id = match data.actor_by_name(&name).map(|actor| actor.id) {
                    Some(id) => id,
                    None => {
                        report.actors += 1;
                        data.insert_actor(name)?.id
                    }
                };
                cast.push(id);
            }

            let title = required("title", &entry.title)?;
            let movie_id = match data.movie_by_title(&title).map(|movie| movie.id) {
                Some(id) => {
                    if !cast.is_empty() {
                        let cast = data.existing_actors(&cast);
                        if let Some(movie) = data.movies.get_mut(&id) {
                            movie.actor_ids = cast;
                        }
                    }
                    id
                }
                None => {
                    report.movies += 1;
                    data.insert_movie(title, entry.description.clone(), cast)?.id
                }
            };

            for rating in &entry.ratings {
                let exists = data.ratings.values().any(|existing| {
                    existing.movie_id == movie_id
                        && existing.score == rating.score
                        && existing.review == rating.review
                });
                if exists {
                    continue;
                }
                data.insert_rating(rating.score, rating.review.clone(), movie_id)?;
                report.ratings += 1;
            }
            debug!("Seeded movie '{}'", entry.title);
        }
        *guard = data;

        info!(
            "Catalog seeded: {} movies, {} actors, {} ratings added",
            report.movies, report.actors, report.ratings
        );
        Ok(report)
    }
}
