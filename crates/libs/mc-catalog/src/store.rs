//! The catalog store and the records it holds.
//!
//! All three tables sit behind one lock so that relation updates (cascading
//! rating deletes, cast changes) are applied atomically. Entity operations
//! live in [`crate::movie`], [`crate::actor`] and [`crate::rating`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::prelude::*;

#[derive(Debug, Clone)]
pub(crate) struct MovieRecord {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub actor_ids: Vec<u64>,
}

#[derive(Debug, Clone)]
pub(crate) struct ActorRecord {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone)]
pub(crate) struct RatingRecord {
    pub id: u64,
    pub score: i32,
    pub review: Option<String>,
    pub movie_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorSummary {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub id: u64,
    pub score: i32,
    pub review: Option<String>,
}

/// A movie with its cast and ratings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieView {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub actors: Vec<ActorSummary>,
    pub ratings: Vec<RatingSummary>,
}

/// An actor with the movies they appear in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorView {
    pub id: u64,
    pub name: String,
    pub movies: Vec<MovieSummary>,
}

/// A rating with the movie it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingView {
    pub id: u64,
    pub score: i32,
    pub review: Option<String>,
    pub movie: MovieSummary,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct CatalogData {
    pub movies: BTreeMap<u64, MovieRecord>,
    pub actors: BTreeMap<u64, ActorRecord>,
    pub ratings: BTreeMap<u64, RatingRecord>,
    last_movie_id: u64,
    last_actor_id: u64,
    last_rating_id: u64,
}

#[derive(Debug, Default)]
pub struct Catalog {
    pub(crate) data: RwLock<CatalogData>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Trims `value` and rejects it when nothing is left.
pub(crate) fn required(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::Validation(format!("{field} must not be empty")));
    }
    Ok(String::from(value))
}

impl CatalogData {
    pub fn insert_movie(
        &mut self,
        title: String,
        description: Option<String>,
        actor_ids: Vec<u64>,
    ) -> Result<MovieRecord> {
        self.ensure_title_free(&title, None)?;
        self.last_movie_id += 1;
        let id = self.last_movie_id;
        let actor_ids = self.existing_actors(&actor_ids);
        let movie = MovieRecord {
            id,
            title,
            description,
            actor_ids,
        };
        self.movies.insert(id, movie.clone());
        Ok(movie)
    }

    pub fn insert_actor(&mut self, name: String) -> Result<ActorRecord> {
        self.ensure_name_free(&name, None)?;
        self.last_actor_id += 1;
        let id = self.last_actor_id;
        let actor = ActorRecord { id, name };
        self.actors.insert(id, actor.clone());
        Ok(actor)
    }

    pub fn insert_rating(
        &mut self,
        score: i32,
        review: Option<String>,
        movie_id: u64,
    ) -> Result<RatingRecord> {
        let score = valid_score(score)?;
        self.movie(movie_id)?;
        self.last_rating_id += 1;
        let id = self.last_rating_id;
        let rating = RatingRecord {
            id,
            score,
            review,
            movie_id,
        };
        self.ratings.insert(id, rating.clone());
        Ok(rating)
    }

    pub fn movie(&self, id: u64) -> Result<&MovieRecord> {
        self.movies.get(&id).ok_or(Error::NotFound("Movie"))
    }

    pub fn actor(&self, id: u64) -> Result<&ActorRecord> {
        self.actors.get(&id).ok_or(Error::NotFound("Actor"))
    }

    pub fn rating(&self, id: u64) -> Result<&RatingRecord> {
        self.ratings.get(&id).ok_or(Error::NotFound("Rating"))
    }

    pub fn movie_by_title(&self, title: &str) -> Option<&MovieRecord> {
        self.movies.values().find(|movie| movie.title == title)
    }

    pub fn actor_by_name(&self, name: &str) -> Option<&ActorRecord> {
        self.actors.values().find(|actor| actor.name == name)
    }

    pub fn ensure_title_free(&self, title: &str, except: Option<u64>) -> Result<()> {
        match self.movie_by_title(title) {
            Some(movie) if Some(movie.id) != except => Err(Error::Conflict {
                entity: "Movie",
                value: String::from(title),
            }),
            _ => Ok(()),
        }
    }

    pub fn ensure_name_free(&self, name: &str, except: Option<u64>) -> Result<()> {
        match self.actor_by_name(name) {
            Some(actor) if Some(actor.id) != except => Err(Error::Conflict {
                entity: "Actor",
                value: String::from(name),
            }),
            _ => Ok(()),
        }
    }

    /// Keeps the ids that name a known actor, dropping duplicates.
    pub fn existing_actors(&self, ids: &[u64]) -> Vec<u64> {
        let mut result: Vec<u64> = Vec::with_capacity(ids.len());
        for id in ids {
            if self.actors.contains_key(id) && !result.contains(id) {
                result.push(*id);
            }
        }
        result
    }

    pub fn movie_summary(movie: &MovieRecord) -> MovieSummary {
        MovieSummary {
            id: movie.id,
            title: movie.title.clone(),
            description: movie.description.clone(),
        }
    }

    pub fn movie_view(&self, movie: &MovieRecord) -> MovieView {
        MovieView {
            id: movie.id,
            title: movie.title.clone(),
            description: movie.description.clone(),
            actors: movie
                .actor_ids
                .iter()
                .filter_map(|id| self.actors.get(id))
                .map(|actor| ActorSummary {
                    id: actor.id,
                    name: actor.name.clone(),
                })
                .collect(),
            ratings: self
                .ratings
                .values()
                .filter(|rating| rating.movie_id == movie.id)
                .map(|rating| RatingSummary {
                    id: rating.id,
                    score: rating.score,
                    review: rating.review.clone(),
                })
                .collect(),
        }
    }

    pub fn movies_of(&self, actor_id: u64) -> Vec<MovieSummary> {
        self.movies
            .values()
            .filter(|movie| movie.actor_ids.contains(&actor_id))
            .map(Self::movie_summary)
            .collect()
    }

    pub fn actor_view(&self, actor: &ActorRecord) -> ActorView {
        ActorView {
            id: actor.id,
            name: actor.name.clone(),
            movies: self.movies_of(actor.id),
        }
    }

    pub fn rating_view(&self, rating: &RatingRecord) -> Result<RatingView> {
        let movie = self.movie(rating.movie_id)?;
        Ok(RatingView {
            id: rating.id,
            score: rating.score,
            review: rating.review.clone(),
            movie: Self::movie_summary(movie),
        })
    }
}

/// Ratings are whole numbers from 1 to 10.
pub(crate) fn valid_score(score: i32) -> Result<i32> {
    if !(1..=10).contains(&score) {
        return Err(Error::Validation(format!(
            "score must be between 1 and 10, got {score}"
        )));
    }
    Ok(score)
}
