//! Actor operations.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::page::{Page, PageRequest};
use crate::prelude::*;
use crate::store::{ActorRecord, ActorView, Catalog, MovieSummary, required};

/// Body of `POST /actors`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewActor {
    pub name: String,
}

/// Body of `PUT /actors/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActorUpdate {
    #[serde(default)]
    pub name: Option<String>,
}

impl Catalog {
    pub async fn create_actor(&self, actor: NewActor) -> Result<ActorView> {
        let name = required("name", &actor.name)?;
        let mut data = self.data.write().await;
        let record = data.insert_actor(name)?;
        info!("Created actor {} '{}'", record.id, record.name);
        Ok(data.actor_view(&record))
    }

    pub async fn list_actors(&self, request: &PageRequest) -> Page<ActorView> {
        let data = self.data.read().await;
        let all: Vec<&ActorRecord> = data.actors.values().collect();
        Page::paginate(all, request).map(|actor| data.actor_view(actor))
    }

    /// Case-insensitive substring search on the name.
    pub async fn search_actors(&self, query: &str, request: &PageRequest) -> Page<ActorView> {
        let needle = query.trim().to_lowercase();
        let data = self.data.read().await;
        let matching: Vec<&ActorRecord> = data
            .actors
            .values()
            .filter(|actor| actor.name.to_lowercase().contains(&needle))
            .collect();
        Page::paginate(matching, request).map(|actor| data.actor_view(actor))
    }

    pub async fn get_actor(&self, id: u64) -> Result<ActorView> {
        let data = self.data.read().await;
        Ok(data.actor_view(data.actor(id)?))
    }

    /// Movies the actor appears in.
    pub async fn actor_movies(&self, id: u64) -> Result<Vec<MovieSummary>> {
        let data = self.data.read().await;
        data.actor(id)?;
        Ok(data.movies_of(id))
    }

    pub async fn update_actor(&self, id: u64, update: ActorUpdate) -> Result<ActorView> {
        let mut data = self.data.write().await;
        let mut actor = data.actor(id)?.clone();
        if let Some(name) = update.name {
            let name = required("name", &name)?;
            data.ensure_name_free(&name, Some(id))?;
            actor.name = name;
        }
        let view = data.actor_view(&actor);
        data.actors.insert(id, actor);
        Ok(view)
    }

    /// Removes the actor from the catalog and from every cast.
    pub async fn delete_actor(&self, id: u64) -> Result<ActorView> {
        let mut data = self.data.write().await;
        let view = data.actor_view(data.actor(id)?);
        data.actors.remove(&id);
        for movie in data.movies.values_mut() {
            movie.actor_ids.retain(|actor_id| *actor_id != id);
        }
        info!("Deleted actor {id}");
        Ok(view)
    }
}
