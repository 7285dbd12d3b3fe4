//! In-memory user repository.
//!
//! The store is owned by whoever creates it (normally the
//! [`AuthService`](crate::service::AuthService)) and lives as long as the
//! process; nothing is persisted.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::prelude::*;

/// Stored user record.
#[derive(Debug, Clone)]
pub struct User {
    pub id: u64,
    pub username: String,
    /// Argon2 PHC string, see [`crate::secret_hash`].
    pub password_hash: String,
}

/// Public view of a user, without credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    pub id: u64,
    pub username: String,
}

impl From<&User> for UserView {
    fn from(value: &User) -> Self {
        Self {
            id: value.id,
            username: value.username.clone(),
        }
    }
}

#[derive(Debug, Default)]
struct UserTable {
    users: HashMap<String, User>,
    last_id: u64,
}

#[derive(Debug, Default)]
pub struct UserStore {
    table: RwLock<UserTable>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new user, allocating the next id.
    ///
    /// Fails with [`Error::UserExists`] when the username is taken; in that
    /// case no id is consumed.
    pub async fn insert(&self, username: &str, password_hash: String) -> Result<User> {
        let mut table = self.table.write().await;
        if table.users.contains_key(username) {
            return Err(Error::UserExists(String::from(username)));
        }
        table.last_id += 1;
        let user = User {
            id: table.last_id,
            username: String::from(username),
            password_hash,
        };
        table.users.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    pub async fn find(&self, username: &str) -> Option<User> {
        self.table.read().await.users.get(username).cloned()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
