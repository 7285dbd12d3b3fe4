//! Per-route access table.
//!
//! Every route is looked up by method and matched path (`/api/movies/{id}`,
//! not the concrete URI). Routes that are not listed require a user token.

use std::collections::HashMap;

use axum::http::Method;

/// Guards that must pass before a handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Access {
    /// Neither guard.
    Public,
    /// A valid user token.
    #[default]
    User,
    /// The administrative API token.
    ApiKey,
    /// A user token and the API token.
    UserAndApiKey,
}

impl Access {
    pub fn needs_user(self) -> bool {
        matches!(self, Access::User | Access::UserAndApiKey)
    }

    pub fn needs_api_key(self) -> bool {
        matches!(self, Access::ApiKey | Access::UserAndApiKey)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RoutePolicy {
    rules: HashMap<String, HashMap<Method, Access>>,
}

impl RoutePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the access of `method` on `path`, replacing any earlier entry.
    ///
    /// ```rust
    /// use axum::http::Method;
    /// use mc_web::policy::{Access, RoutePolicy};
    ///
    /// let policy = RoutePolicy::new()
    ///     .with(Method::POST, "/api/auth/login", Access::Public)
    ///     .with(Method::DELETE, "/api/movies/{id}", Access::ApiKey);
    ///
    /// assert_eq!(policy.access(&Method::POST, "/api/auth/login"), Access::Public);
    /// assert_eq!(policy.access(&Method::GET, "/api/movies/{id}"), Access::User);
    /// ```
    pub fn with(mut self, method: Method, path: &str, access: Access) -> Self {
        self.rules
            .entry(String::from(path))
            .or_default()
            .insert(method, access);
        self
    }

    /// Same as [`RoutePolicy::with`] for several methods at once.
    pub fn with_all(mut self, methods: &[Method], path: &str, access: Access) -> Self {
        for method in methods {
            self = self.with(method.clone(), path, access);
        }
        self
    }

    pub fn access(&self, method: &Method, path: &str) -> Access {
        self.rules
            .get(path)
            .and_then(|methods| methods.get(method))
            .copied()
            .unwrap_or_default()
    }

    /// Listed routes, sorted by path.
    pub fn entries(&self) -> Vec<(&str, &Method, Access)> {
        let mut entries: Vec<_> = self
            .rules
            .iter()
            .flat_map(|(path, methods)| {
                methods
                    .iter()
                    .map(move |(method, access)| (path.as_str(), method, *access))
            })
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0).then_with(|| a.1.as_str().cmp(b.1.as_str())));
        entries
    }
}
