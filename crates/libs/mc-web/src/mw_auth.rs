//! Authentication middleware for protecting routes.
//!
//! [`mw_access_guard`] is attached with `Router::route_layer`, so it runs
//! after routing and sees the [`MatchedPath`] of the request. The route's
//! [`Access`] is looked up in the [`RoutePolicy`] and the guards it names
//! are applied before the handler runs.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use axum::{Router, http::Method, middleware, routing::get};
//! use mc_auth::service::{AuthConfig, AuthService};
//! use mc_auth::user_store::UserStore;
//! use mc_web::mw_auth::{AccessGuard, mw_access_guard};
//! use mc_web::policy::{Access, RoutePolicy};
//!
//! let auth = Arc::new(AuthService::new(AuthConfig::default(), UserStore::new()));
//! let policy = RoutePolicy::new().with(Method::GET, "/health", Access::Public);
//! let guard = AccessGuard::new(auth, "demo-supersecret-token", policy);
//!
//! let app: Router<()> = Router::new()
//!     .route("/health", get(|| async { "OK" }))
//!     .route_layer(middleware::from_fn_with_state(guard, mw_access_guard));
//! ```

use std::sync::Arc;

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use mc_auth::service::AuthService;
use tracing::debug;

use crate::guard::{access_guard, api_key_guard};
use crate::policy::{Access, RoutePolicy};
use crate::prelude::*;

/// State of [`mw_access_guard`].
#[derive(Clone)]
pub struct AccessGuard {
    auth: Arc<AuthService>,
    api_token: Arc<str>,
    policy: Arc<RoutePolicy>,
}

impl AccessGuard {
    pub fn new(auth: Arc<AuthService>, api_token: impl Into<Arc<str>>, policy: RoutePolicy) -> Self {
        Self {
            auth,
            api_token: api_token.into(),
            policy: Arc::new(policy),
        }
    }

    pub fn policy(&self) -> &RoutePolicy {
        &self.policy
    }

    fn access_of(&self, req: &Request) -> Access {
        let path = req
            .extensions()
            .get::<MatchedPath>()
            .map(MatchedPath::as_str)
            .unwrap_or_else(|| req.uri().path());
        self.policy.access(req.method(), path)
    }
}

/// Applies the guards the route policy names for the matched route.
///
/// On success of the user guard the request carries a [`crate::ctx::Ctx`].
pub async fn mw_access_guard(
    State(guard): State<AccessGuard>,
    mut req: Request,
    next: Next,
) -> Result<Response> {
    let access = guard.access_of(&req);
    debug!("{} {} requires {:?}", req.method(), req.uri().path(), access);

    if access.needs_api_key() {
        api_key_guard(&guard.api_token, req.headers())?;
    }
    if access.needs_user() {
        let ctx = access_guard(&guard.auth, req.headers())?;
        req.extensions_mut().insert(ctx);
    }
    Ok(next.run(req).await)
}
