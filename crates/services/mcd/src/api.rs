//! HTTP routes of the service.
//!
//! Everything lives under `/api` except `/health`. Which guards protect a
//! route is decided by [`route_policy`]; reads need a user token, catalog
//! writes need the API token.

use std::net::SocketAddr;

use axum::{
    Router,
    http::Method,
    middleware,
    routing::{get, post},
};
use mc_catalog::page::PageRequest;
use mc_web::{
    mw_auth::{AccessGuard, mw_access_guard},
    policy::{Access, RoutePolicy},
};
use serde::Deserialize;
use tokio::task::JoinHandle;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::config::ServerConfig;
use crate::prelude::*;
use crate::state::AppState;

pub mod actors;
pub mod auth;
pub mod movies;
pub mod ratings;

fn api(path: &str) -> String {
    format!("/api/{path}")
}

/// `?q=&page=&limit=` of the search endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl SearchQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest {
            page: self.page,
            limit: self.limit,
        }
    }
}

/// Access of every route that does not simply need a user token.
pub fn route_policy() -> RoutePolicy {
    let writes = [Method::PUT, Method::DELETE];
    RoutePolicy::new()
        .with(Method::GET, "/health", Access::Public)
        .with(Method::POST, &api("auth/login"), Access::Public)
        .with(Method::POST, &api("auth/register"), Access::Public)
        .with(Method::POST, &api("movies"), Access::ApiKey)
        .with_all(&writes, &api("movies/{id}"), Access::ApiKey)
        .with(Method::POST, &api("actors"), Access::ApiKey)
        .with_all(&writes, &api("actors/{id}"), Access::ApiKey)
        .with(Method::POST, &api("ratings"), Access::ApiKey)
        .with_all(&writes, &api("ratings/{id}"), Access::ApiKey)
}

pub fn router(state: AppState, api_token: &str) -> Router {
    let guard = AccessGuard::new(state.auth.clone(), api_token, route_policy());

    Router::new()
        .route("/health", get(health))
        .route(&api("auth/login"), post(auth::login))
        .route(&api("auth/register"), post(auth::register))
        .route(&api("auth/me"), get(auth::me))
        .route(
            &api("movies"),
            get(movies::list_movies).post(movies::create_movie),
        )
        .route(&api("movies/search"), get(movies::search_movies))
        .route(
            &api("movies/{id}"),
            get(movies::get_movie)
                .put(movies::update_movie)
                .delete(movies::delete_movie),
        )
        .route(
            &api("actors"),
            get(actors::list_actors).post(actors::create_actor),
        )
        .route(&api("actors/search"), get(actors::search_actors))
        .route(
            &api("actors/{id}"),
            get(actors::get_actor)
                .put(actors::update_actor)
                .delete(actors::delete_actor),
        )
        .route(&api("actors/{id}/movies"), get(actors::actor_movies))
        .route(
            &api("ratings"),
            get(ratings::list_ratings).post(ratings::create_rating),
        )
        .route(
            &api("ratings/{id}"),
            get(ratings::get_rating)
                .put(ratings::update_rating)
                .delete(ratings::delete_rating),
        )
        .route_layer(middleware::from_fn_with_state(guard, mw_access_guard))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds the configured address and serves the API on a new task.
pub async fn setup_api(
    config: &ServerConfig,
    state: AppState,
) -> Result<(SocketAddr, JoinHandle<Result<()>>)> {
    let app = router(state, &config.api_token);
    let listener = tokio::net::TcpListener::bind(config.addr()).await?;
    let addr = listener.local_addr()?;
    tracing::info!("listening on {addr}");

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await?;
        Ok(())
    });
    Ok((addr, handle))
}

async fn health() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use mc_web::guard::DEFAULT_API_TOKEN;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn app() -> Router {
        let config = ServerConfig {
            seed_catalog: false,
            ..ServerConfig::default()
        };
        let state = AppState::new(&config).await.expect("state");
        router(state, &config.api_token)
    }

    async fn call(
        app: &Router,
        method: Method,
        uri: &str,
        headers: &[(&str, &str)],
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let body = match body {
            Some(body) => {
                request = request.header("content-type", "application/json");
                Body::from(body.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(request.body(body).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, value)
    }

    async fn bearer(app: &Router) -> String {
        let (status, body) = call(
            app,
            Method::POST,
            "/api/auth/login",
            &[],
            Some(json!({"username": "user", "password": "12345"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        format!("Bearer {}", body["access_token"].as_str().expect("token"))
    }

    #[tokio::test]
    async fn health_is_public() {
        let app = app().await;
        let (status, body) = call(&app, Method::GET, "/health", &[], None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::String(String::from("OK")));
    }

    #[tokio::test]
    async fn login_and_me() {
        let app = app().await;
        let bearer = bearer(&app).await;

        let (status, body) = call(
            &app,
            Method::GET,
            "/api/auth/me",
            &[("authorization", bearer.as_str())],
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "user");
        assert_eq!(body["sub"], 1);

        let (status, body) = call(&app, Method::GET, "/api/auth/me", &[], None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["status"], 401);
    }

    #[tokio::test]
    async fn login_failure_is_unauthorized() {
        let app = app().await;
        let (status, body) = call(
            &app,
            Method::POST,
            "/api/auth/login",
            &[],
            Some(json!({"username": "user", "password": "wrong"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["message"], "Invalid credentials");
    }

    #[tokio::test]
    async fn register_status_codes() {
        let app = app().await;
        let (status, body) = call(
            &app,
            Method::POST,
            "/api/auth/register",
            &[],
            Some(json!({"username": "newuser", "password": "x"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({"user": {"id": 2, "username": "newuser"}}));

        let (status, _) = call(
            &app,
            Method::POST,
            "/api/auth/register",
            &[],
            Some(json!({"username": "user", "password": "x"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = call(
            &app,
            Method::POST,
            "/api/auth/register",
            &[],
            Some(json!({"username": "someone"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn writes_need_the_api_token() {
        let app = app().await;
        let bearer = bearer(&app).await;
        let movie = json!({"title": "Heat"});

        let (status, _) = call(
            &app,
            Method::POST,
            "/api/movies",
            &[("authorization", bearer.as_str())],
            Some(movie.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = call(
            &app,
            Method::POST,
            "/api/movies",
            &[("x-api-token", DEFAULT_API_TOKEN)],
            Some(movie),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["title"], "Heat");

        let (status, _) = call(
            &app,
            Method::DELETE,
            "/api/movies/1",
            &[("x-api-token", "nope")],
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn reads_need_a_user_token() {
        let app = app().await;
        let bearer = bearer(&app).await;

        for uri in ["/api/movies", "/api/actors/search?q=x", "/api/ratings"] {
            let (status, _) = call(&app, Method::GET, uri, &[], None).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");

            let (status, _) = call(
                &app,
                Method::GET,
                uri,
                &[("authorization", bearer.as_str())],
                None,
            )
            .await;
            assert_eq!(status, StatusCode::OK, "{uri}");
        }
    }

    #[tokio::test]
    async fn empty_api_token_locks_writes() {
        let config = ServerConfig {
            seed_catalog: false,
            ..ServerConfig::default()
        };
        let state = AppState::new(&config).await.expect("state");
        let app = router(state, "");
        let intruder = json!({"name": "Intruder"});

        for headers in [
            [("authorization", "Bearer ")],
            [("authorization", "Bearer")],
            [("x-api-token", "")],
        ] {
            let (status, body) = call(
                &app,
                Method::POST,
                "/api/actors",
                &headers,
                Some(intruder.clone()),
            )
            .await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{headers:?}");
            assert_eq!(body["error"]["status"], 401);
        }
    }

    #[tokio::test]
    async fn malformed_requests_get_json_errors() {
        let app = app().await;
        let bearer = bearer(&app).await;

        for uri in ["/api/movies/abc", "/api/movies?page=x", "/api/actors/search?limit=-1"] {
            let (status, body) = call(
                &app,
                Method::GET,
                uri,
                &[("authorization", bearer.as_str())],
                None,
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["error"]["status"], 400, "{uri}");
        }

        let request = Request::post("/api/auth/login")
            .header("content-type", "application/json")
            .body(Body::from("{\"username\": "))
            .expect("request");
        let response = app.clone().oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let body: Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(body["error"]["status"], 400);
    }

    #[tokio::test]
    async fn catalog_errors_map_to_status() {
        let app = app().await;
        let bearer = bearer(&app).await;
        let admin = [("x-api-token", DEFAULT_API_TOKEN)];

        let (status, body) = call(
            &app,
            Method::GET,
            "/api/movies/42",
            &[("authorization", bearer.as_str())],
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "Movie not found");

        let (status, _) = call(
            &app,
            Method::POST,
            "/api/ratings",
            &admin,
            Some(json!({"score": 5, "movieId": 42})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        call(&app, Method::POST, "/api/actors", &admin, Some(json!({"name": "Val Kilmer"}))).await;
        let (status, _) = call(
            &app,
            Method::POST,
            "/api/actors",
            &admin,
            Some(json!({"name": "Val Kilmer"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = call(
            &app,
            Method::POST,
            "/api/actors",
            &admin,
            Some(json!({"name": " "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn search_and_pagination_query() {
        let app = app().await;
        let bearer = bearer(&app).await;
        let admin = [("x-api-token", DEFAULT_API_TOKEN)];
        for title in ["Alien", "Aliens", "Alien 3", "Heat"] {
            call(&app, Method::POST, "/api/movies", &admin, Some(json!({"title": title}))).await;
        }

        let (status, body) = call(
            &app,
            Method::GET,
            "/api/movies/search?q=ALIEN&page=2&limit=2",
            &[("authorization", bearer.as_str())],
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 3);
        assert_eq!(body["page"], 2);
        assert_eq!(body["total_pages"], 2);
        assert_eq!(body["items"][0]["title"], "Alien 3");

        let (_, body) = call(
            &app,
            Method::GET,
            "/api/movies?page=9",
            &[("authorization", bearer.as_str())],
            None,
        )
        .await;
        assert_eq!(body["page"], 1);
        assert_eq!(body["items"].as_array().map(Vec::len), Some(4));
    }

    #[test]
    fn policy_covers_admin_writes() {
        let policy = route_policy();
        for path in ["/api/movies/{id}", "/api/actors/{id}", "/api/ratings/{id}"] {
            assert_eq!(policy.access(&Method::PUT, path), Access::ApiKey);
            assert_eq!(policy.access(&Method::DELETE, path), Access::ApiKey);
            assert_eq!(policy.access(&Method::GET, path), Access::User);
        }
        assert_eq!(
            policy.access(&Method::GET, "/api/actors/{id}/movies"),
            Access::User
        );
        assert_eq!(policy.access(&Method::GET, "/api/auth/me"), Access::User);
    }
}
