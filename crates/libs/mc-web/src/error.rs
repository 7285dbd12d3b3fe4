//! Main Crate Error

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use mc_auth::error::Error as AuthError;
use mc_catalog::error::Error as CatalogError;
use serde_json::json;
use tracing::error;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /* Api Errors */
    #[error("Invalid API token")]
    ApiTokenRejected,

    #[error("Context Missing")]
    CtxMissing,

    /* Extractor Errors */
    #[error(transparent)]
    Json(#[from] JsonRejection),

    #[error(transparent)]
    Query(#[from] QueryRejection),

    #[error(transparent)]
    Path(#[from] PathRejection),
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        error!("Creating API error response for error: {:?}", self);
        let (status, message) = match &self {
            Error::ApiTokenRejected => (StatusCode::UNAUTHORIZED, String::from("Invalid API token")),
            Error::CtxMissing => (StatusCode::UNAUTHORIZED, String::from("Missing credentials")),
            Error::Json(rejection) => (rejection.status(), rejection.body_text()),
            Error::Query(rejection) => (rejection.status(), rejection.body_text()),
            Error::Path(rejection) => (rejection.status(), rejection.body_text()),
            Error::Auth(err) => match err {
                AuthError::InvalidToken => (
                    StatusCode::UNAUTHORIZED,
                    String::from("Invalid authentication token"),
                ),
                AuthError::TokenMissing => (
                    StatusCode::UNAUTHORIZED,
                    String::from("Authentication required"),
                ),
                AuthError::TokenExpired => (
                    StatusCode::UNAUTHORIZED,
                    String::from("Authentication token expired"),
                ),
                AuthError::WrongCredentials => {
                    (StatusCode::UNAUTHORIZED, String::from("Invalid credentials"))
                }
                AuthError::MissingCredentials => {
                    (StatusCode::BAD_REQUEST, String::from("Missing credentials"))
                }
                AuthError::UserExists(_) => (StatusCode::CONFLICT, err.to_string()),
                AuthError::TokenCreation(_) | AuthError::SigningKey | AuthError::PasswordHash(_) => {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        String::from("Internal server error"),
                    )
                }
            },
            Error::Catalog(err) => match err {
                CatalogError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
                CatalogError::Conflict { .. } => (StatusCode::CONFLICT, err.to_string()),
                CatalogError::Validation(_) => (StatusCode::BAD_REQUEST, err.to_string()),
                CatalogError::Seed(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    String::from("Internal server error"),
                ),
            },
        };

        let body = Json(json!({
            "error": {
                "message": message,
                "status": status.as_u16()
            }
        }));
        (status, body).into_response()
    }
}
