//! Response bodies of the authentication endpoints.

use serde::{Deserialize, Serialize};

use crate::CONNECTION_TOKEN_TYPE;
use crate::user_store::UserView;

/// Login response.
///
/// ```json
/// {
///   "access_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "token_type": "Bearer"
/// }
/// ```
#[derive(Debug, Deserialize, Serialize)]
pub struct AuthBody {
    pub access_token: String,
    pub token_type: String,
}

impl AuthBody {
    /// # Examples
    ///
    /// ```rust
    /// use mc_auth::auth_body::AuthBody;
    ///
    /// let response = AuthBody::new("some_token".to_string());
    /// assert_eq!(response.token_type, "Bearer");
    /// ```
    pub fn new(access_token: String) -> Self {
        Self {
            access_token,
            token_type: String::from(CONNECTION_TOKEN_TYPE),
        }
    }
}

/// Registration response: `{"user": {"id": 2, "username": "newuser"}}`.
#[derive(Debug, Deserialize, Serialize)]
pub struct RegisterBody {
    pub user: UserView,
}

/// Credentials accepted by login and registration.
///
/// Absent fields deserialize as empty strings so that the service, not the
/// JSON layer, reports them as missing credentials.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthPayload {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}
