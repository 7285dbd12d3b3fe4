//! Registration, login and token verification.
//!
//! [`AuthService`] owns the [`UserStore`] and the [`TokenSigner`]. It is
//! created once at startup, seeded with the demo account
//! ([`DEMO_USERNAME`] / [`DEMO_PASSWORD`]) and shared by every request.
//!
//! # Examples
//!
//! ```rust
//! use mc_auth::service::{AuthConfig, AuthService};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> mc_auth::prelude::Result<()> {
//! let auth = AuthService::with_demo_user(AuthConfig::default()).await?;
//! let body = auth.login("user", "12345").await?;
//! let claims = auth.verify_token(&body.access_token)?;
//! assert_eq!(claims.username, "user");
//! assert_eq!(claims.sub, 1);
//! # Ok(())
//! # }
//! ```

use chrono::{TimeDelta, Utc};

use crate::auth_body::AuthBody;
use crate::prelude::*;
use crate::secret_hash::{generate_secret_hash, is_secret_valid};
use crate::token::{Claims, TokenSigner};
use crate::user_store::{UserStore, UserView};

pub const DEMO_USERNAME: &str = "user";
pub const DEMO_PASSWORD: &str = "12345";
pub const DEFAULT_JWT_SECRET: &str = "demo-jwt-secret";
pub const DEFAULT_TOKEN_TTL: TimeDelta = TimeDelta::days(7);

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Secret used to sign and verify access tokens.
    pub jwt_secret: String,
    /// Lifetime of issued tokens.
    pub token_ttl: TimeDelta,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::from(DEFAULT_JWT_SECRET),
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }
}

#[derive(Debug)]
pub struct AuthService {
    users: UserStore,
    signer: TokenSigner,
    token_ttl: TimeDelta,
}

impl AuthService {
    pub fn new(config: AuthConfig, users: UserStore) -> Self {
        Self {
            users,
            signer: TokenSigner::new(config.jwt_secret),
            token_ttl: config.token_ttl,
        }
    }

    /// Creates a service over an empty store and registers the demo account.
    pub async fn with_demo_user(config: AuthConfig) -> Result<Self> {
        let service = Self::new(config, UserStore::new());
        service.register(DEMO_USERNAME, DEMO_PASSWORD).await?;
        Ok(service)
    }

    pub fn users(&self) -> &UserStore {
        &self.users
    }

    /// Registers a new user and returns its public view.
    pub async fn register(&self, username: &str, password: &str) -> Result<UserView> {
        if username.is_empty() || password.is_empty() {
            return Err(Error::MissingCredentials);
        }
        if self.users.find(username).await.is_some() {
            return Err(Error::UserExists(String::from(username)));
        }

        let hash = generate_secret_hash(password)?;
        let user = self.users.insert(username, hash).await?;
        log::info!("Registered user {} with id {}", user.username, user.id);
        Ok(UserView::from(&user))
    }

    /// Returns the user when `password` matches, `None` otherwise.
    pub async fn validate(&self, username: &str, password: &str) -> Option<UserView> {
        let user = self.users.find(username).await?;
        match is_secret_valid(password, &user.password_hash) {
            Ok(true) => Some(UserView::from(&user)),
            Ok(false) => None,
            Err(err) => {
                log::error!("Stored hash for {username} is unreadable {err}");
                None
            }
        }
    }

    /// Checks the credentials and issues an access token.
    ///
    /// Unknown users and wrong passwords both fail with
    /// [`Error::WrongCredentials`].
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthBody> {
        let user = self
            .validate(username, password)
            .await
            .ok_or(Error::WrongCredentials)?;

        let claims = Claims::new(
            &user.username,
            user.id,
            Utc::now().timestamp(),
            self.token_ttl,
        );
        let token = self.signer.issue(&claims).map_err(|err| {
            log::error!("Failed to sign token {err}");
            err
        })?;
        Ok(AuthBody::new(token))
    }

    /// Verifies signature and expiry and returns the token's claims.
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        self.signer.verify(token)
    }
}
