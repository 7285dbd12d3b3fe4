//! Service configuration.
//!
//! Every setting comes from an environment variable, optionally loaded from
//! a `.env` file in the working directory. Unset or blank variables take
//! their default; a variable that is set but cannot be parsed stops the
//! service.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use chrono::TimeDelta;
use mc_auth::service::{AuthConfig, DEFAULT_JWT_SECRET, DEFAULT_TOKEN_TTL};
use mc_web::guard::DEFAULT_API_TOKEN;
use tracing::warn;

use crate::prelude::*;

pub const HOST_VAR: &str = "MCD_HOST";
pub const PORT_VAR: &str = "PORT";
pub const JWT_SECRET_VAR: &str = "JWT_SECRET";
pub const API_TOKEN_VAR: &str = "API_TOKEN";
pub const TOKEN_TTL_VAR: &str = "TOKEN_TTL_SECS";
pub const SEED_CATALOG_VAR: &str = "SEED_CATALOG";

pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub jwt_secret: String,
    /// Shared secret of the administrative endpoints.
    pub api_token: String,
    pub token_ttl: TimeDelta,
    pub seed_catalog: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
            jwt_secret: String::from(DEFAULT_JWT_SECRET),
            api_token: String::from(DEFAULT_API_TOKEN),
            token_ttl: DEFAULT_TOKEN_TTL,
            seed_catalog: true,
        }
    }
}

impl ServerConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                warn!("Ignoring unreadable .env file: {err}");
            }
        }
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from `lookup`, which returns the raw value of
    /// a variable or `None` when it is unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let lookup = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();
        let ttl_secs = parse(&lookup, TOKEN_TTL_VAR, defaults.token_ttl.num_seconds())?;
        let token_ttl = TimeDelta::try_seconds(ttl_secs)
            .filter(|ttl| *ttl > TimeDelta::zero())
            .ok_or_else(|| Error::InvalidConfig {
                var: TOKEN_TTL_VAR,
                value: ttl_secs.to_string(),
            })?;

        Ok(Self {
            host: parse(&lookup, HOST_VAR, defaults.host)?,
            port: parse(&lookup, PORT_VAR, defaults.port)?,
            jwt_secret: lookup(JWT_SECRET_VAR).unwrap_or(defaults.jwt_secret),
            api_token: lookup(API_TOKEN_VAR).unwrap_or(defaults.api_token),
            token_ttl,
            seed_catalog: parse(&lookup, SEED_CATALOG_VAR, defaults.seed_catalog)?,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            jwt_secret: self.jwt_secret.clone(),
            token_ttl: self.token_ttl,
        }
    }
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T> {
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| Error::InvalidConfig { var, value: raw }),
    }
}

/// Secrets are never printed.
impl fmt::Display for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "addr={} jwt_secret=<redacted> api_token=<redacted> token_ttl={}s seed_catalog={}",
            self.addr(),
            self.token_ttl.num_seconds(),
            self.seed_catalog
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (String::from(*k), String::from(*v)))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() -> Result<()> {
        let config = ServerConfig::from_lookup(lookup(&[]))?;
        assert_eq!(config.addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.jwt_secret, "demo-jwt-secret");
        assert_eq!(config.api_token, "demo-supersecret-token");
        assert_eq!(config.token_ttl.num_seconds(), 604_800);
        assert!(config.seed_catalog);
        Ok(())
    }

    #[test]
    fn reads_every_variable() -> Result<()> {
        let config = ServerConfig::from_lookup(lookup(&[
            ("MCD_HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("JWT_SECRET", "s3cret"),
            ("API_TOKEN", "admin"),
            ("TOKEN_TTL_SECS", "60"),
            ("SEED_CATALOG", "false"),
        ]))?;
        assert_eq!(config.addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.auth_config().jwt_secret, "s3cret");
        assert_eq!(config.api_token, "admin");
        assert_eq!(config.auth_config().token_ttl, TimeDelta::seconds(60));
        assert!(!config.seed_catalog);
        Ok(())
    }

    #[test]
    fn blank_variables_take_the_default() -> Result<()> {
        let config = ServerConfig::from_lookup(lookup(&[
            ("JWT_SECRET", ""),
            ("API_TOKEN", "  "),
            ("PORT", ""),
            ("SEED_CATALOG", "\t"),
        ]))?;
        assert_eq!(config.jwt_secret, DEFAULT_JWT_SECRET);
        assert_eq!(config.api_token, DEFAULT_API_TOKEN);
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.seed_catalog);
        Ok(())
    }

    #[test]
    fn parse_errors_name_the_variable() {
        for (var, value) in [
            ("PORT", "eighty"),
            ("MCD_HOST", "localhost:3000"),
            ("TOKEN_TTL_SECS", "0"),
            ("TOKEN_TTL_SECS", "-5"),
            ("SEED_CATALOG", "maybe"),
        ] {
            match ServerConfig::from_lookup(lookup(&[(var, value)])) {
                Err(Error::InvalidConfig { var: reported, .. }) => assert_eq!(reported, var),
                other => panic!("{var}={value} gave {other:?}"),
            }
        }
    }

    #[test]
    fn display_hides_secrets() {
        let config = ServerConfig {
            jwt_secret: String::from("top-secret-signing-key"),
            api_token: String::from("top-secret-api-token"),
            ..ServerConfig::default()
        };
        let shown = config.to_string();
        assert!(!shown.contains("top-secret"));
        assert!(shown.contains("127.0.0.1:3000"));
    }
}
