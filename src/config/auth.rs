//! # Authentication Configuration
//!
//! Everything the authenticator needs that is fixed for the lifetime of
//! the process: the token secret, the cookie carrying the token, the
//! lifetime of issued tokens and the table users are read from.
//!
//! | Variable | Description | Default |
//! |---|---|---|
//! | `JWT_SECRET` | HMAC secret used to sign and verify tokens | *required* |
//! | `AUTH_COOKIE_NAME` | cookie holding the bearer token | `token` |
//! | `JWT_TTL_HOURS` | lifetime of issued tokens (hours) | `48` |
//! | `AUTH_USERS_TABLE` | table holding user records | `users` |
//!
//! The value is built once at startup and passed to the authenticator by
//! the composition root; nothing reads it from ambient state afterwards.

use std::{env, fmt};

use anyhow::{bail, Result};
use chrono::Duration;

use crate::config::env::{read_string_from, read_u32_from};

pub const DEFAULT_COOKIE_NAME: &str = "token";
pub const DEFAULT_TTL_HOURS: u32 = 48;
pub const DEFAULT_USERS_TABLE: &str = "users";

#[derive(Clone, PartialEq, Eq)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub cookie_name: String,
    pub ttl_hours: u32,
    pub users_table: String,
}

impl AuthConfig {
    /// Builds a config with defaults for everything but the secret.
    ///
    /// # Example
    /// ```rust
    /// use session_guard::config::auth::AuthConfig;
    ///
    /// let cfg = AuthConfig::new("s3cret");
    /// assert_eq!(cfg.cookie_name, "token");
    /// assert_eq!(cfg.users_table, "users");
    /// ```
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            cookie_name: DEFAULT_COOKIE_NAME.into(),
            ttl_hours: DEFAULT_TTL_HOURS,
            users_table: DEFAULT_USERS_TABLE.into(),
        }
    }

    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|k| env::var(k).ok())
    }

    /// Loads configuration using a custom key provider.
    ///
    /// # Errors
    /// - `JWT_SECRET` is missing or blank
    /// - `AUTH_USERS_TABLE` is not a plain SQL identifier
    pub fn from_env_with<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(jwt_secret) = read_string_from(&get, "JWT_SECRET") else {
            bail!("JWT_SECRET is not set");
        };

        let cookie_name =
            read_string_from(&get, "AUTH_COOKIE_NAME").unwrap_or_else(|| DEFAULT_COOKIE_NAME.into());
        let ttl_hours = read_u32_from(&get, "JWT_TTL_HOURS", DEFAULT_TTL_HOURS);
        let users_table =
            read_string_from(&get, "AUTH_USERS_TABLE").unwrap_or_else(|| DEFAULT_USERS_TABLE.into());

        if !is_plain_identifier(&users_table) {
            bail!("AUTH_USERS_TABLE must contain only ASCII letters, digits and '_'");
        }

        Ok(Self {
            jwt_secret,
            cookie_name,
            ttl_hours,
            users_table,
        })
    }

    /// Lifetime applied to newly issued tokens.
    pub fn token_ttl(&self) -> Duration {
        Duration::hours(i64::from(self.ttl_hours))
    }
}

// The table name is spliced into SQL, so it is restricted up front.
fn is_plain_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("cookie_name", &self.cookie_name)
            .field("ttl_hours", &self.ttl_hours)
            .field("users_table", &self.users_table)
            .finish()
    }
}
