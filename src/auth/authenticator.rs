//! # Request authentication
//!
//! [`RequestAuthenticator`] turns the cookies of an inbound request into
//! either the authenticated [`UserIdentity`] or a terminal [`AuthFailure`].
//!
//! The check is a linear chain of gates:
//!
//! ```text
//! NoToken ──cookie──▶ TokenPresent ──verify──▶ Verified ──lookup──▶ UserResolved
//!    │                     │                       │
//!    ▼                     ▼                       ▼
//! 401 Unauthorized   401 Invalid or expired   404 User not found
//! ```
//!
//! Failing a gate short-circuits; nothing after it runs. In particular the
//! user store is never contacted for a missing or invalid token.
//!
//! Store faults are *not* authentication outcomes: they surface as the
//! outer `Err` of [`RequestAuthenticator::authenticate`].

use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::auth::cookie::CookieReader;
use crate::auth::jwt::{create_jwt, JwtVerifier, TokenVerifier};
use crate::auth::principal::UserIdentity;
use crate::config::auth::AuthConfig;
use crate::error::auth::AuthFailure;
use crate::store::user::UserStore;

/// Outcome of an authentication check.
pub type AuthResult = std::result::Result<UserIdentity, AuthFailure>;

pub struct RequestAuthenticator {
    config: AuthConfig,
    verifier: Arc<dyn TokenVerifier>,
    store: Arc<dyn UserStore>,
}

impl RequestAuthenticator {
    /// Builds an authenticator that verifies HS256 JWTs.
    pub fn new(config: AuthConfig, store: Arc<dyn UserStore>) -> Self {
        Self::with_verifier(config, Arc::new(JwtVerifier), store)
    }

    pub fn with_verifier(
        config: AuthConfig,
        verifier: Arc<dyn TokenVerifier>,
        store: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            config,
            verifier,
            store,
        }
    }

    /// Runs the guard sequence against a request's cookies.
    ///
    /// # Returns
    /// - `Ok(Ok(user))` when every gate passes
    /// - `Ok(Err(failure))` for a missing token, an invalid or expired
    ///   token, or a token whose user no longer exists
    /// - `Err(_)` when the store cannot be reached or queried
    pub async fn authenticate<C>(&self, cookies: &C) -> Result<AuthResult>
    where
        C: CookieReader + Sync + ?Sized,
    {
        let Some(token) = cookies
            .cookie(&self.config.cookie_name)
            .filter(|t| !t.is_empty())
        else {
            debug!(cookie = %self.config.cookie_name, "no auth token on request");
            return Ok(Err(AuthFailure::MissingCredential));
        };

        let claims = match self.verifier.verify(token, &self.config.jwt_secret) {
            Ok(claims) => claims,
            Err(reason) => {
                debug!(%reason, "auth token rejected");
                return Ok(Err(AuthFailure::InvalidCredential(reason)));
            }
        };

        self.store.connect().await?;

        match self.store.find_by_id(&claims.id).await? {
            Some(user) => Ok(Ok(user)),
            None => {
                debug!(user_id = %claims.id, "token references unknown user");
                Ok(Err(AuthFailure::unknown_user()))
            }
        }
    }

    /// Signs a token for `user` using the configured secret and lifetime.
    ///
    /// The counterpart of [`authenticate`](Self::authenticate) for sign-in
    /// handlers that need to set the cookie.
    pub fn issue_token(&self, user: &UserIdentity) -> Result<String> {
        create_jwt(&user.id, &self.config.jwt_secret, self.config.token_ttl())
    }
}
