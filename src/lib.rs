//! # session_guard
//!
//! Cookie/JWT request authentication for axum backends.
//!
//! A request is authenticated by reading a bearer token from a cookie,
//! verifying it against a shared secret, and resolving the user id it
//! carries against a user store. The outcome is either the
//! [`UserIdentity`](auth::UserIdentity) or an HTTP-shaped
//! [`AuthFailure`](error::AuthFailure).
//!
//! ## Example usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use session_guard::auth::RequestAuthenticator;
//! use session_guard::config::app::AppConfig;
//! use session_guard::store::DbUserStore;
//!
//! let cfg = AppConfig::from_env().expect("configuration");
//! let store = DbUserStore::mysql(cfg.db.clone(), &cfg.auth.users_table);
//! let authenticator = Arc::new(RequestAuthenticator::new(cfg.auth, Arc::new(store)));
//! ```

// ===============================
// Re-exports of external crates
// ===============================

pub use anyhow;
pub use axum;
pub use axum_extra;
pub use chrono;
pub use dotenvy;
pub use jsonwebtoken;
pub use mysql;
pub use serde;
pub use serde_json;
pub use tokio;

// ===============================
// Public modules
// ===============================
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod store;
pub mod web;
