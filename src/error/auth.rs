//! # Authentication failures
//!
//! Expected, user-facing outcomes of a request authentication check.
//! None of these are faults: each maps 1:1 onto an HTTP response of the
//! shape `{ "error": "<message>" }`.
//!
//! | Variant | Status | Message |
//! |---|---|---|
//! | [`AuthFailure::MissingCredential`] | 401 | `Unauthorized` |
//! | [`AuthFailure::InvalidCredential`] | 401 | `Invalid or expired token` |
//! | [`AuthFailure::UnknownPrincipal`] | 404 | `User not found` |
//!
//! Infrastructure faults (database unreachable, etc.) are **not** modelled
//! here; they travel as `anyhow::Error` and are shaped by
//! [`internal_error_response`] at the HTTP boundary only.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::entity::NotFoundError;

/// Why a presented token was not accepted.
///
/// Clients only ever see the collapsed [`AuthFailure::InvalidCredential`]
/// message; the reason is kept for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenRejection {
    #[error("token is expired")]
    Expired,
    #[error("token signature does not match")]
    BadSignature,
    #[error("token is malformed")]
    Malformed,
    #[error("token carries no user identifier")]
    MissingIdentifier,
}

/// Terminal failure of the authentication guard sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFailure {
    /// No token cookie on the request.
    #[error("Unauthorized")]
    MissingCredential,

    /// A token was present but failed verification.
    #[error("Invalid or expired token")]
    InvalidCredential(#[source] TokenRejection),

    /// The token was valid but its subject no longer exists.
    #[error(transparent)]
    UnknownPrincipal(#[from] NotFoundError),
}

impl AuthFailure {
    pub fn unknown_user() -> Self {
        Self::UnknownPrincipal(NotFoundError::user())
    }

    /// HTTP status the failure is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingCredential | Self::InvalidCredential(_) => StatusCode::UNAUTHORIZED,
            Self::UnknownPrincipal(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Client-facing message.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Pre-shaped response value (`status` + `{ error }` body).
    pub fn to_failure_response(&self) -> FailureResponse {
        FailureResponse {
            status: self.status().as_u16(),
            body: ErrorBody {
                error: self.message(),
            },
        }
    }
}

/// JSON body of every failure response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// An HTTP-shaped failure independent of any web framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureResponse {
    pub status: u16,
    pub body: ErrorBody,
}

impl IntoResponse for AuthFailure {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Generic 500 used when a store fault reaches the HTTP boundary.
pub fn internal_error_response() -> Response {
    let body = ErrorBody {
        error: "Internal Server Error".into(),
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
