//! # JWT issuing and verification
//!
//! Pure JWT helpers: nothing here reads the environment or global state.
//! The HMAC secret is always supplied by the caller (typically from
//! [`AuthConfig`](crate::config::auth::AuthConfig)).
//!
//! Verification never panics and never uses errors for control flow: it
//! yields either [`DecodedClaims`] or a [`TokenRejection`] describing why
//! the token was refused.
//!
//! ## Provided items
//! - [`create_jwt`] — sign a token for a user id
//! - [`decode_jwt`] — verify signature + expiry and decode the claims
//! - [`TokenVerifier`] / [`JwtVerifier`] — the seam used by the authenticator

use anyhow::Context;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::error::auth::TokenRejection;

/// Claims carried by a verified token.
///
/// ## Fields
/// - `id`: identifier of the user record the token was issued for
/// - `exp`: expiration time (UNIX timestamp, seconds); tokens issued
///   without one never expire
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DecodedClaims {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<usize>,
}

/// Wire form of the payload. `id` is optional here so that a token signed
/// without it is reported as [`TokenRejection::MissingIdentifier`] rather
/// than as a generic decode failure.
#[derive(Deserialize)]
struct RawClaims {
    id: Option<String>,
    exp: Option<usize>,
}

/// Creates a signed HS256 token for the given user id.
///
/// `ttl` may be negative, which produces an already-expired token.
///
/// ## Errors
/// Returns an error if the expiration overflows or encoding fails.
///
/// ## Example
/// ```
/// use chrono::Duration;
/// use session_guard::auth::jwt::create_jwt;
///
/// let token = create_jwt("u1", "test-secret", Duration::hours(1)).unwrap();
/// assert_eq!(token.split('.').count(), 3);
/// ```
pub fn create_jwt(id: &str, secret: &str, ttl: Duration) -> anyhow::Result<String> {
    let expiration = Utc::now()
        .checked_add_signed(ttl)
        .context("token expiration is out of range")?
        .timestamp()
        .max(0) as usize;

    let claims = DecodedClaims {
        id: id.to_string(),
        exp: Some(expiration),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

/// Verifies a token's signature and expiry, then decodes its claims.
///
/// ## Rejections
/// - [`TokenRejection::Expired`] — `exp` is in the past (a token without
///   `exp` is accepted)
/// - [`TokenRejection::BadSignature`] — signed with a different secret
/// - [`TokenRejection::Malformed`] — not a JWT, bad encoding, wrong algorithm
/// - [`TokenRejection::MissingIdentifier`] — no `id` claim, or an empty one
///
/// ## Example
/// ```
/// use chrono::Duration;
/// use session_guard::auth::jwt::{create_jwt, decode_jwt};
///
/// let token = create_jwt("u1", "test-secret", Duration::hours(1)).unwrap();
/// let claims = decode_jwt(&token, "test-secret").unwrap();
/// assert_eq!(claims.id, "u1");
/// ```
pub fn decode_jwt(token: &str, secret: &str) -> Result<DecodedClaims, TokenRejection> {
    let decoded = decode::<RawClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation(),
    )
    .map_err(|e| rejection_from(e.kind()))?;

    let RawClaims { id, exp } = decoded.claims;
    match id {
        Some(id) if !id.is_empty() => Ok(DecodedClaims { id, exp }),
        _ => Err(TokenRejection::MissingIdentifier),
    }
}

/// HS256 with `exp` checked when present but not required.
fn validation() -> Validation {
    let mut validation = Validation::default();
    validation.required_spec_claims.clear();
    validation.validate_exp = true;
    validation
}

fn rejection_from(kind: &ErrorKind) -> TokenRejection {
    match kind {
        ErrorKind::ExpiredSignature => TokenRejection::Expired,
        ErrorKind::InvalidSignature => TokenRejection::BadSignature,
        _ => TokenRejection::Malformed,
    }
}

/// Token verification capability consumed by the authenticator.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str, secret: &str) -> Result<DecodedClaims, TokenRejection>;
}

/// [`TokenVerifier`] backed by [`decode_jwt`] (HS256, default leeway).
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtVerifier;

impl TokenVerifier for JwtVerifier {
    fn verify(&self, token: &str, secret: &str) -> Result<DecodedClaims, TokenRejection> {
        decode_jwt(token, secret)
    }
}
