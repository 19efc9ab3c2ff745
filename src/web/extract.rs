use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts, OptionalFromRequestParts},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::warn;

use crate::auth::authenticator::RequestAuthenticator;
use crate::auth::principal::UserIdentity;
use crate::error::auth::internal_error_response;

/// Extractor yielding the authenticated user of a request.
///
/// # Overview
///
/// Runs [`RequestAuthenticator::authenticate`] against the request's
/// cookies. The authenticator is taken from router state, so the state type
/// must expose an `Arc<RequestAuthenticator>` via [`FromRef`].
///
/// # Rejections
///
/// - 401 / 404 with `{ "error": "..." }` for authentication failures
/// - 500 with `{ "error": "Internal Server Error" }` when the user store
///   fails; the fault itself is only logged
///
/// Use `Option<CurrentUser>` for routes that also serve anonymous
/// requests: any authentication failure becomes `None`, store faults are
/// still rejected.
///
/// # Example
///
/// ```ignore
/// async fn me(CurrentUser(user): CurrentUser) -> Json<UserIdentity> {
///     Json(user)
/// }
///
/// let app = Router::new()
///     .route("/me", get(me))
///     .with_state(Arc::new(authenticator));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentUser(pub UserIdentity);

impl<S> FromRequestParts<S> for CurrentUser
where
    Arc<RequestAuthenticator>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let authenticator = Arc::<RequestAuthenticator>::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);

        match authenticator.authenticate(&jar).await {
            Ok(Ok(user)) => Ok(CurrentUser(user)),
            Ok(Err(failure)) => Err(failure.into_response()),
            Err(err) => {
                warn!(error = %format!("{err:#}"), "user store failed during authentication");
                Err(internal_error_response())
            }
        }
    }
}

impl<S> OptionalFromRequestParts<S> for CurrentUser
where
    Arc<RequestAuthenticator>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        let authenticator = Arc::<RequestAuthenticator>::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);

        match authenticator.authenticate(&jar).await {
            Ok(result) => Ok(result.ok().map(CurrentUser)),
            Err(err) => {
                warn!(error = %format!("{err:#}"), "user store failed during authentication");
                Err(internal_error_response())
            }
        }
    }
}
