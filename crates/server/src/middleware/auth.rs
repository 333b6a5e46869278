//! Authentication middleware and extractors.
//!
//! Provides extractors for requiring a signed-in owner in route handlers.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use wishbox_core::api::ErrorBody;

use crate::models::{CurrentOwner, session_keys};

/// Extractor that requires a signed-in owner.
///
/// Every caller is an API client, so a missing session always answers
/// 401 with a JSON body rather than redirecting anywhere.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireOwner(owner): RequireOwner,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", owner.email)
/// }
/// ```
pub struct RequireOwner(pub CurrentOwner);

/// Rejection returned when no owner is signed in.
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorBody::new("authentication required")),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for RequireOwner
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts.extensions.get::<Session>().ok_or(AuthRejection)?;

        // Get the current owner from the session
        let owner: CurrentOwner = session
            .get(session_keys::CURRENT_OWNER)
            .await
            .ok()
            .flatten()
            .ok_or(AuthRejection)?;

        Ok(Self(owner))
    }
}

/// Helper to set the current owner in the session (login).
///
/// Logout does not need a counterpart: it flushes the whole session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_owner(
    session: &Session,
    owner: &CurrentOwner,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_OWNER, owner).await
}
