//! OAuth route handlers for the identity provider flow.
//!
//! Handles the browser-facing part of sign-in:
//! - Login: Redirects to the provider's authorization page
//! - Callback: Validates state, exchanges the code, resolves the identity
//! - Logout: Destroys the session
//!
//! Login and callback are redirect flows driven by the browser, so their
//! failures send the owner back into the SPA with an `auth_error` query
//! flag instead of answering JSON.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use rand::Rng;
use serde::Deserialize;
use tower_sessions::Session;

use wishbox_core::api::OwnerProfile;

use crate::error::AppError;
use crate::middleware::{RequireOwner, set_current_owner};
use crate::models::{CurrentOwner, session_keys};
use crate::state::AppState;

/// Query parameters from the provider's OAuth callback.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    /// Authorization code to exchange for a token.
    pub code: Option<String>,
    /// State parameter for CSRF protection.
    pub state: Option<String>,
    /// Error code if authorization failed.
    pub error: Option<String>,
    /// Error description.
    pub error_description: Option<String>,
}

/// Generate a cryptographically secure random string.
fn generate_random_string(length: usize) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            // SAFETY: idx is always within bounds since random_range returns 0..CHARSET.len()
            char::from(*CHARSET.get(idx).expect("idx within bounds"))
        })
        .collect()
}

/// Redirect into the SPA, optionally with a query string.
fn app_redirect(state: &AppState, query: &str) -> Response {
    Redirect::to(&format!("{}/{query}", state.config().public_origin())).into_response()
}

/// Initiate sign-in with the identity provider.
///
/// Generates a state parameter, stores it in the session, and redirects
/// to the provider's authorization page.
///
/// # Route
///
/// `GET /auth/login`
pub async fn login(State(state): State<AppState>, session: Session) -> Response {
    // Generate CSRF state
    let oauth_state = generate_random_string(32);

    // Store in session for validation on callback
    if let Err(e) = session
        .insert(session_keys::OAUTH_STATE, &oauth_state)
        .await
    {
        tracing::error!("Failed to store OAuth state in session: {}", e);
        return app_redirect(&state, "?auth_error=session");
    }

    // Build the redirect URI
    let redirect_uri = format!("{}/auth/callback", state.config().base_url);

    // Generate and redirect to authorization URL
    let auth_url = state.provider().authorization_url(&redirect_uri, &oauth_state);

    Redirect::to(&auth_url).into_response()
}

/// Handle the provider's OAuth callback.
///
/// Validates the state parameter, exchanges the authorization code for a
/// token, resolves the token to an identity, and signs the owner in.
///
/// # Route
///
/// `GET /auth/callback`
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CallbackQuery>,
) -> Response {
    // Check for OAuth errors from the provider
    if let Some(error) = query.error {
        let description = query.error_description.unwrap_or_default();
        tracing::warn!("Provider OAuth error: {} - {}", error, description);
        return app_redirect(&state, "?auth_error=provider_denied");
    }

    // Verify we have an authorization code
    let Some(code) = query.code else {
        tracing::warn!("OAuth callback missing code");
        return app_redirect(&state, "?auth_error=missing_code");
    };

    // Verify state parameter (CSRF protection)
    let Some(returned_state) = query.state else {
        tracing::warn!("OAuth callback missing state");
        return app_redirect(&state, "?auth_error=missing_state");
    };

    let stored_state: Option<String> = session.get(session_keys::OAUTH_STATE).await.ok().flatten();

    if stored_state.as_ref() != Some(&returned_state) {
        tracing::warn!("OAuth state mismatch");
        return app_redirect(&state, "?auth_error=invalid_state");
    }

    // Clear the stored state (one-time use)
    let _ = session.remove::<String>(session_keys::OAUTH_STATE).await;

    // Build redirect URI (must match the one used in authorization request)
    let redirect_uri = format!("{}/auth/callback", state.config().base_url);

    // Exchange code for an access token
    let token = match state.provider().exchange_code(&code, &redirect_uri).await {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("Failed to exchange OAuth code: {}", e);
            return app_redirect(&state, "?auth_error=token_exchange");
        }
    };

    // Resolve the token to an identity
    let user = match state.provider().fetch_user(&token).await {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("Failed to fetch provider identity: {}", e);
            return app_redirect(&state, "?auth_error=userinfo");
        }
    };

    // Sign the owner in
    let owner = CurrentOwner {
        id: user.id,
        email: user.email,
    };
    if let Err(e) = set_current_owner(&session, &owner).await {
        tracing::error!("Failed to store owner in session: {}", e);
        return app_redirect(&state, "?auth_error=session");
    }

    tracing::info!(owner_id = %owner.id, "Owner signed in");

    // Land back in the SPA
    app_redirect(&state, "")
}

/// Sign out the current owner.
///
/// Destroys the session, including its server-side record.
///
/// # Route
///
/// `POST /auth/logout`
pub async fn logout(session: Session) -> Result<StatusCode, AppError> {
    session
        .flush()
        .await
        .map_err(|e| AppError::Internal(format!("failed to destroy session: {e}")))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Return the signed-in owner's profile.
///
/// # Route
///
/// `GET /api/me`
pub async fn me(RequireOwner(owner): RequireOwner) -> Json<OwnerProfile> {
    Json(OwnerProfile {
        id: owner.id,
        email: owner.email,
    })
}
