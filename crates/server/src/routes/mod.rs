//! HTTP route handlers for the Wishbox API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database ping)
//!
//! # Auth (browser-facing OAuth flow)
//! GET  /auth/login             - Redirect to the identity provider
//! GET  /auth/callback          - Handle the OAuth callback
//! POST /auth/logout            - Destroy the session
//!
//! # Owner API (requires session)
//! GET    /api/me               - Current owner profile
//! GET    /api/wishlist         - Wishlist summary (creates lazily)
//! POST   /api/wishlist/share   - Regenerate the share slug
//! GET    /api/items            - List items, newest first
//! POST   /api/items            - Add an item
//! GET    /api/items/{id}       - Fetch one item
//! PATCH  /api/items/{id}       - Update an item
//! DELETE /api/items/{id}       - Remove an item
//!
//! # Public
//! GET  /share/{slug}           - Read-only shared wishlist view
//! ```
//!
//! The health endpoints live in `main.rs` next to the listener setup.

pub mod auth;
pub mod items;
pub mod share;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login))
        .route("/callback", get(auth::callback))
        .route("/logout", post(auth::logout))
}

/// Create the owner-scoped API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(auth::me))
        .route("/wishlist", get(wishlist::show))
        .route("/wishlist/share", post(wishlist::regenerate_share))
        .route("/items", get(items::index).post(items::create))
        .route(
            "/items/{id}",
            get(items::show).patch(items::update).delete(items::remove),
        )
}

/// Create all routes for the API server.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Auth routes
        .nest("/auth", auth_routes())
        // Owner API
        .nest("/api", api_routes())
        // Public share view
        .route("/share/{slug}", get(share::show))
}
