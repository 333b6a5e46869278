//! Public share view route handler.
//!
//! The one endpoint that works without a session. It deliberately answers
//! the same 404 for a malformed slug, an unknown slug, and a slug that was
//! rotated away, so a link can't be probed for which case it hit.

use axum::{
    Json,
    extract::{Path, State},
};

use wishbox_core::ShareSlug;
use wishbox_core::api::SharedView;

use crate::db::{ItemRepository, RepositoryError, WishlistRepository};
use crate::error::AppError;
use crate::state::AppState;

/// Message for every failed share lookup.
const INVALID_LINK: &str = "This wishlist link is invalid or has been disabled.";

/// Render a shared wishlist read-only.
///
/// An empty wishlist is still a valid share: the response carries an
/// empty item list, not an error.
///
/// # Route
///
/// `GET /share/{slug}`
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<SharedView>, AppError> {
    // A slug that doesn't even have the right shape can't match anything
    let Ok(slug) = ShareSlug::parse(&slug) else {
        return Err(AppError::NotFound(INVALID_LINK.to_owned()));
    };

    let wishlist = match WishlistRepository::new(state.pool()).get_by_slug(&slug).await {
        Ok(wishlist) => wishlist,
        Err(RepositoryError::NotFound) => {
            return Err(AppError::NotFound(INVALID_LINK.to_owned()));
        }
        Err(e) => return Err(e.into()),
    };

    let items = ItemRepository::new(state.pool()).list(wishlist.id).await?;

    Ok(Json(SharedView { items }))
}
