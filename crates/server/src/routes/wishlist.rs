//! Wishlist-level route handlers.
//!
//! The wishlist row itself is invisible to owners except through its
//! summary: the id, the current share slug, and the full share URL the
//! SPA can hand out. Both handlers go through `ensure`, so the first
//! authenticated call is the one that creates the wishlist.

use axum::{Json, extract::State};

use wishbox_core::Wishlist;
use wishbox_core::api::WishlistSummary;

use crate::config::ServerConfig;
use crate::db::WishlistRepository;
use crate::error::AppError;
use crate::middleware::RequireOwner;
use crate::state::AppState;

/// Assemble the summary the SPA works with.
///
/// The share URL is built server-side so every client renders the same
/// link no matter where it runs.
fn summary(config: &ServerConfig, wishlist: &Wishlist) -> WishlistSummary {
    WishlistSummary {
        id: wishlist.id,
        share_slug: wishlist.share_slug.clone(),
        share_url: format!("{}/share/{}", config.public_origin(), wishlist.share_slug),
    }
}

/// Return the owner's wishlist summary, creating the wishlist if needed.
///
/// # Route
///
/// `GET /api/wishlist`
pub async fn show(
    State(state): State<AppState>,
    RequireOwner(owner): RequireOwner,
) -> Result<Json<WishlistSummary>, AppError> {
    let wishlist = WishlistRepository::new(state.pool()).ensure(owner.id).await?;

    Ok(Json(summary(state.config(), &wishlist)))
}

/// Replace the share slug with a fresh one.
///
/// The previous slug stops resolving immediately; anyone holding the old
/// link sees the same response as for a made-up slug.
///
/// # Route
///
/// `POST /api/wishlist/share`
pub async fn regenerate_share(
    State(state): State<AppState>,
    RequireOwner(owner): RequireOwner,
) -> Result<Json<WishlistSummary>, AppError> {
    let wishlists = WishlistRepository::new(state.pool());
    let wishlist = wishlists.ensure(owner.id).await?;
    let wishlist = wishlists.regenerate_slug(wishlist.id).await?;

    Ok(Json(summary(state.config(), &wishlist)))
}
