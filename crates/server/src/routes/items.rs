//! Wishlist item route handlers.
//!
//! All five handlers resolve the owner's wishlist through `ensure` first,
//! so even a brand-new owner can hit any item endpoint without a setup
//! step. Item ids from other owners' wishlists answer 404, never 403;
//! the repository scopes every query by wishlist id.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use wishbox_core::{ItemDraft, ItemId, ItemPatch, WishlistItem};

use crate::db::{ItemRepository, WishlistRepository};
use crate::error::AppError;
use crate::middleware::RequireOwner;
use crate::state::AppState;

/// List the owner's items, newest first.
///
/// # Route
///
/// `GET /api/items`
pub async fn index(
    State(state): State<AppState>,
    RequireOwner(owner): RequireOwner,
) -> Result<Json<Vec<WishlistItem>>, AppError> {
    let wishlist = WishlistRepository::new(state.pool()).ensure(owner.id).await?;
    let items = ItemRepository::new(state.pool()).list(wishlist.id).await?;

    Ok(Json(items))
}

/// Add an item to the owner's wishlist.
///
/// The draft is validated before anything touches the database; a bad
/// name, price, or URL answers 422 with the field's message.
///
/// # Route
///
/// `POST /api/items`
pub async fn create(
    State(state): State<AppState>,
    RequireOwner(owner): RequireOwner,
    Json(draft): Json<ItemDraft>,
) -> Result<(StatusCode, Json<WishlistItem>), AppError> {
    let new_item = draft.validate()?;

    let wishlist = WishlistRepository::new(state.pool()).ensure(owner.id).await?;
    let item = ItemRepository::new(state.pool())
        .create(wishlist.id, &new_item)
        .await?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// Fetch a single item from the owner's wishlist.
///
/// # Route
///
/// `GET /api/items/{id}`
pub async fn show(
    State(state): State<AppState>,
    RequireOwner(owner): RequireOwner,
    Path(id): Path<ItemId>,
) -> Result<Json<WishlistItem>, AppError> {
    let wishlist = WishlistRepository::new(state.pool()).ensure(owner.id).await?;
    let item = ItemRepository::new(state.pool()).get(wishlist.id, id).await?;

    Ok(Json(item))
}

/// Update fields of an item.
///
/// Fields absent from the patch keep their value; an empty-string link
/// clears the stored link. An empty patch is effectively a fetch.
///
/// # Route
///
/// `PATCH /api/items/{id}`
pub async fn update(
    State(state): State<AppState>,
    RequireOwner(owner): RequireOwner,
    Path(id): Path<ItemId>,
    Json(patch): Json<ItemPatch>,
) -> Result<Json<WishlistItem>, AppError> {
    let changes = patch.validate()?;

    let wishlist = WishlistRepository::new(state.pool()).ensure(owner.id).await?;
    let item = ItemRepository::new(state.pool())
        .update(wishlist.id, id, &changes)
        .await?;

    Ok(Json(item))
}

/// Remove an item from the owner's wishlist.
///
/// Deleting an id that is already gone still answers 204; removal is
/// idempotent.
///
/// # Route
///
/// `DELETE /api/items/{id}`
pub async fn remove(
    State(state): State<AppState>,
    RequireOwner(owner): RequireOwner,
    Path(id): Path<ItemId>,
) -> Result<StatusCode, AppError> {
    let wishlist = WishlistRepository::new(state.pool()).ensure(owner.id).await?;
    ItemRepository::new(state.pool())
        .delete(wishlist.id, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
