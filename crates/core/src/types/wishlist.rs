//! Wishlist domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::id::{OwnerId, WishlistId};
use crate::types::slug::ShareSlug;

/// An owner's wishlist.
///
/// Each owner has exactly one wishlist, created lazily the first time
/// their data is touched. The record itself is small; items live in
/// their own table keyed by `wishlist_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Wishlist {
    /// Unique wishlist ID.
    pub id: WishlistId,
    /// The identity provider subject owning this wishlist.
    pub owner_id: OwnerId,
    /// Current public share slug.
    pub share_slug: ShareSlug,
    /// When the wishlist was created.
    pub created_at: DateTime<Utc>,
}
