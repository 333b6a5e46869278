//! Request/response payloads of the REST surface.
//!
//! These shapes are the wire contract between `wishbox-server` and
//! `wishbox-client`. Item payloads (`ItemDraft`, `ItemPatch`,
//! `WishlistItem`) live in [`crate::types`] since they double as domain
//! models; the types here exist only for the API boundary.

use serde::{Deserialize, Serialize};

use crate::types::{Email, OwnerId, ShareSlug, WishlistId, WishlistItem};

/// Wishlist metadata returned to its owner.
///
/// `share_url` is assembled server-side from the configured public base
/// URL so every client renders the same link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistSummary {
    /// Unique wishlist ID.
    pub id: WishlistId,
    /// Current share slug.
    pub share_slug: ShareSlug,
    /// Full public URL for the current slug.
    pub share_url: String,
}

/// The authenticated owner, as reported by `GET /api/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerProfile {
    /// The identity provider subject.
    pub id: OwnerId,
    /// Email address from the provider's userinfo document.
    pub email: Email,
}

/// Public read-only view of a shared wishlist.
///
/// Carries the items and nothing else; owner identity stays private.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedView {
    /// Items, most recently added first.
    pub items: Vec<WishlistItem>,
}

/// JSON error envelope used for every non-2xx API response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
}

impl ErrorBody {
    /// Wrap a message in the envelope.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
