//! Wishlist item models and field validation.
//!
//! Items travel through three shapes:
//!
//! - [`ItemDraft`] / [`ItemPatch`] - raw form strings as submitted by a
//!   frontend (create and partial-update payloads)
//! - [`NewItem`] / [`ItemChanges`] - validated values ready for persistence
//! - [`WishlistItem`] - the stored record
//!
//! Validation happens exactly once, at the draft boundary, so the
//! repository layer never sees an empty name or a malformed URL.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::types::id::{ItemId, WishlistId};
use crate::types::price::{Price, PriceError};

/// A single wishlist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct WishlistItem {
    /// Unique item ID.
    pub id: ItemId,
    /// Wishlist this item belongs to.
    pub wishlist_id: WishlistId,
    /// Display name.
    pub name: String,
    /// Price, two decimal places.
    pub price: Price,
    /// Image URL.
    pub image: String,
    /// Optional product page URL.
    pub link: Option<String>,
    /// When the item was added.
    pub created_at: DateTime<Utc>,
}

/// Raw form input for creating an item.
///
/// All fields are strings exactly as a form submits them; [`validate`]
/// turns a draft into a [`NewItem`] or reports the first violation.
///
/// [`validate`]: ItemDraft::validate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemDraft {
    /// Display name.
    pub name: String,
    /// Price as entered, e.g. `"199.99"`.
    pub price: String,
    /// Image URL.
    pub image: String,
    /// Product page URL; empty means no link.
    pub link: String,
}

/// Validated fields for inserting an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    /// Display name, trimmed and non-empty.
    pub name: String,
    /// Parsed price.
    pub price: Price,
    /// Absolute http(s) image URL.
    pub image: String,
    /// Absolute http(s) product page URL, if any.
    pub link: Option<String>,
}

/// Raw partial-update input for an item.
///
/// Absent fields are left unchanged. For `link`, an empty string clears
/// the stored value; there is no way to clear `name`, `price`, or `image`
/// since they are required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemPatch {
    /// New display name.
    pub name: Option<String>,
    /// New price as entered.
    pub price: Option<String>,
    /// New image URL.
    pub image: Option<String>,
    /// New product page URL; empty string clears it.
    pub link: Option<String>,
}

/// Validated field changes for updating an item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemChanges {
    /// New display name, if changing.
    pub name: Option<String>,
    /// New price, if changing.
    pub price: Option<Price>,
    /// New image URL, if changing.
    pub image: Option<String>,
    /// Link change: `Some(Some(url))` sets, `Some(None)` clears,
    /// `None` leaves the stored value alone.
    pub link: Option<Option<String>>,
}

impl ItemChanges {
    /// True when no field is being changed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.image.is_none() && self.link.is_none()
    }
}

/// Errors that can occur when validating an [`ItemDraft`] or [`ItemPatch`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemDraftError {
    /// The name is empty after trimming.
    #[error("name cannot be empty")]
    EmptyName,
    /// The price failed to parse.
    #[error(transparent)]
    Price(#[from] PriceError),
    /// The image is not an absolute http(s) URL.
    #[error("image must be an absolute http or https URL")]
    InvalidImage,
    /// The link is not an absolute http(s) URL.
    #[error("link must be an absolute http or https URL")]
    InvalidLink,
}

impl ItemDraft {
    /// Validate the draft into a [`NewItem`].
    ///
    /// # Errors
    ///
    /// Returns the first violation found: empty name, unparseable or
    /// negative price, non-URL image, or non-URL link. An empty link is
    /// not an error; it means the item has no link.
    pub fn validate(&self) -> Result<NewItem, ItemDraftError> {
        let name = non_empty_name(&self.name)?;
        let price = Price::parse(&self.price)?;
        let image = http_url(&self.image).ok_or(ItemDraftError::InvalidImage)?;

        let link = match self.link.trim() {
            "" => None,
            raw => Some(http_url(raw).ok_or(ItemDraftError::InvalidLink)?),
        };

        Ok(NewItem {
            name,
            price,
            image,
            link,
        })
    }
}

impl From<&WishlistItem> for ItemDraft {
    /// Form representation of a stored item, for pre-filling an edit view.
    fn from(item: &WishlistItem) -> Self {
        Self {
            name: item.name.clone(),
            price: item.price.to_string(),
            image: item.image.clone(),
            link: item.link.clone().unwrap_or_default(),
        }
    }
}

impl ItemPatch {
    /// Validate the patch into [`ItemChanges`].
    ///
    /// Each supplied field obeys the same rules as on create. A supplied
    /// empty `link` becomes an explicit clear.
    ///
    /// # Errors
    ///
    /// Returns the first violation found among the supplied fields.
    pub fn validate(&self) -> Result<ItemChanges, ItemDraftError> {
        let mut changes = ItemChanges::default();

        if let Some(name) = &self.name {
            changes.name = Some(non_empty_name(name)?);
        }

        if let Some(price) = &self.price {
            changes.price = Some(Price::parse(price)?);
        }

        if let Some(image) = &self.image {
            changes.image = Some(http_url(image).ok_or(ItemDraftError::InvalidImage)?);
        }

        if let Some(link) = &self.link {
            changes.link = match link.trim() {
                "" => Some(None),
                raw => Some(Some(http_url(raw).ok_or(ItemDraftError::InvalidLink)?)),
            };
        }

        Ok(changes)
    }
}

/// Trim a name and reject the empty result.
fn non_empty_name(raw: &str) -> Result<String, ItemDraftError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ItemDraftError::EmptyName);
    }
    Ok(trimmed.to_owned())
}

/// Accept only absolute http(s) URLs, returning the trimmed input.
///
/// The URL is stored as entered rather than re-serialized, so a trailing
/// slash the user typed survives round-trips.
fn http_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).ok()?;
    matches!(url.scheme(), "http" | "https").then(|| trimmed.to_owned())
}
