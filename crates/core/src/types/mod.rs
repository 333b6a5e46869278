//! Core types for Wishbox.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod item;
pub mod price;
pub mod slug;
pub mod wishlist;

pub use email::{Email, EmailError};
pub use id::*;
pub use item::{ItemChanges, ItemDraft, ItemDraftError, ItemPatch, NewItem, WishlistItem};
pub use price::{Price, PriceError};
pub use slug::{ShareSlug, ShareSlugError};
pub use wishlist::Wishlist;
