//! Domain models for the Wishbox server.
//!
//! The wishlist and item records themselves live in `wishbox-core` so the
//! client crate can share them; only server-private state belongs here.

pub mod session;

pub use session::CurrentOwner;
pub use session::keys as session_keys;
