//! Wishbox Client - API client and frontend state store.
//!
//! This crate is the Rust half of a Wishbox frontend: [`ApiClient`]
//! speaks to `wishbox-server` over HTTP with a cookie session, and
//! [`WishlistStore`] holds the state a wishlist UI renders from and the
//! actions it invokes.
//!
//! # Architecture
//!
//! The store never touches HTTP directly. It drives the
//! [`WishlistApi`](api::WishlistApi) trait, for which [`ApiClient`] is
//! the production implementation; tests substitute an in-memory backend.
//! All wire types come from `wishbox-core`, so the payloads here are the
//! same structs the server serializes.
//!
//! # Modules
//!
//! - [`api`] - `WishlistApi` port, `reqwest` client, error mapping
//! - [`store`] - UI state and actions (list, form, share link, notices)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod store;

pub use api::{ApiClient, ClientError, WishlistApi};
pub use store::WishlistStore;
