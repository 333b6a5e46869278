//! Wishbox Core - Shared types library.
//!
//! This crate provides common types used across all Wishbox components:
//! - `server` - REST backend over PostgreSQL
//! - `client` - API client and state store for frontends
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no database
//! access, no HTTP clients. The `server` and `client` crates agree on the
//! wire format by sharing these types.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, slugs, prices, and emails, plus
//!   the wishlist/item records and item field validation
//! - [`api`] - Request/response payloads of the REST surface

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod types;

pub use types::*;
