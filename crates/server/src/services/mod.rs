//! Business logic services for the Wishbox server.
//!
//! # Services
//!
//! - `auth` - Sign-in through the third-party identity provider

pub mod auth;
