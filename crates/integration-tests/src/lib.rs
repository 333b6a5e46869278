//! Integration tests for Wishbox.
//!
//! # Running Tests
//!
//! ```bash
//! # Start PostgreSQL and apply migrations
//! cargo run -p wishbox-cli -- migrate
//!
//! # Start the API server
//! cargo run -p wishbox-server
//!
//! # Run the ignored integration tests
//! cargo test -p wishbox-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `api` - HTTP tests against a running server (`tests/api.rs`)
//! - `repository` - Database tests against `PostgreSQL`
//!   (`tests/repository.rs`)
//!
//! The helpers here panic with instructions rather than returning
//! errors; every caller is an `#[ignore]`d test whose first job is to
//! tell you what is missing from the environment.

#![cfg_attr(not(test), forbid(unsafe_code))]

use reqwest::Client;
use secrecy::SecretString;
use sqlx::PgPool;
use wishbox_server::db;

/// Base URL of the API server under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("WISHBOX_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned())
}

/// HTTP client with a cookie store, so a session obtained during a test
/// sticks for the rest of it.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Connect to the database named by `WISHBOX_DATABASE_URL` (or
/// `DATABASE_URL`).
///
/// # Panics
///
/// Panics when neither variable is set or the connection fails.
pub async fn connect() -> PgPool {
    let url = std::env::var("WISHBOX_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .expect("WISHBOX_DATABASE_URL (or DATABASE_URL) must be set for repository tests");

    db::create_pool(&url)
        .await
        .expect("Failed to connect to PostgreSQL")
}
