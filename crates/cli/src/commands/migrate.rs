//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! wishbox-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `WISHBOX_DATABASE_URL` - `PostgreSQL` connection string
//!   (`DATABASE_URL` works as a fallback)
//!
//! # Migration Files
//!
//! Migrations live in `crates/server/migrations/` and are embedded into
//! the binary at compile time, so the CLI can run anywhere the database
//! is reachable.

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use thiserror::Error;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failed to apply.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns an error if the database URL is not configured, the
/// connection fails, or a migration fails to apply.
pub async fn run() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(database_url.expose_secret()).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}

fn database_url() -> Result<SecretString, MigrationError> {
    std::env::var("WISHBOX_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| MigrationError::MissingEnvVar("WISHBOX_DATABASE_URL"))
}
