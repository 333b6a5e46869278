//! Seed the database with a demo wishlist.
//!
//! Goes through the same repositories the server uses, so seeded rows
//! are indistinguishable from ones created via the API.
//!
//! # Usage
//!
//! ```bash
//! # Seed for a fresh random owner
//! wishbox-cli seed
//!
//! # Seed for a specific owner (identity provider subject)
//! wishbox-cli seed --owner 7cf1f4f2-5be4-4f26-9b2e-2f0e6f8b1a11
//! ```
//!
//! # Environment Variables
//!
//! - `WISHBOX_DATABASE_URL` - `PostgreSQL` connection string
//!   (`DATABASE_URL` works as a fallback)

use secrecy::SecretString;
use thiserror::Error;
use uuid::Uuid;

use wishbox_core::{ItemDraft, ItemDraftError, OwnerId};
use wishbox_server::db::{self, ItemRepository, RepositoryError, WishlistRepository};

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Connect(#[from] sqlx::Error),

    /// Repository operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// A built-in sample failed validation.
    #[error("Invalid sample item: {0}")]
    InvalidSample(#[from] ItemDraftError),
}

/// Demo items inserted into the seeded wishlist.
fn samples() -> Vec<ItemDraft> {
    let sample = |name: &str, price: &str, image: &str, link: &str| ItemDraft {
        name: name.to_owned(),
        price: price.to_owned(),
        image: image.to_owned(),
        link: link.to_owned(),
    };

    vec![
        sample(
            "Noise-cancelling headphones",
            "199.99",
            "https://images.example.com/headphones.jpg",
            "https://shop.example.com/headphones",
        ),
        sample(
            "Espresso grinder",
            "349.00",
            "https://images.example.com/grinder.jpg",
            "https://shop.example.com/grinder",
        ),
        sample(
            "Wool blanket",
            "89.50",
            "https://images.example.com/blanket.jpg",
            "",
        ),
    ]
}

/// Create (or reuse) the wishlist for `owner` and fill it with demo
/// items. Running the command twice adds the demo items twice.
///
/// # Errors
///
/// Returns an error if the database URL is not configured, the
/// connection fails, or an insert fails.
pub async fn demo(owner: Uuid) -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    // Validate the demo data before touching the database.
    let items = samples()
        .iter()
        .map(ItemDraft::validate)
        .collect::<Result<Vec<_>, _>>()?;

    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    let owner_id = OwnerId::new(owner);
    let wishlist = WishlistRepository::new(&pool).ensure(owner_id).await?;
    tracing::info!(
        wishlist_id = %wishlist.id,
        share_slug = %wishlist.share_slug,
        "Seeding wishlist for owner {owner_id}"
    );

    let repo = ItemRepository::new(&pool);
    for item in &items {
        let created = repo.create(wishlist.id, item).await?;
        tracing::info!(item_id = %created.id, "Created item: {}", created.name);
    }

    tracing::info!(
        "Seed complete! Share URL path: /share/{}",
        wishlist.share_slug
    );
    Ok(())
}

fn database_url() -> Result<SecretString, SeedError> {
    std::env::var("WISHBOX_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| SeedError::MissingEnvVar("WISHBOX_DATABASE_URL"))
}
