//! Wishlist repository for database operations.
//!
//! A wishlist is never created explicitly: [`WishlistRepository::ensure`]
//! lazily inserts one the first time an owner touches their data. Two
//! requests can race on that first touch, so the insert path reads the
//! violated constraint name to decide between "someone else won, use their
//! row" and "the generated share slug collided, roll a new one".

use sqlx::PgPool;

use wishbox_core::{OwnerId, ShareSlug, Wishlist, WishlistId};

use super::RepositoryError;

/// Unique constraint on `wishlists.owner_id` (one wishlist per owner).
const OWNER_CONSTRAINT: &str = "wishlists_owner_id_key";
/// Unique constraint on `wishlists.share_slug`.
const SLUG_CONSTRAINT: &str = "wishlists_share_slug_key";

/// How many fresh slugs to try before giving up on an insert or update.
///
/// Collisions in a 36^12 space are vanishingly rare; more than one retry
/// in a row points at a broken random source, not bad luck.
const SLUG_ATTEMPTS: u32 = 3;

/// Repository for wishlist database operations.
pub struct WishlistRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WishlistRepository<'a> {
    /// Create a new wishlist repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get an owner's wishlist, if they have one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_owner(
        &self,
        owner_id: OwnerId,
    ) -> Result<Option<Wishlist>, RepositoryError> {
        let wishlist = sqlx::query_as::<_, Wishlist>(
            r"
            SELECT id, owner_id, share_slug, created_at
            FROM wishlists
            WHERE owner_id = $1
            ",
        )
        .bind(owner_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(wishlist)
    }

    /// Get an owner's wishlist, creating it with a fresh share slug if absent.
    ///
    /// Safe to call concurrently for the same owner: exactly one insert wins
    /// and every caller observes that row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if no unique slug could be
    /// allocated within the retry budget.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn ensure(&self, owner_id: OwnerId) -> Result<Wishlist, RepositoryError> {
        if let Some(wishlist) = self.get_by_owner(owner_id).await? {
            return Ok(wishlist);
        }

        for attempt in 1..=SLUG_ATTEMPTS {
            let slug = ShareSlug::generate();
            let result = sqlx::query_as::<_, Wishlist>(
                r"
                INSERT INTO wishlists (owner_id, share_slug)
                VALUES ($1, $2)
                RETURNING id, owner_id, share_slug, created_at
                ",
            )
            .bind(owner_id)
            .bind(&slug)
            .fetch_one(self.pool)
            .await;

            match result {
                Ok(wishlist) => return Ok(wishlist),
                Err(e) => {
                    if let sqlx::Error::Database(ref db_err) = e
                        && db_err.is_unique_violation()
                    {
                        if db_err.constraint() == Some(OWNER_CONSTRAINT) {
                            // Lost the first-access race; the winner's row is ours too
                            if let Some(wishlist) = self.get_by_owner(owner_id).await? {
                                return Ok(wishlist);
                            }
                            return Err(RepositoryError::DataCorruption(format!(
                                "wishlist insert for owner {owner_id} conflicted but no row exists"
                            )));
                        }
                        if db_err.constraint() == Some(SLUG_CONSTRAINT) {
                            tracing::warn!(attempt, "share slug collision, generating a new one");
                            continue;
                        }
                    }
                    return Err(RepositoryError::Database(e));
                }
            }
        }

        Err(RepositoryError::Conflict(
            "could not allocate a unique share slug".to_owned(),
        ))
    }

    /// Replace a wishlist's share slug with a freshly generated one.
    ///
    /// The old slug stops resolving the moment the update commits.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the wishlist does not exist.
    /// Returns `RepositoryError::Conflict` if no unique slug could be
    /// allocated within the retry budget.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn regenerate_slug(&self, id: WishlistId) -> Result<Wishlist, RepositoryError> {
        for attempt in 1..=SLUG_ATTEMPTS {
            let slug = ShareSlug::generate();
            let result = sqlx::query_as::<_, Wishlist>(
                r"
                UPDATE wishlists
                SET share_slug = $2
                WHERE id = $1
                RETURNING id, owner_id, share_slug, created_at
                ",
            )
            .bind(id)
            .bind(&slug)
            .fetch_optional(self.pool)
            .await;

            match result {
                Ok(Some(wishlist)) => return Ok(wishlist),
                Ok(None) => return Err(RepositoryError::NotFound),
                Err(e) => {
                    if let sqlx::Error::Database(ref db_err) = e
                        && db_err.is_unique_violation()
                        && db_err.constraint() == Some(SLUG_CONSTRAINT)
                    {
                        tracing::warn!(attempt, "share slug collision, generating a new one");
                        continue;
                    }
                    return Err(RepositoryError::Database(e));
                }
            }
        }

        Err(RepositoryError::Conflict(
            "could not allocate a unique share slug".to_owned(),
        ))
    }

    /// Resolve a share slug to its wishlist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no wishlist carries the slug,
    /// which includes every slug invalidated by regeneration.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_slug(&self, slug: &ShareSlug) -> Result<Wishlist, RepositoryError> {
        sqlx::query_as::<_, Wishlist>(
            r"
            SELECT id, owner_id, share_slug, created_at
            FROM wishlists
            WHERE share_slug = $1
            ",
        )
        .bind(slug)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }
}
