//! Wishlist item repository for database operations.
//!
//! Every query is scoped by `wishlist_id` as well as the item id, so an
//! item belonging to somebody else's wishlist is indistinguishable from an
//! item that does not exist.

use sqlx::PgPool;

use wishbox_core::{ItemChanges, ItemId, NewItem, WishlistId, WishlistItem};

use super::RepositoryError;

/// Repository for wishlist item database operations.
pub struct ItemRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ItemRepository<'a> {
    /// Create a new item repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a wishlist's items, newest first.
    ///
    /// Ties on `created_at` fall back to the id so the order is total.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        wishlist_id: WishlistId,
    ) -> Result<Vec<WishlistItem>, RepositoryError> {
        let items = sqlx::query_as::<_, WishlistItem>(
            r"
            SELECT id, wishlist_id, name, price, image, link, created_at
            FROM wishlist_items
            WHERE wishlist_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(wishlist_id)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Insert a validated item into a wishlist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails, including
    /// when the wishlist row has been deleted out from under the caller.
    pub async fn create(
        &self,
        wishlist_id: WishlistId,
        item: &NewItem,
    ) -> Result<WishlistItem, RepositoryError> {
        let created = sqlx::query_as::<_, WishlistItem>(
            r"
            INSERT INTO wishlist_items (wishlist_id, name, price, image, link)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, wishlist_id, name, price, image, link, created_at
            ",
        )
        .bind(wishlist_id)
        .bind(&item.name)
        .bind(item.price)
        .bind(&item.image)
        .bind(&item.link)
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }

    /// Get a single item from a wishlist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item does not exist or
    /// belongs to a different wishlist.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        wishlist_id: WishlistId,
        id: ItemId,
    ) -> Result<WishlistItem, RepositoryError> {
        sqlx::query_as::<_, WishlistItem>(
            r"
            SELECT id, wishlist_id, name, price, image, link, created_at
            FROM wishlist_items
            WHERE wishlist_id = $1 AND id = $2
            ",
        )
        .bind(wishlist_id)
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    /// Apply validated changes to an item and return the updated row.
    ///
    /// Absent fields keep their current value. The link is special-cased:
    /// `Some(None)` writes NULL (the caller cleared it), plain `None`
    /// leaves it alone.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item does not exist or
    /// belongs to a different wishlist.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        wishlist_id: WishlistId,
        id: ItemId,
        changes: &ItemChanges,
    ) -> Result<WishlistItem, RepositoryError> {
        sqlx::query_as::<_, WishlistItem>(
            r"
            UPDATE wishlist_items
            SET name = COALESCE($3, name),
                price = COALESCE($4, price),
                image = COALESCE($5, image),
                link = CASE WHEN $6 THEN $7 ELSE link END
            WHERE wishlist_id = $1 AND id = $2
            RETURNING id, wishlist_id, name, price, image, link, created_at
            ",
        )
        .bind(wishlist_id)
        .bind(id)
        .bind(&changes.name)
        .bind(changes.price)
        .bind(&changes.image)
        .bind(changes.link.is_some())
        .bind(changes.link.clone().flatten())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    /// Delete an item from a wishlist.
    ///
    /// Deleting an item that is already gone (or was never there) is a
    /// no-op, so retried deletes succeed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, wishlist_id: WishlistId, id: ItemId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM wishlist_items
            WHERE wishlist_id = $1 AND id = $2
            ",
        )
        .bind(wishlist_id)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            tracing::debug!(%wishlist_id, %id, "delete matched no rows");
        }

        Ok(())
    }
}
