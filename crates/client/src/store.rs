//! Frontend state store for the wishlist UI.
//!
//! [`WishlistStore`] owns everything a wishlist page renders: the item
//! list, the share link, the add-item form, and the transient
//! loading/error/notice flags. Views stay dumb; every mutation funnels
//! through an action method here, and every successful write re-fetches
//! the item list so the UI never drifts from the server.
//!
//! Failure handling is uniform: a failed call records a message in
//! [`error`](WishlistStore::error) and leaves the rest of the state as it
//! was, so the UI keeps showing the last good data.

use wishbox_core::api::WishlistSummary;
use wishbox_core::{ItemDraft, ItemId, ItemPatch, WishlistItem};

use crate::api::{ClientError, WishlistApi};

/// Notice shown after an item is created.
pub const NOTICE_ITEM_ADDED: &str = "Item added to your wishlist";
/// Notice shown after an item is updated.
pub const NOTICE_ITEM_UPDATED: &str = "Wishlist item updated";
/// Notice shown after an item is removed.
pub const NOTICE_ITEM_REMOVED: &str = "Item removed";
/// Notice shown after the share link is regenerated.
pub const NOTICE_SHARE_UPDATED: &str = "Share link updated";

/// UI state for the owner's wishlist pages and the public share page.
///
/// Generic over [`WishlistApi`] so the action logic can be exercised
/// against an in-memory backend in tests.
#[derive(Debug)]
pub struct WishlistStore<B> {
    backend: B,
    wishlist: Option<WishlistSummary>,
    items: Vec<WishlistItem>,
    current: Option<WishlistItem>,
    form: ItemDraft,
    loading: bool,
    error: Option<String>,
    notice: Option<String>,
}

impl<B: WishlistApi> WishlistStore<B> {
    /// Create an empty store over a backend. Nothing is fetched until an
    /// action runs.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            wishlist: None,
            items: Vec::new(),
            current: None,
            form: ItemDraft::default(),
            loading: false,
            error: None,
            notice: None,
        }
    }

    /// Wishlist metadata, once loaded.
    #[must_use]
    pub const fn wishlist(&self) -> Option<&WishlistSummary> {
        self.wishlist.as_ref()
    }

    /// Items to render, most recently added first.
    #[must_use]
    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    /// The item loaded for the edit view, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&WishlistItem> {
        self.current.as_ref()
    }

    /// The add-item form as currently filled in.
    #[must_use]
    pub const fn form(&self) -> &ItemDraft {
        &self.form
    }

    /// True while a backend call is in flight.
    #[must_use]
    pub const fn loading(&self) -> bool {
        self.loading
    }

    /// Message from the last failed action, cleared when the next one
    /// starts.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Pending notice, without consuming it.
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Take the pending notice for display. Notices are shown once.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// Replace the add-item form wholesale. Form bindings write the full
    /// draft back on every change.
    pub fn set_form(&mut self, form: ItemDraft) {
        self.form = form;
    }

    /// Clear the add-item form.
    pub fn reset_form(&mut self) {
        self.form = ItemDraft::default();
    }

    /// Load the wishlist metadata, creating the wishlist on first
    /// sign-in.
    pub async fn ensure_wishlist(&mut self) {
        self.begin();
        match self.backend.ensure_wishlist().await {
            Ok(summary) => self.wishlist = Some(summary),
            Err(e) => self.fail(&e),
        }
        self.loading = false;
    }

    /// Fetch the item list.
    pub async fn fetch_items(&mut self) {
        self.begin();
        self.refresh_items().await;
        self.loading = false;
    }

    /// Validate the form and create an item from it.
    ///
    /// On success the form resets, a notice is queued, and the list is
    /// re-fetched. A validation failure reports the first bad field
    /// without a round trip and leaves the form in place for correction.
    pub async fn add_item(&mut self) {
        let draft = self.form.clone();
        if let Err(e) = draft.validate() {
            self.error = Some(e.to_string());
            return;
        }

        self.begin();
        match self.backend.create_item(&draft).await {
            Ok(item) => {
                tracing::debug!(item_id = %item.id, "item created");
                self.form = ItemDraft::default();
                self.notice = Some(NOTICE_ITEM_ADDED.to_owned());
                self.refresh_items().await;
            }
            Err(e) => self.fail(&e),
        }
        self.loading = false;
    }

    /// Load one item for the edit view, pre-filling the form with it.
    pub async fn fetch_item(&mut self, id: ItemId) {
        self.begin();
        match self.backend.fetch_item(id).await {
            Ok(item) => {
                self.form = ItemDraft::from(&item);
                self.current = Some(item);
            }
            Err(e) => self.fail(&e),
        }
        self.loading = false;
    }

    /// Validate a patch and apply it to an item.
    ///
    /// On success the edit view's item is dropped and the list
    /// re-fetched; the UI navigates back to the list at that point.
    pub async fn update_item(&mut self, id: ItemId, patch: ItemPatch) {
        if let Err(e) = patch.validate() {
            self.error = Some(e.to_string());
            return;
        }

        self.begin();
        match self.backend.update_item(id, &patch).await {
            Ok(_) => {
                self.current = None;
                self.notice = Some(NOTICE_ITEM_UPDATED.to_owned());
                self.refresh_items().await;
            }
            Err(e) => self.fail(&e),
        }
        self.loading = false;
    }

    /// Delete an item.
    pub async fn delete_item(&mut self, id: ItemId) {
        self.begin();
        match self.backend.delete_item(id).await {
            Ok(()) => {
                self.notice = Some(NOTICE_ITEM_REMOVED.to_owned());
                self.refresh_items().await;
            }
            Err(e) => self.fail(&e),
        }
        self.loading = false;
    }

    /// Replace the share slug, invalidating every previously handed-out
    /// link.
    pub async fn regenerate_share_link(&mut self) {
        self.begin();
        match self.backend.regenerate_share_slug().await {
            Ok(summary) => {
                self.wishlist = Some(summary);
                self.notice = Some(NOTICE_SHARE_UPDATED.to_owned());
            }
            Err(e) => self.fail(&e),
        }
        self.loading = false;
    }

    /// Load the public view behind a share slug. No session needed; the
    /// items land in the same list the owner view renders from.
    pub async fn load_shared(&mut self, slug: &str) {
        self.begin();
        match self.backend.shared_view(slug).await {
            Ok(view) => self.items = view.items,
            Err(e) => self.fail(&e),
        }
        self.loading = false;
    }

    /// Drop all state, e.g. on sign-out.
    pub fn clear(&mut self) {
        self.wishlist = None;
        self.items.clear();
        self.current = None;
        self.form = ItemDraft::default();
        self.loading = false;
        self.error = None;
        self.notice = None;
    }

    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn fail(&mut self, error: &ClientError) {
        tracing::warn!(%error, "wishlist backend call failed");
        self.error = Some(error.to_string());
    }

    /// Re-fetch the item list after a successful write, or surface the
    /// failure without touching the stale list.
    async fn refresh_items(&mut self) {
        match self.backend.list_items().await {
            Ok(items) => self.items = items,
            Err(e) => self.fail(&e),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use chrono::Utc;
    use wishbox_core::api::SharedView;
    use wishbox_core::{ShareSlug, WishlistId};

    use super::*;

    /// In-memory [`WishlistApi`] that mirrors the server closely enough
    /// for store tests: field validation, newest-first ordering,
    /// idempotent deletes, and slug checks on the shared view.
    #[derive(Debug)]
    struct InMemoryApi {
        state: Mutex<Remote>,
        fail: AtomicBool,
    }

    #[derive(Debug)]
    struct Remote {
        slug: ShareSlug,
        next_id: i64,
        items: Vec<WishlistItem>,
    }

    impl InMemoryApi {
        fn new() -> Self {
            Self {
                state: Mutex::new(Remote {
                    slug: ShareSlug::generate(),
                    next_id: 1,
                    items: Vec::new(),
                }),
                fail: AtomicBool::new(false),
            }
        }

        /// Make every subsequent call fail like a crashed server.
        fn break_connection(&self) {
            self.fail.store(true, Ordering::SeqCst);
        }

        fn check(&self) -> Result<(), ClientError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(ClientError::Server {
                    status: 500,
                    message: "Internal server error".to_owned(),
                });
            }
            Ok(())
        }

        fn summary(slug: &ShareSlug) -> WishlistSummary {
            WishlistSummary {
                id: WishlistId::new(1),
                share_slug: slug.clone(),
                share_url: format!("http://localhost:5173/share/{slug}"),
            }
        }
    }

    #[async_trait]
    impl WishlistApi for InMemoryApi {
        async fn ensure_wishlist(&self) -> Result<WishlistSummary, ClientError> {
            self.check()?;
            let state = self.state.lock().unwrap();
            Ok(Self::summary(&state.slug))
        }

        async fn regenerate_share_slug(&self) -> Result<WishlistSummary, ClientError> {
            self.check()?;
            let mut state = self.state.lock().unwrap();
            state.slug = ShareSlug::generate();
            Ok(Self::summary(&state.slug))
        }

        async fn list_items(&self) -> Result<Vec<WishlistItem>, ClientError> {
            self.check()?;
            Ok(self.state.lock().unwrap().items.clone())
        }

        async fn create_item(&self, draft: &ItemDraft) -> Result<WishlistItem, ClientError> {
            self.check()?;
            let new_item = draft
                .validate()
                .map_err(|e| ClientError::Validation(e.to_string()))?;

            let mut state = self.state.lock().unwrap();
            let item = WishlistItem {
                id: ItemId::new(state.next_id),
                wishlist_id: WishlistId::new(1),
                name: new_item.name,
                price: new_item.price,
                image: new_item.image,
                link: new_item.link,
                created_at: Utc::now(),
            };
            state.next_id += 1;
            state.items.insert(0, item.clone());
            Ok(item)
        }

        async fn fetch_item(&self, id: ItemId) -> Result<WishlistItem, ClientError> {
            self.check()?;
            let state = self.state.lock().unwrap();
            state
                .items
                .iter()
                .find(|item| item.id == id)
                .cloned()
                .ok_or_else(|| ClientError::NotFound("not found".to_owned()))
        }

        async fn update_item(
            &self,
            id: ItemId,
            patch: &ItemPatch,
        ) -> Result<WishlistItem, ClientError> {
            self.check()?;
            let changes = patch
                .validate()
                .map_err(|e| ClientError::Validation(e.to_string()))?;

            let mut state = self.state.lock().unwrap();
            let item = state
                .items
                .iter_mut()
                .find(|item| item.id == id)
                .ok_or_else(|| ClientError::NotFound("not found".to_owned()))?;

            if let Some(name) = changes.name {
                item.name = name;
            }
            if let Some(price) = changes.price {
                item.price = price;
            }
            if let Some(image) = changes.image {
                item.image = image;
            }
            if let Some(link) = changes.link {
                item.link = link;
            }
            Ok(item.clone())
        }

        async fn delete_item(&self, id: ItemId) -> Result<(), ClientError> {
            self.check()?;
            self.state
                .lock()
                .unwrap()
                .items
                .retain(|item| item.id != id);
            Ok(())
        }

        async fn shared_view(&self, slug: &str) -> Result<SharedView, ClientError> {
            self.check()?;
            let state = self.state.lock().unwrap();
            if state.slug.as_str() != slug {
                return Err(ClientError::NotFound(
                    "This wishlist link is invalid or has been disabled.".to_owned(),
                ));
            }
            Ok(SharedView {
                items: state.items.clone(),
            })
        }
    }

    fn draft(name: &str, price: &str) -> ItemDraft {
        ItemDraft {
            name: name.to_owned(),
            price: price.to_owned(),
            image: "https://example.com/item.jpg".to_owned(),
            link: String::new(),
        }
    }

    #[tokio::test]
    async fn test_add_item_refreshes_list_and_resets_form() {
        let mut store = WishlistStore::new(InMemoryApi::new());
        store.set_form(draft("Headphones", "199.99"));

        store.add_item().await;

        let item = store.items().first().unwrap();
        assert_eq!(item.name, "Headphones");
        assert_eq!(item.price.to_string(), "199.99");
        assert_eq!(store.form(), &ItemDraft::default());
        assert_eq!(store.notice(), Some(NOTICE_ITEM_ADDED));
        assert_eq!(store.error(), None);
        assert!(!store.loading());
    }

    #[tokio::test]
    async fn test_items_listed_newest_first() {
        let mut store = WishlistStore::new(InMemoryApi::new());
        store.set_form(draft("First", "1"));
        store.add_item().await;
        store.set_form(draft("Second", "2"));
        store.add_item().await;

        let names: Vec<&str> = store.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Second", "First"]);
    }

    #[tokio::test]
    async fn test_add_item_rejects_invalid_draft_without_round_trip() {
        let mut store = WishlistStore::new(InMemoryApi::new());
        store.set_form(draft("Headphones", "free"));

        store.add_item().await;

        assert!(store.items().is_empty());
        assert!(store.error().unwrap().contains("price"));
        assert_eq!(store.notice(), None);
        // Form stays put so the user can fix the bad field.
        assert_eq!(store.form().name, "Headphones");
    }

    #[tokio::test]
    async fn test_update_item_applies_patch_and_leaves_edit_view() {
        let mut store = WishlistStore::new(InMemoryApi::new());
        store.set_form(draft("Headphones", "199.99"));
        store.add_item().await;
        let id = store.items().first().unwrap().id;

        store.fetch_item(id).await;
        assert!(store.current().is_some());

        let patch = ItemPatch {
            price: Some("149.99".to_owned()),
            ..ItemPatch::default()
        };
        store.update_item(id, patch).await;

        assert_eq!(store.items().first().unwrap().price.to_string(), "149.99");
        assert_eq!(store.current(), None);
        assert_eq!(store.notice(), Some(NOTICE_ITEM_UPDATED));
    }

    #[tokio::test]
    async fn test_fetch_item_prefills_edit_form() {
        let mut store = WishlistStore::new(InMemoryApi::new());
        store.set_form(draft("Headphones", "199.99"));
        store.add_item().await;
        let id = store.items().first().unwrap().id;

        // add_item reset the form; loading the item fills it back in
        store.fetch_item(id).await;

        assert_eq!(store.form().name, "Headphones");
        assert_eq!(store.form().price, "199.99");
        assert_eq!(store.form().image, "https://example.com/item.jpg");
        assert_eq!(store.form().link, "");
    }

    #[tokio::test]
    async fn test_update_item_clears_link_with_empty_string() {
        let mut store = WishlistStore::new(InMemoryApi::new());
        store.set_form(ItemDraft {
            link: "https://example.com/item".to_owned(),
            ..draft("Headphones", "199.99")
        });
        store.add_item().await;
        let id = store.items().first().unwrap().id;
        assert!(store.items().first().unwrap().link.is_some());

        let patch = ItemPatch {
            link: Some(String::new()),
            ..ItemPatch::default()
        };
        store.update_item(id, patch).await;

        assert_eq!(store.items().first().unwrap().link, None);
    }

    #[tokio::test]
    async fn test_update_item_rejects_invalid_patch_locally() {
        let mut store = WishlistStore::new(InMemoryApi::new());
        store.set_form(draft("Headphones", "199.99"));
        store.add_item().await;
        let id = store.items().first().unwrap().id;

        let patch = ItemPatch {
            image: Some("not a url".to_owned()),
            ..ItemPatch::default()
        };
        store.update_item(id, patch).await;

        assert!(store.error().unwrap().contains("image"));
        assert_eq!(
            store.items().first().unwrap().image,
            "https://example.com/item.jpg"
        );
    }

    #[tokio::test]
    async fn test_delete_item_refreshes_and_notifies() {
        let mut store = WishlistStore::new(InMemoryApi::new());
        store.set_form(draft("Headphones", "199.99"));
        store.add_item().await;
        let id = store.items().first().unwrap().id;

        store.delete_item(id).await;

        assert!(store.items().is_empty());
        assert_eq!(store.notice(), Some(NOTICE_ITEM_REMOVED));
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_existing_items() {
        let mut store = WishlistStore::new(InMemoryApi::new());
        store.set_form(draft("Headphones", "199.99"));
        store.add_item().await;
        store.take_notice();

        store.backend.break_connection();
        store.fetch_items().await;

        assert_eq!(store.items().len(), 1);
        assert!(store.error().unwrap().contains("Internal server error"));
        assert!(!store.loading());
    }

    #[tokio::test]
    async fn test_regenerate_share_link_swaps_slug() {
        let mut store = WishlistStore::new(InMemoryApi::new());
        store.ensure_wishlist().await;
        let old = store.wishlist().unwrap().share_slug.clone();

        store.regenerate_share_link().await;

        assert_ne!(store.wishlist().unwrap().share_slug, old);
        assert_eq!(store.notice(), Some(NOTICE_SHARE_UPDATED));
    }

    #[tokio::test]
    async fn test_old_share_slug_stops_working_after_regeneration() {
        let mut store = WishlistStore::new(InMemoryApi::new());
        store.ensure_wishlist().await;
        let old = store.wishlist().unwrap().share_slug.clone();

        store.regenerate_share_link().await;
        store.load_shared(old.as_str()).await;

        assert!(store.error().unwrap().contains("invalid or has been disabled"));
    }

    #[tokio::test]
    async fn test_load_shared_fills_items_from_public_view() {
        let mut store = WishlistStore::new(InMemoryApi::new());
        store.set_form(draft("Headphones", "199.99"));
        store.add_item().await;
        store.ensure_wishlist().await;
        let slug = store.wishlist().unwrap().share_slug.clone();

        store.load_shared(slug.as_str()).await;

        assert_eq!(store.items().len(), 1);
        assert_eq!(store.error(), None);
    }

    #[tokio::test]
    async fn test_load_shared_accepts_empty_list() {
        let mut store = WishlistStore::new(InMemoryApi::new());
        store.ensure_wishlist().await;
        let slug = store.wishlist().unwrap().share_slug.clone();

        store.load_shared(slug.as_str()).await;

        assert!(store.items().is_empty());
        assert_eq!(store.error(), None);
    }

    #[tokio::test]
    async fn test_clear_resets_everything() {
        let mut store = WishlistStore::new(InMemoryApi::new());
        store.ensure_wishlist().await;
        store.set_form(draft("Headphones", "199.99"));
        store.add_item().await;

        store.clear();

        assert_eq!(store.wishlist(), None);
        assert!(store.items().is_empty());
        assert_eq!(store.form(), &ItemDraft::default());
        assert_eq!(store.error(), None);
        assert_eq!(store.notice(), None);
    }

    #[tokio::test]
    async fn test_take_notice_consumes() {
        let mut store = WishlistStore::new(InMemoryApi::new());
        store.set_form(draft("Headphones", "199.99"));
        store.add_item().await;

        assert_eq!(store.take_notice().as_deref(), Some(NOTICE_ITEM_ADDED));
        assert_eq!(store.take_notice(), None);
    }
}
