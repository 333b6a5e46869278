//! HTTP access to the Wishbox REST API.
//!
//! [`WishlistApi`] is the port the state store drives; [`ApiClient`] is its
//! production implementation over `reqwest`. The client owns transport
//! details only: cookie handling, endpoint layout, and the mapping from
//! HTTP status codes to [`ClientError`]. What to do with a failure is the
//! store's business.

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use wishbox_core::api::{ErrorBody, OwnerProfile, SharedView, WishlistSummary};
use wishbox_core::{ItemDraft, ItemId, ItemPatch, WishlistItem};

/// Errors surfaced by API calls.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure: connection, timeout, or a body that did
    /// not decode.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered 401; there is no live session.
    #[error("authentication required")]
    NotAuthenticated,

    /// The server answered 404.
    #[error("{0}")]
    NotFound(String),

    /// The server answered 422 rejecting submitted fields.
    #[error("{0}")]
    Validation(String),

    /// Any other non-2xx answer.
    #[error("server error ({status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Message from the error envelope, or the status line when the
        /// body was not one.
        message: String,
    },
}

/// Operations the wishlist UI needs from a backend.
///
/// The state store is generic over this trait so its logic can run
/// against an in-memory double in tests; [`ApiClient`] implements it
/// against the real server.
#[async_trait]
pub trait WishlistApi: Send + Sync {
    /// Fetch the owner's wishlist, creating it on first call.
    ///
    /// # Errors
    ///
    /// `NotAuthenticated` without a live session.
    async fn ensure_wishlist(&self) -> Result<WishlistSummary, ClientError>;

    /// Replace the share slug, invalidating every previously handed-out
    /// link.
    ///
    /// # Errors
    ///
    /// `NotAuthenticated` without a live session.
    async fn regenerate_share_slug(&self) -> Result<WishlistSummary, ClientError>;

    /// List the owner's items, most recently added first.
    ///
    /// # Errors
    ///
    /// `NotAuthenticated` without a live session.
    async fn list_items(&self) -> Result<Vec<WishlistItem>, ClientError>;

    /// Create an item from raw form input.
    ///
    /// # Errors
    ///
    /// `Validation` when the server rejects a field.
    async fn create_item(&self, draft: &ItemDraft) -> Result<WishlistItem, ClientError>;

    /// Fetch a single item from the owner's list.
    ///
    /// # Errors
    ///
    /// `NotFound` when the id is not on the owner's list.
    async fn fetch_item(&self, id: ItemId) -> Result<WishlistItem, ClientError>;

    /// Apply a partial update to an item.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id, `Validation` for a rejected field.
    async fn update_item(
        &self,
        id: ItemId,
        patch: &ItemPatch,
    ) -> Result<WishlistItem, ClientError>;

    /// Delete an item. Deleting an id that is already gone succeeds.
    ///
    /// # Errors
    ///
    /// `NotAuthenticated` without a live session.
    async fn delete_item(&self, id: ItemId) -> Result<(), ClientError>;

    /// Fetch the public view behind a share slug. No session needed.
    ///
    /// # Errors
    ///
    /// `NotFound` when the slug does not match any wishlist.
    async fn shared_view(&self, slug: &str) -> Result<SharedView, ClientError>;
}

/// `reqwest`-backed implementation of [`WishlistApi`].
///
/// Holds a cookie store so the session cookie set by the sign-in flow
/// rides along on every call. Clones share the connection pool and the
/// cookie jar.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client against an API origin such as
    /// `http://localhost:3000`. A trailing slash is tolerated.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self { http, base_url })
    }

    /// URL a browser should navigate to for sign-in.
    ///
    /// Sign-in is a redirect dance, not an API call, so this hands back
    /// the address instead of making a request.
    #[must_use]
    pub fn login_url(&self) -> String {
        self.endpoint("/auth/login")
    }

    /// Fetch the signed-in owner's profile.
    ///
    /// # Errors
    ///
    /// `NotAuthenticated` without a live session.
    pub async fn me(&self) -> Result<OwnerProfile, ClientError> {
        let response = self.http.get(self.endpoint("/api/me")).send().await?;
        decode(response).await
    }

    /// Destroy the current session.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; signing out an already
    /// signed-out client succeeds.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let response = self.http.post(self.endpoint("/auth/logout")).send().await?;
        expect_empty(response).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl WishlistApi for ApiClient {
    async fn ensure_wishlist(&self) -> Result<WishlistSummary, ClientError> {
        let response = self.http.get(self.endpoint("/api/wishlist")).send().await?;
        decode(response).await
    }

    async fn regenerate_share_slug(&self) -> Result<WishlistSummary, ClientError> {
        let response = self
            .http
            .post(self.endpoint("/api/wishlist/share"))
            .send()
            .await?;
        decode(response).await
    }

    async fn list_items(&self) -> Result<Vec<WishlistItem>, ClientError> {
        let response = self.http.get(self.endpoint("/api/items")).send().await?;
        decode(response).await
    }

    async fn create_item(&self, draft: &ItemDraft) -> Result<WishlistItem, ClientError> {
        let response = self
            .http
            .post(self.endpoint("/api/items"))
            .json(draft)
            .send()
            .await?;
        decode(response).await
    }

    async fn fetch_item(&self, id: ItemId) -> Result<WishlistItem, ClientError> {
        let response = self
            .http
            .get(self.endpoint(&format!("/api/items/{id}")))
            .send()
            .await?;
        decode(response).await
    }

    async fn update_item(
        &self,
        id: ItemId,
        patch: &ItemPatch,
    ) -> Result<WishlistItem, ClientError> {
        let response = self
            .http
            .patch(self.endpoint(&format!("/api/items/{id}")))
            .json(patch)
            .send()
            .await?;
        decode(response).await
    }

    async fn delete_item(&self, id: ItemId) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.endpoint(&format!("/api/items/{id}")))
            .send()
            .await?;
        expect_empty(response).await
    }

    async fn shared_view(&self, slug: &str) -> Result<SharedView, ClientError> {
        let response = self
            .http
            .get(self.endpoint(&format!("/share/{slug}")))
            .send()
            .await?;
        decode(response).await
    }
}

/// Decode a successful JSON body, or map the error envelope.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    if response.status().is_success() {
        return Ok(response.json().await?);
    }
    Err(error_from(response).await)
}

/// Accept any 2xx whose body carries nothing of interest.
async fn expect_empty(response: Response) -> Result<(), ClientError> {
    if response.status().is_success() {
        return Ok(());
    }
    Err(error_from(response).await)
}

/// Map a non-2xx response to a [`ClientError`].
///
/// The message comes from the JSON error envelope when there is one,
/// falling back to the status line for anything else a proxy or crash
/// might emit.
async fn error_from(response: Response) -> ClientError {
    let status = response.status();
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status.to_string(),
    };

    match status {
        StatusCode::UNAUTHORIZED => ClientError::NotAuthenticated,
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        StatusCode::UNPROCESSABLE_ENTITY => ClientError::Validation(message),
        _ => ClientError::Server {
            status: status.as_u16(),
            message,
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slashes() {
        let client = ApiClient::new("http://localhost:3000///").unwrap();
        assert_eq!(
            client.endpoint("/api/items"),
            "http://localhost:3000/api/items"
        );
    }

    #[test]
    fn test_endpoint_interpolates_ids() {
        let client = ApiClient::new("http://localhost:3000").unwrap();
        let id = ItemId::new(42);
        assert_eq!(
            client.endpoint(&format!("/api/items/{id}")),
            "http://localhost:3000/api/items/42"
        );
    }

    #[test]
    fn test_login_url_points_at_auth_flow() {
        let client = ApiClient::new("https://api.wishbox.example").unwrap();
        assert_eq!(
            client.login_url(),
            "https://api.wishbox.example/auth/login"
        );
    }
}
