//! Identity provider client.
//!
//! Wishbox never stores credentials. Sign-in is delegated to a third-party
//! OAuth 2.0 provider; all this server keeps is the provider's subject (the
//! owner id) and the email it reports.
//!
//! # OAuth Flow
//!
//! 1. Generate authorization URL with `authorization_url()`
//! 2. Redirect the owner to the provider's login page
//! 3. The provider redirects back with an authorization code
//! 4. Exchange the code for an access token with `exchange_code()`
//! 5. Resolve the token to an identity with `fetch_user()`
//!
//! # Example
//!
//! ```rust,ignore
//! use wishbox_server::services::auth::ProviderClient;
//!
//! let client = ProviderClient::new(&config.provider);
//!
//! // Generate login URL
//! let state = generate_state();
//! let auth_url = client.authorization_url("https://example.com/auth/callback", &state);
//!
//! // After the OAuth callback, resolve the code to an identity
//! let token = client.exchange_code(&code, "https://example.com/auth/callback").await?;
//! let user = client.fetch_user(&token).await?;
//! ```

mod error;

pub use error::AuthError;

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::Deserialize;
use uuid::Uuid;

use wishbox_core::{Email, OwnerId};

use crate::config::ProviderConfig;

/// An authenticated identity as reported by the provider's userinfo endpoint.
#[derive(Debug, Clone)]
pub struct ProviderUser {
    /// Provider-issued subject, stable across sessions.
    pub id: OwnerId,
    /// Email the provider has on file.
    pub email: Email,
}

/// Wire format of the token endpoint response.
///
/// Providers send more fields (token type, expiry, refresh token); the
/// access token is used once, synchronously, so the rest is ignored.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Wire format of the userinfo endpoint response.
#[derive(Debug, Deserialize)]
struct UserinfoResponse {
    /// OIDC providers call this `sub`, GoTrue-style providers call it `id`.
    #[serde(alias = "id")]
    sub: Uuid,
    email: String,
}

/// Client for the identity provider's OAuth endpoints.
#[derive(Clone)]
pub struct ProviderClient {
    inner: Arc<ProviderClientInner>,
}

struct ProviderClientInner {
    client: reqwest::Client,
    config: ProviderConfig,
}

impl ProviderClient {
    /// Create a new identity provider client.
    #[must_use]
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            inner: Arc::new(ProviderClientInner {
                client: reqwest::Client::new(),
                config: config.clone(),
            }),
        }
    }

    /// Generate the authorization URL for sign-in.
    ///
    /// Redirect owners to this URL to begin the OAuth flow.
    ///
    /// # Arguments
    ///
    /// * `redirect_uri` - The callback URL to redirect to after authentication
    /// * `state` - A random string stored in the session to prevent CSRF attacks
    #[must_use]
    pub fn authorization_url(&self, redirect_uri: &str, state: &str) -> String {
        let mut url = self.inner.config.authorize_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.inner.config.client_id)
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("scope", &self.inner.config.scopes)
            .append_pair("state", state);
        url.to_string()
    }

    /// Exchange an authorization code for an access token.
    ///
    /// # Arguments
    ///
    /// * `code` - The authorization code from the OAuth callback
    /// * `redirect_uri` - The same redirect URI used in the authorization request
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenExchange` if the provider rejects the code.
    pub async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<String, AuthError> {
        let params = [
            ("grant_type", "authorization_code"),
            ("client_id", self.inner.config.client_id.as_str()),
            (
                "client_secret",
                self.inner.config.client_secret.expose_secret(),
            ),
            ("code", code),
            ("redirect_uri", redirect_uri),
        ];

        let response = self
            .inner
            .client
            .post(self.inner.config.token_url.clone())
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AuthError::TokenExchange(format!("{status}: {text}")));
        }

        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }

    /// Resolve an access token to the identity it belongs to.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Userinfo` if the provider rejects the token.
    /// Returns `AuthError::InvalidEmail` if the reported email does not parse.
    pub async fn fetch_user(&self, access_token: &str) -> Result<ProviderUser, AuthError> {
        let response = self
            .inner
            .client
            .get(self.inner.config.userinfo_url.clone())
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AuthError::Userinfo(format!("{status}: {text}")));
        }

        let user: UserinfoResponse = response.json().await?;
        let email = Email::parse(&user.email)?;

        Ok(ProviderUser {
            id: OwnerId::new(user.sub),
            email,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn test_client() -> ProviderClient {
        ProviderClient::new(&ProviderConfig {
            client_id: "wishbox".to_string(),
            client_secret: SecretString::from("shhh"),
            authorize_url: "https://id.test/oauth/authorize".parse().unwrap(),
            token_url: "https://id.test/oauth/token".parse().unwrap(),
            userinfo_url: "https://id.test/oauth/userinfo".parse().unwrap(),
            scopes: "openid email".to_string(),
        })
    }

    #[test]
    fn test_authorization_url_carries_parameters() {
        let client = test_client();
        let url = client.authorization_url("https://app.test/auth/callback", "abc123");

        assert!(url.starts_with("https://id.test/oauth/authorize?"));
        assert!(url.contains("client_id=wishbox"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("redirect_uri=https%3A%2F%2Fapp.test%2Fauth%2Fcallback"));
        assert!(url.contains("scope=openid+email"));
        assert!(url.contains("state=abc123"));
    }

    #[test]
    fn test_userinfo_accepts_sub_or_id() {
        let from_sub: UserinfoResponse = serde_json::from_str(
            r#"{"sub": "a36ebe36-6e40-4e14-b85a-86ebc82a7d94", "email": "a@example.com"}"#,
        )
        .unwrap();
        let from_id: UserinfoResponse = serde_json::from_str(
            r#"{"id": "a36ebe36-6e40-4e14-b85a-86ebc82a7d94", "email": "a@example.com"}"#,
        )
        .unwrap();

        assert_eq!(from_sub.sub, from_id.sub);
    }
}
