//! Authentication error types.

use thiserror::Error;

/// Errors that can occur while talking to the identity provider.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Transport-level failure reaching the provider.
    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The token endpoint rejected the authorization code.
    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    /// The userinfo endpoint rejected the access token.
    #[error("userinfo request failed: {0}")]
    Userinfo(String),

    /// The provider reported an email we cannot accept.
    #[error("invalid email from provider: {0}")]
    InvalidEmail(#[from] wishbox_core::EmailError),
}
