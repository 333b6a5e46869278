//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use wishbox_core::{Email, OwnerId};

/// Session-stored owner identity.
///
/// Minimal data stored in the session to identify the signed-in owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentOwner {
    /// Subject the identity provider issued for this owner.
    pub id: OwnerId,
    /// Owner's email address, for display only.
    pub email: Email,
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current signed-in owner.
    pub const CURRENT_OWNER: &str = "current_owner";

    /// Key for OAuth state (CSRF protection).
    pub const OAUTH_STATE: &str = "oauth_state";
}
