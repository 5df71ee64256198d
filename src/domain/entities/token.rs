//! Token entity representing a short name mapping to a target URL.

use chrono::{DateTime, Utc};

/// Token names live in a single global namespace; this name is reserved
/// because `/token` is the management path segment.
pub const RESERVED_TOKEN_NAME: &str = "token";

/// A short token pointing at a target URL.
///
/// The `name` is caller-chosen and immutable once created. `owner` holds the
/// owning user's username as a value key, not a live reference, so the token
/// store stays decoupled from the user store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub name: String,
    pub target_url: String,
    /// Optional secondary secret; when set, anonymous resolution must supply
    /// a matching value.
    pub protect_token: Option<String>,
    pub owner: String,
    pub created_at: DateTime<Utc>,
}

impl Token {
    /// Creates a new Token instance.
    pub fn new(
        name: String,
        target_url: String,
        protect_token: Option<String>,
        owner: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name,
            target_url,
            protect_token,
            owner,
            created_at,
        }
    }

    /// Returns true if resolution requires a protect token.
    pub fn is_protected(&self) -> bool {
        self.protect_token.is_some()
    }

    /// Returns true if the token is owned by the given username.
    pub fn is_owned_by(&self, username: &str) -> bool {
        self.owner == username
    }
}
