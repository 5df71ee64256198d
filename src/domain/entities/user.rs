//! User entity representing a registered account.

use chrono::{DateTime, Utc};

/// A registered user identified by a unique, immutable username.
///
/// The `password` field holds the hashed credential as produced by the
/// configured [`crate::infrastructure::security::PasswordHasher`]; the raw
/// password is never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance.
    pub fn new(username: String, password: String, created_at: DateTime<Utc>) -> Self {
        Self {
            username,
            password,
            created_at,
        }
    }
}
