//! Store trait for user persistence.

use crate::domain::entities::User;
use crate::error::AppError;
use async_trait::async_trait;

/// Store interface for user records, keyed by username.
///
/// Username uniqueness is the store's responsibility: [`UserStore::save`] on
/// an existing username must be rejected by the backing constraint even if a
/// racing request slipped past the service-level existence check.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserStore`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryUserStore`] - in-memory
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persists a new user record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UserAlreadyExists`] if the username is taken.
    /// Returns [`AppError::Internal`] on backend errors.
    async fn save(&self, user: User) -> Result<User, AppError>;

    /// Finds a user by username.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on backend errors.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Returns whether a user with the given username exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on backend errors.
    async fn exists_by_username(&self, username: &str) -> Result<bool, AppError>;

    /// Deletes the user record. No-op if the username is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on backend errors.
    async fn delete(&self, username: &str) -> Result<(), AppError>;
}
