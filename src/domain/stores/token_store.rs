//! Store trait for token persistence.

use crate::domain::entities::Token;
use crate::error::AppError;
use async_trait::async_trait;

/// Store interface for tokens, keyed by token name.
///
/// Token names form one global namespace. [`TokenStore::insert`] must be an
/// atomic insert-if-absent: under concurrent creation of the same name the
/// second writer is rejected deterministically, either by a mutex around the
/// map or by the database's primary-key constraint. The registry performs a
/// friendly existence check first, but correctness rests on the store.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTokenStore`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryTokenStore`] - in-memory
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Persists a new token. Atomic insert-if-absent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateToken`] if a token with the same name
    /// already exists, regardless of owner.
    /// Returns [`AppError::Internal`] on backend errors.
    async fn insert(&self, token: Token) -> Result<Token, AppError>;

    /// Replaces the mutable fields (`target_url`, `protect_token`) of an
    /// existing token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::TokenNotFound`] if the name is unknown.
    /// Returns [`AppError::Internal`] on backend errors.
    async fn update(&self, token: Token) -> Result<Token, AppError>;

    /// Finds a token by name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on backend errors.
    async fn find_by_name(&self, name: &str) -> Result<Option<Token>, AppError>;

    /// Returns whether a token with the given name exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on backend errors.
    async fn exists_by_name(&self, name: &str) -> Result<bool, AppError>;

    /// Lists all tokens owned by the given username, in store-native order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on backend errors.
    async fn find_all_by_owner(&self, owner: &str) -> Result<Vec<Token>, AppError>;

    /// Deletes every token owned by the given username.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on backend errors.
    async fn delete_all_by_owner(&self, owner: &str) -> Result<(), AppError>;

    /// Deletes the token with the given name. No-op if unknown.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on backend errors.
    async fn delete_by_name(&self, name: &str) -> Result<(), AppError>;
}
