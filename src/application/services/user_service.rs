//! User lifecycle service.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::domain::entities::User;
use crate::domain::stores::{TokenStore, UserStore};
use crate::error::AppError;
use crate::infrastructure::security::PasswordHasher;

/// Service for user registration, login checks, and deletion.
///
/// Passwords pass through the [`PasswordHasher`] collaborator on the way in
/// and are compared through it on login; the service never sees which
/// algorithm is in use. Deleting a user cascades to every token it owns,
/// tokens first, so a failure mid-cascade never leaves orphaned tokens
/// behind a missing user.
pub struct UserService {
    users: Arc<dyn UserStore>,
    tokens: Arc<dyn TokenStore>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserStore>,
        tokens: Arc<dyn TokenStore>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            users,
            tokens,
            hasher,
        }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UserAlreadyExists`] if the username is taken.
    pub async fn create(&self, username: &str, password: &str) -> Result<User, AppError> {
        if self.users.exists_by_username(username).await? {
            return Err(AppError::user_already_exists(
                "The user already exists",
                json!({ "username": username }),
            ));
        }

        let user = User::new(
            username.to_string(),
            self.hasher.hash(password),
            Utc::now(),
        );

        self.users.save(user).await
    }

    /// Fetches a user by username.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UserNotFound`] if absent.
    pub async fn get(&self, username: &str) -> Result<User, AppError> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| {
                AppError::user_not_found("The user not found", json!({ "username": username }))
            })
    }

    /// Checks a Basic login credential.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AccessDenied`] when the user is unknown or the
    /// password does not verify; the two cases are indistinguishable to the
    /// caller.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, AppError> {
        let denied =
            || AppError::access_denied("The operation is not allowed", json!({}));

        let user = match self.get(username).await {
            Ok(user) => user,
            Err(AppError::UserNotFound { .. }) => return Err(denied()),
            Err(e) => return Err(e),
        };

        if !self.hasher.verify(password, &user.password) {
            return Err(denied());
        }

        Ok(user)
    }

    /// Deletes a user and every token it owns. No-op if the user does not
    /// exist.
    pub async fn delete(&self, username: &str) -> Result<(), AppError> {
        if let Some(user) = self.users.find_by_username(username).await? {
            self.tokens.delete_all_by_owner(&user.username).await?;
            self.users.delete(&user.username).await?;
        }
        Ok(())
    }
}
