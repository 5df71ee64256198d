//! In-memory implementation of the user store.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Mutex;

use crate::domain::entities::User;
use crate::domain::stores::UserStore;
use crate::error::AppError;

/// In-memory user store backed by a mutex-guarded map.
///
/// Used when no `DATABASE_URL` is configured and by the integration tests.
/// All data is lost on restart.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn save(&self, user: User) -> Result<User, AppError> {
        let mut users = self.users.lock().await;
        // Check-and-insert under one lock: the uniqueness constraint the
        // service-level existence check relies on.
        if users.contains_key(&user.username) {
            return Err(AppError::user_already_exists(
                "The user already exists",
                json!({ "username": user.username }),
            ));
        }
        users.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.lock().await.get(username).cloned())
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, AppError> {
        Ok(self.users.lock().await.contains_key(username))
    }

    async fn delete(&self, username: &str) -> Result<(), AppError> {
        self.users.lock().await.remove(username);
        Ok(())
    }
}
