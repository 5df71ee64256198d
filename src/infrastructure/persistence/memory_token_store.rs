//! In-memory implementation of the token store.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Mutex;

use crate::domain::entities::Token;
use crate::domain::stores::TokenStore;
use crate::error::AppError;

/// In-memory token store backed by a mutex-guarded map.
///
/// [`TokenStore::insert`] performs its existence check and insert under a
/// single lock, so concurrent creation of the same name rejects the second
/// writer deterministically.
#[derive(Default)]
pub struct MemoryTokenStore {
    tokens: Mutex<HashMap<String, Token>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn insert(&self, token: Token) -> Result<Token, AppError> {
        let mut tokens = self.tokens.lock().await;
        if tokens.contains_key(&token.name) {
            return Err(AppError::duplicate_token(
                "The token already exists",
                json!({ "name": token.name }),
            ));
        }
        tokens.insert(token.name.clone(), token.clone());
        Ok(token)
    }

    async fn update(&self, token: Token) -> Result<Token, AppError> {
        let mut tokens = self.tokens.lock().await;
        if !tokens.contains_key(&token.name) {
            return Err(AppError::token_not_found(
                "The token not found",
                json!({ "name": token.name }),
            ));
        }
        tokens.insert(token.name.clone(), token.clone());
        Ok(token)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Token>, AppError> {
        Ok(self.tokens.lock().await.get(name).cloned())
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, AppError> {
        Ok(self.tokens.lock().await.contains_key(name))
    }

    async fn find_all_by_owner(&self, owner: &str) -> Result<Vec<Token>, AppError> {
        Ok(self
            .tokens
            .lock()
            .await
            .values()
            .filter(|t| t.is_owned_by(owner))
            .cloned()
            .collect())
    }

    async fn delete_all_by_owner(&self, owner: &str) -> Result<(), AppError> {
        self.tokens.lock().await.retain(|_, t| !t.is_owned_by(owner));
        Ok(())
    }

    async fn delete_by_name(&self, name: &str) -> Result<(), AppError> {
        self.tokens.lock().await.remove(name);
        Ok(())
    }
}
