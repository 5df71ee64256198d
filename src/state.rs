//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{TokenRegistry, UserService};
use crate::domain::stores::TokenStore;

/// Handles to the core services, shared across all request tasks.
///
/// The raw token store handle is kept only for the health probe; handlers go
/// through the services.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub token_registry: Arc<TokenRegistry>,
    pub token_store: Arc<dyn TokenStore>,
    /// Label of the active store backend (`"postgres"` or `"memory"`).
    pub store_backend: &'static str,
}

impl AppState {
    pub fn new(
        user_service: Arc<UserService>,
        token_registry: Arc<TokenRegistry>,
        token_store: Arc<dyn TokenStore>,
        store_backend: &'static str,
    ) -> Self {
        Self {
            user_service,
            token_registry,
            token_store,
            store_backend,
        }
    }
}
