#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde_json::json;

use tokenlink::application::services::{TokenRegistry, UserService};
use tokenlink::domain::stores::{TokenStore, UserStore};
use tokenlink::infrastructure::persistence::{MemoryTokenStore, MemoryUserStore};
use tokenlink::infrastructure::security::{HmacPasswordHasher, PasswordHasher};
use tokenlink::routes::router;
use tokenlink::state::AppState;

pub fn create_test_state() -> AppState {
    let users: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
    let tokens: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    let hasher: Arc<dyn PasswordHasher> = Arc::new(HmacPasswordHasher::new(
        "test-signing-secret".to_string(),
    ));

    let user_service = Arc::new(UserService::new(users, tokens.clone(), hasher));
    let token_registry = Arc::new(TokenRegistry::new(tokens.clone()));

    AppState::new(user_service, token_registry, tokens, "memory")
}

pub fn test_server() -> TestServer {
    TestServer::new(router(create_test_state())).unwrap()
}

pub fn basic_auth(username: &str, password: &str) -> String {
    format!(
        "Basic {}",
        BASE64.encode(format!("{username}:{password}"))
    )
}

pub async fn register_user(server: &TestServer, username: &str, password: &str) {
    server
        .post("/user")
        .json(&json!({ "username": username, "password": password }))
        .await
        .assert_status_success();
}

pub async fn create_token(
    server: &TestServer,
    auth: &str,
    name: &str,
    target_url: &str,
    protect_token: Option<&str>,
) {
    server
        .post("/token")
        .add_header("Authorization", auth)
        .json(&json!({
            "token": name,
            "targetUrl": target_url,
            "protectToken": protect_token,
        }))
        .await
        .assert_status_success();
}
