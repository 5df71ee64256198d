//! Token registry: validation, ownership enforcement, and resolution.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::domain::auth::AuthContext;
use crate::domain::entities::{Token, User, RESERVED_TOKEN_NAME};
use crate::domain::stores::TokenStore;
use crate::error::AppError;
use crate::utils::target_url::{validate_target_url, TargetUrlError};

/// The core engine governing token creation, mutation, and resolution.
///
/// Every mutating operation takes the request's [`AuthContext`] and enforces
/// ownership; [`resolve`] is the anonymous path and only checks the protect
/// token. Lookups are deliberately asymmetric: creation checks name
/// collisions globally (token names share one redirect namespace), while
/// update and get are owner-scoped so they cannot be used to probe for other
/// users' tokens.
///
/// [`resolve`]: TokenRegistry::resolve
pub struct TokenRegistry {
    tokens: Arc<dyn TokenStore>,
}

impl TokenRegistry {
    /// Creates a new registry over a token store.
    pub fn new(tokens: Arc<dyn TokenStore>) -> Self {
        Self { tokens }
    }

    /// Lists the tokens owned by the authenticated user, in store-native
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthenticated`] without an authenticated user.
    pub async fn list_tokens(&self, ctx: &AuthContext) -> Result<Vec<Token>, AppError> {
        let user = require_user(ctx)?;
        self.tokens.find_all_by_owner(&user.username).await
    }

    /// Creates a token owned by the authenticated user.
    ///
    /// Checks run in a fixed order and the first failure wins; nothing is
    /// persisted on any failure.
    ///
    /// # Errors
    ///
    /// - [`AppError::Unauthenticated`] - no authenticated user
    /// - [`AppError::ReservedName`] - `name` is the reserved `"token"`
    /// - [`AppError::DuplicateToken`] - any token with `name` exists,
    ///   regardless of owner
    /// - [`AppError::MissingTargetUrl`] - `target_url` is absent
    /// - [`AppError::ForbiddenTarget`] - `target_url` contains `localhost`
    /// - [`AppError::InvalidTargetUrl`] - `target_url` is not an absolute URL
    pub async fn create(
        &self,
        name: &str,
        target_url: Option<&str>,
        protect_token: Option<&str>,
        ctx: &AuthContext,
    ) -> Result<Token, AppError> {
        let user = require_user(ctx)?;

        if name == RESERVED_TOKEN_NAME {
            return Err(AppError::reserved_name(
                "The token name is reserved",
                json!({ "name": name }),
            ));
        }

        if self.tokens.exists_by_name(name).await? {
            return Err(AppError::duplicate_token(
                "The token already exists",
                json!({ "name": name }),
            ));
        }

        let target_url = target_url.ok_or_else(|| {
            AppError::missing_target_url("The target URL is required", json!({ "name": name }))
        })?;
        check_target_url(target_url)?;

        let token = Token::new(
            name.to_string(),
            target_url.to_string(),
            protect_token.map(str::to_string),
            user.username.clone(),
            Utc::now(),
        );

        self.tokens.insert(token).await
    }

    /// Updates a token owned by the authenticated user.
    ///
    /// This is a merge update: an absent `target_url` retains the stored
    /// value. `protect_token` is always replaced with the given value, so
    /// passing `None` clears protection.
    ///
    /// # Errors
    ///
    /// - [`AppError::Unauthenticated`] - no authenticated user
    /// - [`AppError::TokenNotFound`] - no token with `name` is owned by the
    ///   caller; a token owned by someone else reports the same error
    /// - [`AppError::ForbiddenTarget`] / [`AppError::InvalidTargetUrl`] - the
    ///   resolved target URL fails validation
    pub async fn update(
        &self,
        name: &str,
        target_url: Option<&str>,
        protect_token: Option<&str>,
        ctx: &AuthContext,
    ) -> Result<Token, AppError> {
        let user = require_user(ctx)?;

        let existing = self
            .tokens
            .find_by_name(name)
            .await?
            .filter(|t| t.is_owned_by(&user.username))
            .ok_or_else(|| {
                AppError::token_not_found("The token not found", json!({ "name": name }))
            })?;

        let target_url = target_url.unwrap_or(&existing.target_url).to_string();
        check_target_url(&target_url)?;

        let updated = Token {
            target_url,
            protect_token: protect_token.map(str::to_string),
            ..existing
        };

        self.tokens.update(updated).await
    }

    /// Deletes a token owned by the authenticated user.
    ///
    /// Deleting a token that does not exist is a silent no-op.
    ///
    /// # Errors
    ///
    /// - [`AppError::Unauthenticated`] - no authenticated user
    /// - [`AppError::AccessDenied`] - the token exists but belongs to a
    ///   different user
    pub async fn delete(&self, name: &str, ctx: &AuthContext) -> Result<(), AppError> {
        let user = require_user(ctx)?;

        match self.tokens.find_by_name(name).await? {
            None => Ok(()),
            Some(token) if !token.is_owned_by(&user.username) => Err(AppError::access_denied(
                "The operation is not allowed",
                json!({ "name": name }),
            )),
            Some(token) => self.tokens.delete_by_name(&token.name).await,
        }
    }

    /// Fetches a token owned by the authenticated user.
    ///
    /// # Errors
    ///
    /// - [`AppError::Unauthenticated`] - no authenticated user
    /// - [`AppError::TokenNotFound`] - no token with `name` exists at all
    /// - [`AppError::AccessDenied`] - the token belongs to a different user
    pub async fn get(&self, name: &str, ctx: &AuthContext) -> Result<Token, AppError> {
        let user = require_user(ctx)?;

        let token = self.tokens.find_by_name(name).await?.ok_or_else(|| {
            AppError::token_not_found("The token not found", json!({ "name": name }))
        })?;

        if !token.is_owned_by(&user.username) {
            return Err(AppError::access_denied(
                "The operation is not allowed",
                json!({ "name": name }),
            ));
        }

        Ok(token)
    }

    /// Resolves a token to its target URL for redirection.
    ///
    /// This is the anonymous path: no authenticated user is required. A
    /// protected token resolves only when the supplied protect token matches
    /// the stored one.
    ///
    /// # Errors
    ///
    /// - [`AppError::TokenNotFound`] - no token with `name` exists
    /// - [`AppError::AccessDenied`] - the token is protected and the supplied
    ///   value is absent or does not match
    pub async fn resolve(
        &self,
        name: &str,
        supplied_protect_token: Option<&str>,
    ) -> Result<String, AppError> {
        let token = self.tokens.find_by_name(name).await?.ok_or_else(|| {
            AppError::token_not_found("The token not found", json!({ "name": name }))
        })?;

        match &token.protect_token {
            Some(expected) if supplied_protect_token != Some(expected.as_str()) => {
                Err(AppError::access_denied(
                    "The token is protected",
                    json!({ "name": name }),
                ))
            }
            _ => Ok(token.target_url),
        }
    }
}

fn require_user(ctx: &AuthContext) -> Result<&User, AppError> {
    ctx.user().ok_or_else(|| {
        AppError::unauthenticated("Authentication is required", json!({}))
    })
}

fn check_target_url(target_url: &str) -> Result<(), AppError> {
    validate_target_url(target_url).map_err(|e| match e {
        TargetUrlError::ForbiddenHost => AppError::forbidden_target(
            "The target URL must not point at localhost",
            json!({ "target_url": target_url }),
        ),
        TargetUrlError::InvalidFormat(reason) => AppError::invalid_target_url(
            "The target URL is not a valid absolute URL",
            json!({ "target_url": target_url, "reason": reason }),
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stores::MockTokenStore;

    fn alice_ctx() -> AuthContext {
        AuthContext::authenticated(User::new(
            "alice".to_string(),
            "hash".to_string(),
            Utc::now(),
        ))
    }

    fn stored_token(name: &str, owner: &str, protect: Option<&str>) -> Token {
        Token::new(
            name.to_string(),
            "https://example.com/sale".to_string(),
            protect.map(str::to_string),
            owner.to_string(),
            Utc::now(),
        )
    }

    fn registry(mock: MockTokenStore) -> TokenRegistry {
        TokenRegistry::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn test_list_tokens_requires_user() {
        let result = registry(MockTokenStore::new())
            .list_tokens(&AuthContext::empty())
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::Unauthenticated { .. }
        ));
    }

    #[tokio::test]
    async fn test_list_tokens_scoped_to_owner() {
        let mut mock = MockTokenStore::new();
        mock.expect_find_all_by_owner()
            .withf(|owner| owner == "alice")
            .times(1)
            .returning(|_| Ok(vec![stored_token("promo", "alice", None)]));

        let tokens = registry(mock).list_tokens(&alice_ctx()).await.unwrap();

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].name, "promo");
    }

    #[tokio::test]
    async fn test_create_requires_user() {
        let result = registry(MockTokenStore::new())
            .create("promo", Some("https://example.com"), None, &AuthContext::empty())
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::Unauthenticated { .. }
        ));
    }

    #[tokio::test]
    async fn test_create_reserved_name() {
        // The reserved-name check runs before any store access.
        let result = registry(MockTokenStore::new())
            .create("token", Some("https://example.com"), None, &alice_ctx())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::ReservedName { .. }));
    }

    #[tokio::test]
    async fn test_create_duplicate_any_owner() {
        let mut mock = MockTokenStore::new();
        mock.expect_exists_by_name()
            .withf(|name| name == "promo")
            .times(1)
            .returning(|_| Ok(true));

        let result = registry(mock)
            .create("promo", Some("https://example.com"), None, &alice_ctx())
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::DuplicateToken { .. }
        ));
    }

    #[tokio::test]
    async fn test_create_duplicate_wins_over_missing_url() {
        let mut mock = MockTokenStore::new();
        mock.expect_exists_by_name().times(1).returning(|_| Ok(true));

        let result = registry(mock)
            .create("promo", None, None, &alice_ctx())
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::DuplicateToken { .. }
        ));
    }

    #[tokio::test]
    async fn test_create_missing_target_url() {
        let mut mock = MockTokenStore::new();
        mock.expect_exists_by_name().times(1).returning(|_| Ok(false));

        let result = registry(mock)
            .create("promo", None, None, &alice_ctx())
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::MissingTargetUrl { .. }
        ));
    }

    #[tokio::test]
    async fn test_create_localhost_target() {
        let mut mock = MockTokenStore::new();
        mock.expect_exists_by_name().times(1).returning(|_| Ok(false));

        let result = registry(mock)
            .create("promo", Some("http://localhost:9999"), None, &alice_ctx())
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::ForbiddenTarget { .. }
        ));
    }

    #[tokio::test]
    async fn test_create_invalid_target() {
        let mut mock = MockTokenStore::new();
        mock.expect_exists_by_name().times(1).returning(|_| Ok(false));

        let result = registry(mock)
            .create("promo", Some("not a url"), None, &alice_ctx())
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::InvalidTargetUrl { .. }
        ));
    }

    #[tokio::test]
    async fn test_create_success() {
        let mut mock = MockTokenStore::new();
        mock.expect_exists_by_name().times(1).returning(|_| Ok(false));
        mock.expect_insert()
            .withf(|token| {
                token.name == "promo"
                    && token.target_url == "https://example.com/sale"
                    && token.protect_token.as_deref() == Some("secret")
                    && token.owner == "alice"
            })
            .times(1)
            .returning(|token| Ok(token));

        let token = registry(mock)
            .create(
                "promo",
                Some("https://example.com/sale"),
                Some("secret"),
                &alice_ctx(),
            )
            .await
            .unwrap();

        assert_eq!(token.owner, "alice");
        assert!(token.is_protected());
    }

    #[tokio::test]
    async fn test_update_requires_user() {
        let result = registry(MockTokenStore::new())
            .update("promo", None, None, &AuthContext::empty())
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::Unauthenticated { .. }
        ));
    }

    #[tokio::test]
    async fn test_update_unknown_token() {
        let mut mock = MockTokenStore::new();
        mock.expect_find_by_name().times(1).returning(|_| Ok(None));

        let result = registry(mock)
            .update("ghost", Some("https://example.com"), None, &alice_ctx())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::TokenNotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_foreign_token_indistinguishable_from_missing() {
        let mut mock = MockTokenStore::new();
        mock.expect_find_by_name()
            .times(1)
            .returning(|_| Ok(Some(stored_token("promo", "bob", None))));

        let result = registry(mock)
            .update("promo", Some("https://example.com"), None, &alice_ctx())
            .await;

        // Owner-scoped lookup: bob's token looks absent to alice.
        assert!(matches!(result.unwrap_err(), AppError::TokenNotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_merge_keeps_target_url() {
        let mut mock = MockTokenStore::new();
        mock.expect_find_by_name()
            .times(1)
            .returning(|_| Ok(Some(stored_token("promo", "alice", None))));
        mock.expect_update()
            .withf(|token| {
                token.target_url == "https://example.com/sale"
                    && token.protect_token.as_deref() == Some("secret")
            })
            .times(1)
            .returning(|token| Ok(token));

        let token = registry(mock)
            .update("promo", None, Some("secret"), &alice_ctx())
            .await
            .unwrap();

        assert_eq!(token.target_url, "https://example.com/sale");
        assert_eq!(token.protect_token.as_deref(), Some("secret"));
    }

    #[tokio::test]
    async fn test_update_clears_protect_token() {
        let mut mock = MockTokenStore::new();
        mock.expect_find_by_name()
            .times(1)
            .returning(|_| Ok(Some(stored_token("promo", "alice", Some("secret")))));
        mock.expect_update()
            .withf(|token| token.protect_token.is_none())
            .times(1)
            .returning(|token| Ok(token));

        let token = registry(mock)
            .update("promo", None, None, &alice_ctx())
            .await
            .unwrap();

        assert!(!token.is_protected());
    }

    #[tokio::test]
    async fn test_update_rejects_localhost_target() {
        let mut mock = MockTokenStore::new();
        mock.expect_find_by_name()
            .times(1)
            .returning(|_| Ok(Some(stored_token("promo", "alice", None))));

        let result = registry(mock)
            .update("promo", Some("http://localhost:9999"), None, &alice_ctx())
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::ForbiddenTarget { .. }
        ));
    }

    #[tokio::test]
    async fn test_delete_requires_user() {
        let result = registry(MockTokenStore::new())
            .delete("promo", &AuthContext::empty())
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::Unauthenticated { .. }
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_token_is_noop() {
        let mut mock = MockTokenStore::new();
        mock.expect_find_by_name().times(1).returning(|_| Ok(None));
        mock.expect_delete_by_name().times(0);

        registry(mock).delete("ghost", &alice_ctx()).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_foreign_token_denied() {
        let mut mock = MockTokenStore::new();
        mock.expect_find_by_name()
            .times(1)
            .returning(|_| Ok(Some(stored_token("promo", "bob", None))));
        mock.expect_delete_by_name().times(0);

        let result = registry(mock).delete("promo", &alice_ctx()).await;

        assert!(matches!(result.unwrap_err(), AppError::AccessDenied { .. }));
    }

    #[tokio::test]
    async fn test_delete_owned_token() {
        let mut mock = MockTokenStore::new();
        mock.expect_find_by_name()
            .times(1)
            .returning(|_| Ok(Some(stored_token("promo", "alice", None))));
        mock.expect_delete_by_name()
            .withf(|name| name == "promo")
            .times(1)
            .returning(|_| Ok(()));

        registry(mock).delete("promo", &alice_ctx()).await.unwrap();
    }

    #[tokio::test]
    async fn test_get_unknown_token() {
        let mut mock = MockTokenStore::new();
        mock.expect_find_by_name().times(1).returning(|_| Ok(None));

        let result = registry(mock).get("ghost", &alice_ctx()).await;

        assert!(matches!(result.unwrap_err(), AppError::TokenNotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_foreign_token_denied() {
        let mut mock = MockTokenStore::new();
        mock.expect_find_by_name()
            .times(1)
            .returning(|_| Ok(Some(stored_token("promo", "bob", None))));

        let result = registry(mock).get("promo", &alice_ctx()).await;

        assert!(matches!(result.unwrap_err(), AppError::AccessDenied { .. }));
    }

    #[tokio::test]
    async fn test_get_owned_token() {
        let mut mock = MockTokenStore::new();
        mock.expect_find_by_name()
            .times(1)
            .returning(|_| Ok(Some(stored_token("promo", "alice", None))));

        let token = registry(mock).get("promo", &alice_ctx()).await.unwrap();

        assert_eq!(token.name, "promo");
    }

    #[tokio::test]
    async fn test_resolve_unknown_token() {
        let mut mock = MockTokenStore::new();
        mock.expect_find_by_name().times(1).returning(|_| Ok(None));

        let result = registry(mock).resolve("ghost", None).await;

        assert!(matches!(result.unwrap_err(), AppError::TokenNotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_unprotected_token() {
        let mut mock = MockTokenStore::new();
        mock.expect_find_by_name()
            .times(1)
            .returning(|_| Ok(Some(stored_token("promo", "alice", None))));

        let target = registry(mock).resolve("promo", None).await.unwrap();

        assert_eq!(target, "https://example.com/sale");
    }

    #[tokio::test]
    async fn test_resolve_unprotected_ignores_supplied_value() {
        let mut mock = MockTokenStore::new();
        mock.expect_find_by_name()
            .times(1)
            .returning(|_| Ok(Some(stored_token("promo", "alice", None))));

        let target = registry(mock)
            .resolve("promo", Some("anything"))
            .await
            .unwrap();

        assert_eq!(target, "https://example.com/sale");
    }

    #[tokio::test]
    async fn test_resolve_protected_without_value_denied() {
        let mut mock = MockTokenStore::new();
        mock.expect_find_by_name()
            .times(1)
            .returning(|_| Ok(Some(stored_token("promo", "alice", Some("secret")))));

        let result = registry(mock).resolve("promo", None).await;

        assert!(matches!(result.unwrap_err(), AppError::AccessDenied { .. }));
    }

    #[tokio::test]
    async fn test_resolve_protected_with_wrong_value_denied() {
        let mut mock = MockTokenStore::new();
        mock.expect_find_by_name()
            .times(1)
            .returning(|_| Ok(Some(stored_token("promo", "alice", Some("secret")))));

        let result = registry(mock).resolve("promo", Some("guess")).await;

        assert!(matches!(result.unwrap_err(), AppError::AccessDenied { .. }));
    }

    #[tokio::test]
    async fn test_resolve_protected_with_matching_value() {
        let mut mock = MockTokenStore::new();
        mock.expect_find_by_name()
            .times(1)
            .returning(|_| Ok(Some(stored_token("promo", "alice", Some("secret")))));

        let target = registry(mock)
            .resolve("promo", Some("secret"))
            .await
            .unwrap();

        assert_eq!(target, "https://example.com/sale");
    }
}
