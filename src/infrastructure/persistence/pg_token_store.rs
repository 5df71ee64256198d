//! PostgreSQL implementation of the token store.

use async_trait::async_trait;
use serde_json::json;
use sqlx::{PgPool, Row};
use std::sync::Arc;

use crate::domain::entities::Token;
use crate::domain::stores::TokenStore;
use crate::error::AppError;

/// PostgreSQL store for tokens.
///
/// Insert-if-absent is delegated to the primary-key constraint on `name`:
/// the second concurrent writer of the same name sees zero affected rows.
pub struct PgTokenStore {
    pool: Arc<PgPool>,
}

impl PgTokenStore {
    /// Creates a new store with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn row_to_token(row: &sqlx::postgres::PgRow) -> Result<Token, AppError> {
    Ok(Token {
        name: row.try_get("name")?,
        target_url: row.try_get("target_url")?,
        protect_token: row.try_get("protect_token")?,
        owner: row.try_get("owner_username")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl TokenStore for PgTokenStore {
    async fn insert(&self, token: Token) -> Result<Token, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO tokens (name, target_url, protect_token, owner_username, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(&token.name)
        .bind(&token.target_url)
        .bind(&token.protect_token)
        .bind(&token.owner)
        .bind(token.created_at)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::duplicate_token(
                "The token already exists",
                json!({ "name": token.name }),
            ));
        }

        Ok(token)
    }

    async fn update(&self, token: Token) -> Result<Token, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE tokens
            SET target_url = $2, protect_token = $3
            WHERE name = $1
            "#,
        )
        .bind(&token.name)
        .bind(&token.target_url)
        .bind(&token.protect_token)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::token_not_found(
                "The token not found",
                json!({ "name": token.name }),
            ));
        }

        Ok(token)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Token>, AppError> {
        let row = sqlx::query(
            r#"
            SELECT name, target_url, protect_token, owner_username, created_at
            FROM tokens
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.as_ref().map(row_to_token).transpose()
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, AppError> {
        let row = sqlx::query("SELECT 1 FROM tokens WHERE name = $1")
            .bind(name)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.is_some())
    }

    async fn find_all_by_owner(&self, owner: &str) -> Result<Vec<Token>, AppError> {
        let rows = sqlx::query(
            r#"
            SELECT name, target_url, protect_token, owner_username, created_at
            FROM tokens
            WHERE owner_username = $1
            ORDER BY created_at
            "#,
        )
        .bind(owner)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.iter().map(row_to_token).collect()
    }

    async fn delete_all_by_owner(&self, owner: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM tokens WHERE owner_username = $1")
            .bind(owner)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn delete_by_name(&self, name: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM tokens WHERE name = $1")
            .bind(name)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
