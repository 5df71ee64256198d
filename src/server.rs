//! HTTP server initialization and runtime setup.
//!
//! Handles store backend selection, service wiring, and the Axum server
//! lifecycle.

use crate::application::services::{TokenRegistry, UserService};
use crate::config::Config;
use crate::domain::stores::{TokenStore, UserStore};
use crate::infrastructure::persistence::{
    MemoryTokenStore, MemoryUserStore, PgTokenStore, PgUserStore,
};
use crate::infrastructure::security::{HmacPasswordHasher, PasswordHasher};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::extract::Request;
use axum::ServiceExt;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Store backend: PostgreSQL when `DATABASE_URL` is set (with migrations),
///   in-memory otherwise
/// - Password hasher keyed by the configured signing secret
/// - User service and token registry
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (user_store, token_store, store_backend) = build_stores(&config).await?;

    let hasher: Arc<dyn PasswordHasher> = Arc::new(HmacPasswordHasher::new(
        config.password_signing_secret.clone(),
    ));

    let user_service = Arc::new(UserService::new(
        user_store,
        token_store.clone(),
        hasher,
    ));
    let token_registry = Arc::new(TokenRegistry::new(token_store.clone()));

    let state = AppState::new(user_service, token_registry, token_store, store_backend);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}

/// Selects and initializes the store backend.
async fn build_stores(
    config: &Config,
) -> Result<(Arc<dyn UserStore>, Arc<dyn TokenStore>, &'static str)> {
    if let Some(database_url) = &config.database_url {
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
            .connect(database_url)
            .await?;
        tracing::info!("Connected to database");

        sqlx::migrate!("./migrations").run(&pool).await?;

        let pool = Arc::new(pool);
        Ok((
            Arc::new(PgUserStore::new(pool.clone())),
            Arc::new(PgTokenStore::new(pool)),
            "postgres",
        ))
    } else {
        tracing::warn!("DATABASE_URL not set; using in-memory stores, data is lost on restart");
        Ok((
            Arc::new(MemoryUserStore::new()),
            Arc::new(MemoryTokenStore::new()),
            "memory",
        ))
    }
}
