//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /user`, `GET /user`, `DELETE /user` - user lifecycle
//! - `/token`, `/token/{name}`, `/token/{name}/protect` - token management
//! - `GET  /{token}` - anonymous resolution redirect
//! - `GET  /health`  - health check
//!
//! # Middleware
//!
//! - **Credential extraction** - builds the per-request auth context; runs on
//!   every route so a bad Basic credential rejects the request up front
//! - **Tracing** - structured request/response logging
//! - **Path normalization** - trailing slash handling

use crate::api;
use crate::api::auth;
use crate::api::handlers::{follow_handler, health_handler};
use crate::state::AppState;
use axum::routing::get;
use axum::{middleware, Router};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::Level;

/// Constructs the application router with all routes and middleware.
///
/// The `/{token}` capture is registered last-but-static-paths-win, so
/// `/user`, `/token`, and `/health` are never shadowed by a token name; the
/// reserved-name rule keeps `"token"` itself out of the namespace.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(api::routes::user_routes())
        .merge(api::routes::token_routes())
        .route("/health", get(health_handler))
        .route("/{token}", get(follow_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::layer,
        ))
        .with_state(state)
        .layer(trace_layer())
}

/// The service entry point: [`router`] wrapped with trailing-slash
/// normalization.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

fn trace_layer()
-> TraceLayer<tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>>
{
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}
