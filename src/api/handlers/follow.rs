//! Handler for anonymous token resolution.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::domain::auth::AuthContext;
use crate::error::AppError;
use crate::state::AppState;

/// Resolves a token and redirects to its target URL.
///
/// # Endpoint
///
/// `GET /{token}` (anonymous)
///
/// A protect token may be supplied via `Authorization: Bearer` or the raw
/// `protectToken` header; the extraction middleware has already placed it in
/// the request context.
///
/// # Errors
///
/// Returns 404 Not Found for an unknown token and 403 Forbidden when a
/// protected token is resolved without a matching protect token.
pub async fn follow_handler(
    Path(name): Path<String>,
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Response, AppError> {
    let target_url = state
        .token_registry
        .resolve(&name, ctx.protect_token())
        .await?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, target_url)]).into_response())
}
