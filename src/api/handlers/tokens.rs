//! Handlers for token management endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::api::dto::token::{
    CreateTokenRequest, ProtectTokenRequest, TokenResponse, UpdateTokenRequest,
};
use crate::domain::auth::AuthContext;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the tokens owned by the authenticated user.
///
/// # Endpoint
///
/// `GET /token`
pub async fn list_tokens_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<Vec<TokenResponse>>, AppError> {
    let tokens = state.token_registry.list_tokens(&ctx).await?;

    Ok(Json(tokens.into_iter().map(TokenResponse::from).collect()))
}

/// Registers a new token owned by the authenticated user.
///
/// # Endpoint
///
/// `POST /token`
///
/// # Errors
///
/// Returns 409 Conflict on a name collision (any owner), 422 Unprocessable
/// Entity on reserved-name and target-URL failures.
pub async fn create_token_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(payload): Json<CreateTokenRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), AppError> {
    payload.validate()?;

    let token = state
        .token_registry
        .create(
            &payload.token,
            payload.target_url.as_deref(),
            payload.protect_token.as_deref(),
            &ctx,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(token.into())))
}

/// Fetches a token owned by the authenticated user.
///
/// # Endpoint
///
/// `GET /token/{name}`
pub async fn get_token_handler(
    Path(name): Path<String>,
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<TokenResponse>, AppError> {
    let token = state.token_registry.get(&name, &ctx).await?;

    Ok(Json(token.into()))
}

/// Merge-updates a token's target URL and protect token.
///
/// # Endpoint
///
/// `PUT /token/{name}`
///
/// An absent `targetUrl` keeps the stored value; an absent `protectToken`
/// clears protection.
pub async fn update_token_handler(
    Path(name): Path<String>,
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(payload): Json<UpdateTokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    payload.validate()?;

    let token = state
        .token_registry
        .update(
            &name,
            payload.target_url.as_deref(),
            payload.protect_token.as_deref(),
            &ctx,
        )
        .await?;

    Ok(Json(token.into()))
}

/// Sets or clears only the protect token, keeping the stored target URL.
///
/// # Endpoint
///
/// `PUT /token/{name}/protect`
pub async fn protect_token_handler(
    Path(name): Path<String>,
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(payload): Json<ProtectTokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    payload.validate()?;

    // Fetch first so the stored target URL survives the merge update, and so
    // a foreign-owned token reports access_denied rather than token_not_found.
    let existing = state.token_registry.get(&name, &ctx).await?;

    let token = state
        .token_registry
        .update(
            &name,
            Some(existing.target_url.as_str()),
            payload.protect_token.as_deref(),
            &ctx,
        )
        .await?;

    Ok(Json(token.into()))
}

/// Deletes a token owned by the authenticated user.
///
/// # Endpoint
///
/// `DELETE /token/{name}`
///
/// Deleting a token that does not exist is a no-op; deleting another user's
/// token returns 403 Forbidden.
pub async fn delete_token_handler(
    Path(name): Path<String>,
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<StatusCode, AppError> {
    state.token_registry.delete(&name, &ctx).await?;

    Ok(StatusCode::NO_CONTENT)
}
