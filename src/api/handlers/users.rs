//! Handlers for user endpoints (register, fetch self, delete self).

use axum::{extract::State, http::StatusCode, Json};
use serde_json::json;
use validator::Validate;

use crate::api::dto::user::{CreateUserRequest, UserResponse};
use crate::domain::auth::AuthContext;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new user.
///
/// # Endpoint
///
/// `POST /user` (public)
///
/// # Errors
///
/// Returns 409 Conflict if the username is taken, 400 Bad Request on
/// validation failure.
pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    payload.validate()?;

    let user = state
        .user_service
        .create(&payload.username, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Returns the authenticated user.
///
/// # Endpoint
///
/// `GET /user` (Basic credentials required)
pub async fn get_user_handler(ctx: AuthContext) -> Result<Json<UserResponse>, AppError> {
    let user = ctx
        .user()
        .cloned()
        .ok_or_else(|| AppError::unauthenticated("Authentication is required", json!({})))?;

    Ok(Json(user.into()))
}

/// Deletes the authenticated user and every token it owns.
///
/// # Endpoint
///
/// `DELETE /user` (Basic credentials required)
pub async fn delete_user_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<StatusCode, AppError> {
    let user = ctx
        .user()
        .ok_or_else(|| AppError::unauthenticated("Authentication is required", json!({})))?;

    state.user_service.delete(&user.username).await?;

    Ok(StatusCode::NO_CONTENT)
}
