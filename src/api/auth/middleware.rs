//! Credential extraction middleware.
//!
//! Runs the per-request credential state machine once, before any handler:
//!
//! 1. `Authorization: Basic <base64(user:pass)>` - decode and check the login;
//!    any malformed or non-matching Basic credential fails the whole request
//! 2. else `Authorization: Bearer <token>` - carry the trimmed value as the
//!    supplied protect token
//! 3. else a raw `protectToken` header - carry that value
//! 4. else - the request stays anonymous
//!
//! Exactly one credential form is honored per request. The resulting
//! [`AuthContext`] is stored in the request extensions, so it is scoped to
//! this request alone and dropped on every exit path.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde_json::json;

use crate::application::services::UserService;
use crate::domain::auth::{AuthContext, AuthOutcome};
use crate::error::AppError;
use crate::state::AppState;

/// Raw header carrying a protect token outside an `Authorization` scheme.
pub const PROTECT_TOKEN_HEADER: &str = "protectToken";

/// Evaluates the inbound headers to a single credential outcome.
///
/// # Errors
///
/// Returns [`AppError::AccessDenied`] for a Basic credential that is
/// malformed (bad base64, not UTF-8, no `:` separator) or does not match a
/// registered user. This is a hard failure for the whole request, not a
/// fallthrough to the next credential form.
pub async fn evaluate_headers(
    headers: &HeaderMap,
    users: &UserService,
) -> Result<AuthOutcome, AppError> {
    if let Some(auth) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        if let Some(encoded) = auth.strip_prefix("Basic ") {
            let (username, password) = decode_basic(encoded)?;
            let user = users.authenticate(&username, &password).await?;
            return Ok(AuthOutcome::Authenticated(user));
        }

        if let Some(value) = auth.strip_prefix("Bearer ") {
            return Ok(AuthOutcome::ProtectToken(value.trim().to_string()));
        }
    }

    if let Some(value) = headers
        .get(PROTECT_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        return Ok(AuthOutcome::ProtectToken(value.to_string()));
    }

    Ok(AuthOutcome::Anonymous)
}

fn decode_basic(encoded: &str) -> Result<(String, String), AppError> {
    let rejected = || {
        AppError::access_denied(
            "The operation is not allowed",
            json!({ "reason": "Malformed Basic credentials" }),
        )
    };

    let decoded = BASE64.decode(encoded.trim()).map_err(|_| rejected())?;
    let decoded = String::from_utf8(decoded).map_err(|_| rejected())?;
    let (username, password) = decoded.split_once(':').ok_or_else(rejected)?;

    Ok((username.to_string(), password.to_string()))
}

/// Axum middleware storing the request's [`AuthContext`] in its extensions.
///
/// Applied to every route; extraction is a no-op for requests without
/// credentials.
pub async fn layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let outcome = evaluate_headers(req.headers(), &state.user_service).await?;
    req.extensions_mut()
        .insert(AuthContext::from_outcome(outcome));

    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // A route that somehow bypassed the middleware yields an anonymous
        // context, so operations fail closed with Unauthenticated.
        Ok(parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .unwrap_or_else(AuthContext::empty))
    }
}
