//! DTOs for token endpoints.
//!
//! Body keys are camelCase (`targetUrl`, `protectToken`), matching the raw
//! `protectToken` header spelling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Token;

/// Request to register a new token.
///
/// `target_url` stays optional here: its absence is a registry-level rule
/// (`missing_target_url`) with a defined position in the validation order,
/// not a DTO shape error.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTokenRequest {
    #[validate(length(min = 1, max = 64))]
    pub token: String,

    #[validate(length(max = 2048))]
    pub target_url: Option<String>,

    #[validate(length(max = 128))]
    pub protect_token: Option<String>,
}

/// Merge update for an existing token. An absent `targetUrl` keeps the
/// stored value; an absent `protectToken` clears protection.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTokenRequest {
    #[validate(length(max = 2048))]
    pub target_url: Option<String>,

    #[validate(length(max = 128))]
    pub protect_token: Option<String>,
}

/// Sets or clears only the protect token, keeping the stored target URL.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProtectTokenRequest {
    #[validate(length(max = 128))]
    pub protect_token: Option<String>,
}

/// JSON representation of a token.
///
/// The protect token itself is not echoed; `protected` tells the owner
/// whether resolution is gated.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
    pub target_url: String,
    pub protected: bool,
    pub owner: String,
    pub created_at: DateTime<Utc>,
}

impl From<Token> for TokenResponse {
    fn from(token: Token) -> Self {
        Self {
            protected: token.is_protected(),
            token: token.name,
            target_url: token.target_url,
            owner: token.owner,
            created_at: token.created_at,
        }
    }
}
