//! Per-request authentication state.
//!
//! A request carries at most one credential form: an authenticated user
//! (HTTP Basic) or a supplied protect token (Bearer or raw `protectToken`
//! header). The context is built once per request by the extraction
//! middleware and dropped with the request, so there is no cross-request
//! state to clear.

use crate::domain::entities::User;

/// Result of evaluating the inbound credential headers.
///
/// The hard-rejection case (malformed or non-matching Basic credentials) is
/// not a variant: extraction fails the whole request with
/// [`crate::error::AppError::AccessDenied`] before a context exists.
#[derive(Debug, Clone)]
pub enum AuthOutcome {
    /// A Basic credential matched a registered user.
    Authenticated(User),
    /// A protect token was supplied without authenticating a user.
    ProtectToken(String),
    /// No credential form was present.
    Anonymous,
}

/// Credential state for the duration of one request.
///
/// Fields are private so a context can only be built empty or from an
/// [`AuthOutcome`], keeping the at-most-one-credential invariant.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    user: Option<User>,
    protect_token: Option<String>,
}

impl AuthContext {
    /// An anonymous context carrying no credentials.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_outcome(outcome: AuthOutcome) -> Self {
        match outcome {
            AuthOutcome::Authenticated(user) => Self {
                user: Some(user),
                protect_token: None,
            },
            AuthOutcome::ProtectToken(value) => Self {
                user: None,
                protect_token: Some(value),
            },
            AuthOutcome::Anonymous => Self::empty(),
        }
    }

    /// Context for an authenticated user, as produced by a valid Basic
    /// credential.
    pub fn authenticated(user: User) -> Self {
        Self::from_outcome(AuthOutcome::Authenticated(user))
    }

    /// Context carrying a supplied protect token.
    pub fn with_protect_token(value: impl Into<String>) -> Self {
        Self::from_outcome(AuthOutcome::ProtectToken(value.into()))
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn protect_token(&self) -> Option<&str> {
        self.protect_token.as_deref()
    }
}
