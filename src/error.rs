use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

/// Failure taxonomy raised by the core services.
///
/// Every variant carries a human-readable message plus structured details.
/// The HTTP layer maps variants to status codes in [`IntoResponse`]; the
/// services themselves never look at status codes.
#[derive(Debug)]
pub enum AppError {
    /// No authenticated user for an operation that requires one.
    Unauthenticated { message: String, details: Value },
    /// Credentials were presented but are insufficient: wrong password,
    /// wrong protect token, or a non-owner touching a token.
    AccessDenied { message: String, details: Value },
    UserAlreadyExists { message: String, details: Value },
    UserNotFound { message: String, details: Value },
    DuplicateToken { message: String, details: Value },
    TokenNotFound { message: String, details: Value },
    /// The token name collides with the reserved `/token` path segment.
    ReservedName { message: String, details: Value },
    MissingTargetUrl { message: String, details: Value },
    /// The target URL points at localhost.
    ForbiddenTarget { message: String, details: Value },
    InvalidTargetUrl { message: String, details: Value },
    /// Request body failed DTO-level validation.
    Validation { message: String, details: Value },
    Internal { message: String, details: Value },
}

macro_rules! constructor {
    ($name:ident, $variant:ident) => {
        pub fn $name(message: impl Into<String>, details: Value) -> Self {
            Self::$variant {
                message: message.into(),
                details,
            }
        }
    };
}

impl AppError {
    constructor!(unauthenticated, Unauthenticated);
    constructor!(access_denied, AccessDenied);
    constructor!(user_already_exists, UserAlreadyExists);
    constructor!(user_not_found, UserNotFound);
    constructor!(duplicate_token, DuplicateToken);
    constructor!(token_not_found, TokenNotFound);
    constructor!(reserved_name, ReservedName);
    constructor!(missing_target_url, MissingTargetUrl);
    constructor!(forbidden_target, ForbiddenTarget);
    constructor!(invalid_target_url, InvalidTargetUrl);
    constructor!(bad_request, Validation);
    constructor!(internal, Internal);

    /// Stable machine-readable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthenticated { .. } => "unauthenticated",
            AppError::AccessDenied { .. } => "access_denied",
            AppError::UserAlreadyExists { .. } => "user_already_exists",
            AppError::UserNotFound { .. } => "user_not_found",
            AppError::DuplicateToken { .. } => "duplicate_token",
            AppError::TokenNotFound { .. } => "token_not_found",
            AppError::ReservedName { .. } => "reserved_name",
            AppError::MissingTargetUrl { .. } => "missing_target_url",
            AppError::ForbiddenTarget { .. } => "forbidden_target",
            AppError::InvalidTargetUrl { .. } => "invalid_target_url",
            AppError::Validation { .. } => "validation_error",
            AppError::Internal { .. } => "internal_error",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            AppError::AccessDenied { .. } => StatusCode::FORBIDDEN,
            AppError::UserAlreadyExists { .. } | AppError::DuplicateToken { .. } => {
                StatusCode::CONFLICT
            }
            AppError::UserNotFound { .. } | AppError::TokenNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::ReservedName { .. }
            | AppError::MissingTargetUrl { .. }
            | AppError::ForbiddenTarget { .. }
            | AppError::InvalidTargetUrl { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            AppError::Unauthenticated { message, .. }
            | AppError::AccessDenied { message, .. }
            | AppError::UserAlreadyExists { message, .. }
            | AppError::UserNotFound { message, .. }
            | AppError::DuplicateToken { message, .. }
            | AppError::TokenNotFound { message, .. }
            | AppError::ReservedName { message, .. }
            | AppError::MissingTargetUrl { message, .. }
            | AppError::ForbiddenTarget { message, .. }
            | AppError::InvalidTargetUrl { message, .. }
            | AppError::Validation { message, .. }
            | AppError::Internal { message, .. } => message,
        }
    }

    fn into_parts(self) -> (&'static str, String, Value) {
        let code = self.code();
        match self {
            AppError::Unauthenticated { message, details }
            | AppError::AccessDenied { message, details }
            | AppError::UserAlreadyExists { message, details }
            | AppError::UserNotFound { message, details }
            | AppError::DuplicateToken { message, details }
            | AppError::TokenNotFound { message, details }
            | AppError::ReservedName { message, details }
            | AppError::MissingTargetUrl { message, details }
            | AppError::ForbiddenTarget { message, details }
            | AppError::InvalidTargetUrl { message, details }
            | AppError::Validation { message, details }
            | AppError::Internal { message, details } => (code, message, details),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (code, message, details) = self.into_parts();

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() {
                return AppError::internal(
                    "Unique constraint violation",
                    json!({ "constraint": db.constraint() }),
                );
            }
        }

        AppError::internal("Database error", json!({ "reason": e.to_string() }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request(
            "Request validation failed",
            serde_json::to_value(&e).unwrap_or_else(|_| json!({})),
        )
    }
}
