//! Target URL validation.
//!
//! A token's target must be an absolute URL and must not point back at the
//! service host via localhost.

use url::Url;

/// Errors that can occur during target URL validation.
#[derive(Debug, thiserror::Error)]
pub enum TargetUrlError {
    #[error("Target URL must not contain \"localhost\"")]
    ForbiddenHost,

    #[error("Invalid target URL: {0}")]
    InvalidFormat(String),
}

/// Validates a token target URL.
///
/// # Validation Rules
///
/// 1. **Forbidden host**: the literal substring `localhost` is rejected
///    (case-sensitive), checked before syntax so `http://localhost:9999`
///    reports the host problem rather than a parse problem
/// 2. **Syntax**: the value must parse as an absolute URL (scheme required)
///
/// # Errors
///
/// Returns [`TargetUrlError::ForbiddenHost`] when the value contains
/// `localhost`, [`TargetUrlError::InvalidFormat`] when it does not parse.
pub fn validate_target_url(input: &str) -> Result<(), TargetUrlError> {
    if input.contains("localhost") {
        return Err(TargetUrlError::ForbiddenHost);
    }

    Url::parse(input).map_err(|e| TargetUrlError::InvalidFormat(e.to_string()))?;

    Ok(())
}
