//! Application-wide error types.
//!
//! Domain crates define precise error enums of their own and convert into
//! `AppError` at the boundary where an embedding layer (HTTP, RPC, CLI)
//! needs a uniform shape.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// The uniform error shape handed to embedding layers.
#[derive(Debug, Error)]
pub enum AppError {
    /// The actor may not perform this operation.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The referenced resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request payload is malformed or out of range.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The operation conflicts with a business rule or lifecycle state.
    #[error("business rule violated: {0}")]
    BusinessRule(String),

    /// The operation conflicts with existing state (e.g. a duplicate).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The persistence collaborator failed; safe to retry.
    #[error("persistence failure: {0}")]
    Persistence(String),

    /// An external collaborator (identity, authorization, compensation)
    /// failed; safe to retry.
    #[error("external service failure: {0}")]
    ExternalService(String),

    /// An unexpected internal failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Shorthand for a `Persistence` error.
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Shorthand for an `Internal` error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// The HTTP status an embedding layer should answer with.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::BusinessRule(_) => 422,
            Self::Persistence(_) | Self::ExternalService(_) | Self::Internal(_) => 500,
        }
    }

    /// Machine-readable code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
            Self::Conflict(_) => "CONFLICT",
            Self::Persistence(_) => "PERSISTENCE_ERROR",
            Self::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether retrying the same request can succeed without a change
    /// from the caller.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Persistence(_) | Self::ExternalService(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample(code: &str) -> AppError {
        let msg = "detail".to_string();
        match code {
            "forbidden" => AppError::Forbidden(msg),
            "not_found" => AppError::NotFound(msg),
            "validation" => AppError::Validation(msg),
            "rule" => AppError::BusinessRule(msg),
            "conflict" => AppError::Conflict(msg),
            "persistence" => AppError::Persistence(msg),
            "external" => AppError::ExternalService(msg),
            _ => AppError::Internal(msg),
        }
    }

    #[rstest]
    #[case("forbidden", 403, "FORBIDDEN", false)]
    #[case("not_found", 404, "NOT_FOUND", false)]
    #[case("validation", 400, "VALIDATION_ERROR", false)]
    #[case("rule", 422, "BUSINESS_RULE_VIOLATION", false)]
    #[case("conflict", 409, "CONFLICT", false)]
    #[case("persistence", 500, "PERSISTENCE_ERROR", true)]
    #[case("external", 500, "EXTERNAL_SERVICE_ERROR", true)]
    #[case("internal", 500, "INTERNAL_ERROR", false)]
    fn test_error_mapping(
        #[case] kind: &str,
        #[case] status: u16,
        #[case] code: &str,
        #[case] retryable: bool,
    ) {
        let err = sample(kind);
        assert_eq!(err.status_code(), status);
        assert_eq!(err.error_code(), code);
        assert_eq!(err.is_retryable(), retryable);
    }

    #[test]
    fn test_display_includes_detail() {
        let err = AppError::persistence("connection reset");
        assert_eq!(err.to_string(), "persistence failure: connection reset");
        assert!(AppError::internal("boom").to_string().contains("boom"));
    }
}
