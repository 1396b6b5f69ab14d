//! The facade error set.
//!
//! Every failure surfaced to external callers is one of these kinds.
//! Component errors (entry, lifecycle, aggregation) propagate unchanged
//! through the `#[from]` wrappers.

use thiserror::Error;

use crate::aggregate::AggregationError;
use crate::entry::EntryError;
use crate::lifecycle::{Capability, LifecycleError, PeriodStatus};
use paycycle_shared::error::AppError;
use paycycle_shared::types::{PeriodId, UserId};

/// Errors surfaced by the period service facade.
#[derive(Debug, Error)]
pub enum PeriodError {
    /// A non-retired period already exists for (tenant, month, year).
    #[error("A period for {month}/{year} already exists")]
    DuplicatePeriod {
        /// The requested reference month.
        month: u32,
        /// The requested reference year.
        year: i32,
    },

    /// No period exists with the given identifier.
    #[error("Period {0} not found")]
    PeriodNotFound(PeriodId),

    /// The reference month is outside 1-12.
    #[error("Invalid reference month: {0}")]
    InvalidMonth(u32),

    /// The actor lacks the capability required for the transition.
    #[error("Actor {actor} is not allowed to {capability} this period")]
    PermissionDenied {
        /// The actor that was refused.
        actor: UserId,
        /// The capability that was required.
        capability: Capability,
    },

    /// Only draft periods can be retired.
    #[error("Only draft periods can be retired, period is {0}")]
    NotRetirable(PeriodStatus),

    /// Entry store failure.
    #[error(transparent)]
    Entry(#[from] EntryError),

    /// Lifecycle transition failure.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    /// Aggregation failure; totals are never partially applied.
    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    /// Persistence collaborator failure, surfaced unchanged.
    #[error("Repository error: {0}")]
    Repository(String),
}

impl PeriodError {
    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::DuplicatePeriod { .. } | Self::NotRetirable(_) => 409,
            Self::PeriodNotFound(_) => 404,
            Self::InvalidMonth(_) => 400,
            Self::PermissionDenied { .. } => 403,
            Self::Entry(inner) => inner.status_code(),
            Self::Lifecycle(inner) => inner.status_code(),
            Self::Aggregation(inner) => inner.status_code(),
            Self::Repository(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicatePeriod { .. } => "DUPLICATE_PERIOD",
            Self::PeriodNotFound(_) => "PERIOD_NOT_FOUND",
            Self::InvalidMonth(_) => "INVALID_MONTH",
            Self::PermissionDenied { .. } => "PERMISSION_DENIED",
            Self::NotRetirable(_) => "NOT_RETIRABLE",
            Self::Entry(inner) => inner.error_code(),
            Self::Lifecycle(inner) => inner.error_code(),
            Self::Aggregation(inner) => inner.error_code(),
            Self::Repository(_) => "REPOSITORY_ERROR",
        }
    }
}

impl From<PeriodError> for AppError {
    fn from(err: PeriodError) -> Self {
        let message = err.to_string();
        match err {
            PeriodError::DuplicatePeriod { .. } => Self::Conflict(message),
            PeriodError::PeriodNotFound(_) => Self::NotFound(message),
            PeriodError::InvalidMonth(_) => Self::Validation(message),
            PeriodError::PermissionDenied { .. } => Self::Forbidden(message),
            PeriodError::NotRetirable(_)
            | PeriodError::Lifecycle(_)
            | PeriodError::Aggregation(_) => Self::BusinessRule(message),
            PeriodError::Entry(EntryError::EmployeeNotFound(_) | EntryError::EntryNotFound(_)) => {
                Self::NotFound(message)
            }
            PeriodError::Entry(EntryError::PeriodNotEditable(_)) => Self::BusinessRule(message),
            PeriodError::Entry(EntryError::InvalidAdjustment { .. }) => Self::Validation(message),
            PeriodError::Repository(_) => Self::Persistence(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paycycle_shared::types::EmployeeId;

    #[test]
    fn test_duplicate_period_error() {
        let err = PeriodError::DuplicatePeriod {
            month: 3,
            year: 2025,
        };
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "DUPLICATE_PERIOD");
        assert!(err.to_string().contains("3/2025"));
    }

    #[test]
    fn test_period_not_found_error() {
        let err = PeriodError::PeriodNotFound(PeriodId::new());
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "PERIOD_NOT_FOUND");
    }

    #[test]
    fn test_permission_denied_error() {
        let err = PeriodError::PermissionDenied {
            actor: UserId::new(),
            capability: Capability::Approve,
        };
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "PERMISSION_DENIED");
        assert!(err.to_string().contains("approve"));
    }

    #[test]
    fn test_nested_errors_keep_their_codes() {
        let entry: PeriodError = EntryError::EmployeeNotFound(EmployeeId::new()).into();
        assert_eq!(entry.error_code(), "EMPLOYEE_NOT_FOUND");
        assert_eq!(entry.status_code(), 404);

        let lifecycle: PeriodError = LifecycleError::InvalidTransition {
            from: PeriodStatus::Draft,
            to: PeriodStatus::Paid,
        }
        .into();
        assert_eq!(lifecycle.error_code(), "INVALID_TRANSITION");

        let aggregation: PeriodError =
            AggregationError::MissingBaseAmount(EmployeeId::new()).into();
        assert_eq!(aggregation.error_code(), "MISSING_BASE_AMOUNT");
        assert_eq!(aggregation.status_code(), 422);
    }

    #[test]
    fn test_app_error_mapping() {
        let err: AppError = PeriodError::DuplicatePeriod {
            month: 1,
            year: 2026,
        }
        .into();
        assert!(matches!(err, AppError::Conflict(_)));

        let err: AppError = PeriodError::PeriodNotFound(PeriodId::new()).into();
        assert!(matches!(err, AppError::NotFound(_)));

        let err: AppError = PeriodError::repository("connection reset").into();
        assert!(matches!(err, AppError::Persistence(_)));
    }
}
