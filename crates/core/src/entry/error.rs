//! Entry store error types.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::lifecycle::PeriodStatus;
use paycycle_shared::types::EmployeeId;

/// Errors that can occur during entry operations.
#[derive(Debug, Error)]
pub enum EntryError {
    /// The period's status forbids entry mutation.
    #[error("Period is not editable in status {0}")]
    PeriodNotEditable(PeriodStatus),

    /// The employee reference could not be resolved.
    #[error("Employee {0} not found")]
    EmployeeNotFound(EmployeeId),

    /// No entry exists for the employee in this period.
    #[error("No entry for employee {0} in this period")]
    EntryNotFound(EmployeeId),

    /// An adjustment value is negative.
    #[error("Adjustment {field} must not be negative, got {value}")]
    InvalidAdjustment {
        /// The offending field name.
        field: &'static str,
        /// The rejected value.
        value: Decimal,
    },
}

impl EntryError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::PeriodNotEditable(_) => 409,
            Self::EmployeeNotFound(_) | Self::EntryNotFound(_) => 404,
            Self::InvalidAdjustment { .. } => 400,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::PeriodNotEditable(_) => "PERIOD_NOT_EDITABLE",
            Self::EmployeeNotFound(_) => "EMPLOYEE_NOT_FOUND",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::InvalidAdjustment { .. } => "INVALID_ADJUSTMENT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_not_editable_error() {
        let err = EntryError::PeriodNotEditable(PeriodStatus::Locked);
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "PERIOD_NOT_EDITABLE");
        assert!(err.to_string().contains("locked"));
    }

    #[test]
    fn test_employee_not_found_error() {
        let err = EntryError::EmployeeNotFound(EmployeeId::new());
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "EMPLOYEE_NOT_FOUND");
    }

    #[test]
    fn test_entry_not_found_error() {
        let err = EntryError::EntryNotFound(EmployeeId::new());
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "ENTRY_NOT_FOUND");
    }

    #[test]
    fn test_invalid_adjustment_error() {
        let err = EntryError::InvalidAdjustment {
            field: "overtime_hours",
            value: dec!(-1),
        };
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "INVALID_ADJUSTMENT");
        assert!(err.to_string().contains("overtime_hours"));
    }
}
