//! Aggregation error types.

use rust_decimal::Decimal;
use thiserror::Error;

use paycycle_shared::types::EmployeeId;

/// Errors that can occur during totals aggregation.
///
/// Aggregation is all-or-nothing: any error means no totals were produced.
#[derive(Debug, Error)]
pub enum AggregationError {
    /// An employee with an entry has no base-amount input.
    #[error("No base amounts supplied for employee {0}")]
    MissingBaseAmount(EmployeeId),

    /// A rate card value is negative.
    #[error("Rate {field} must not be negative, got {value}")]
    InvalidRate {
        /// The offending rate name.
        field: &'static str,
        /// The rejected value.
        value: Decimal,
    },
}

impl AggregationError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::MissingBaseAmount(_) | Self::InvalidRate { .. } => 422,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingBaseAmount(_) => "MISSING_BASE_AMOUNT",
            Self::InvalidRate { .. } => "INVALID_RATE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_missing_base_amount_error() {
        let id = EmployeeId::new();
        let err = AggregationError::MissingBaseAmount(id);
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.error_code(), "MISSING_BASE_AMOUNT");
        assert!(err.to_string().contains(&id.to_string()));
    }

    #[test]
    fn test_invalid_rate_error() {
        let err = AggregationError::InvalidRate {
            field: "employer_burden",
            value: dec!(-0.2),
        };
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.error_code(), "INVALID_RATE");
    }
}
