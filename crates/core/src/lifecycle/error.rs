//! Lifecycle error types for payroll period management.

use thiserror::Error;

use crate::lifecycle::types::PeriodStatus;

/// Errors that can occur during lifecycle transitions.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: PeriodStatus,
        /// The attempted target status.
        to: PeriodStatus,
    },

    /// Attempted to lock a period with no entries.
    #[error("Cannot lock a period with no entries")]
    NoEntries,
}

impl LifecycleError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. } | Self::NoEntries => 400,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::NoEntries => "NO_ENTRIES",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_error() {
        let err = LifecycleError::InvalidTransition {
            from: PeriodStatus::Draft,
            to: PeriodStatus::Paid,
        };
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "INVALID_TRANSITION");
        assert!(err.to_string().contains("draft"));
        assert!(err.to_string().contains("paid"));
    }

    #[test]
    fn test_no_entries_error() {
        let err = LifecycleError::NoEntries;
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "NO_ENTRIES");
    }
}
