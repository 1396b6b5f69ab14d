//! Lifecycle domain types for payroll period management.

use chrono::{DateTime, Utc};
use paycycle_shared::types::AuditStamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Payroll period status in the processing lifecycle.
///
/// Periods progress through these states from creation to payment.
/// The valid transitions are:
/// - Draft → Locked (lock, requires at least one entry)
/// - Locked → Draft (unlock)
/// - Locked → Calculated (calculate)
/// - Calculated → Locked (reopen for recalculation)
/// - Calculated → Approved (approve)
/// - Approved → Calculated (correction before payment)
/// - Approved → Paid (pay)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodStatus {
    /// Period is being drafted; entries can be modified.
    Draft,
    /// Entries are frozen pending calculation.
    Locked,
    /// Totals have been computed and stored.
    Calculated,
    /// Totals have been approved for payment.
    Approved,
    /// Period has been paid (terminal, immutable).
    Paid,
}

impl PeriodStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Locked => "locked",
            Self::Calculated => "calculated",
            Self::Approved => "approved",
            Self::Paid => "paid",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "locked" => Some(Self::Locked),
            "calculated" => Some(Self::Calculated),
            "approved" => Some(Self::Approved),
            "paid" => Some(Self::Paid),
            _ => None,
        }
    }

    /// Returns true if entries can be created, updated, or removed.
    ///
    /// Entry mutation is permitted only while drafting.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if no further transitions are possible.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Paid)
    }
}

impl fmt::Display for PeriodStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Privilege required for a transition, checked against the external
/// authorization collaborator by the service facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// May lock a draft period.
    Lock,
    /// May unlock a locked period back to draft.
    Unlock,
    /// May approve calculated totals.
    Approve,
    /// May mark an approved period as paid.
    Pay,
}

impl Capability {
    /// Returns the string representation of the capability.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lock => "lock",
            Self::Unlock => "unlock",
            Self::Approve => "approve",
            Self::Pay => "pay",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle transition with audit data.
///
/// Each variant captures the transition performed, the resulting status,
/// and the bookkeeping to apply to the period record.
#[derive(Debug, Clone)]
pub enum TransitionAction {
    /// Freeze a draft period's entries.
    Lock {
        /// The new status after locking.
        new_status: PeriodStatus,
        /// Who locked the period and when.
        stamp: AuditStamp,
    },
    /// Reopen a locked period for entry edits.
    Unlock {
        /// The new status after unlocking.
        new_status: PeriodStatus,
        /// Who unlocked the period and when.
        stamp: AuditStamp,
    },
    /// Store freshly computed totals.
    Calculate {
        /// The new status after calculation.
        new_status: PeriodStatus,
        /// When the totals were computed.
        calculated_at: DateTime<Utc>,
    },
    /// Discard totals and return to the locked state for recalculation.
    Reopen {
        /// The new status after reopening.
        new_status: PeriodStatus,
    },
    /// Approve calculated totals for payment.
    Approve {
        /// The new status after approval.
        new_status: PeriodStatus,
        /// Who approved the period and when.
        stamp: AuditStamp,
    },
    /// Return an approved period to calculated for correction.
    Correct {
        /// The new status after the correction request.
        new_status: PeriodStatus,
    },
    /// Mark an approved period as paid.
    Pay {
        /// The new status after payment.
        new_status: PeriodStatus,
        /// Who paid the period and when.
        stamp: AuditStamp,
    },
}

impl TransitionAction {
    /// Returns the new status resulting from this transition.
    #[must_use]
    pub fn new_status(&self) -> PeriodStatus {
        match self {
            Self::Lock { new_status, .. }
            | Self::Unlock { new_status, .. }
            | Self::Calculate { new_status, .. }
            | Self::Reopen { new_status }
            | Self::Approve { new_status, .. }
            | Self::Correct { new_status }
            | Self::Pay { new_status, .. } => *new_status,
        }
    }

    /// Returns the transition kind for audit records.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Lock { .. } => "lock",
            Self::Unlock { .. } => "unlock",
            Self::Calculate { .. } => "calculate",
            Self::Reopen { .. } => "reopen",
            Self::Approve { .. } => "approve",
            Self::Correct { .. } => "correct",
            Self::Pay { .. } => "pay",
        }
    }
}
