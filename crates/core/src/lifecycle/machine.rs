//! State transition logic for payroll periods.

use chrono::Utc;
use paycycle_shared::types::{AuditStamp, UserId};

use crate::lifecycle::error::LifecycleError;
use crate::lifecycle::types::{Capability, PeriodStatus, TransitionAction};

/// Stateless machine for payroll period lifecycle transitions.
///
/// All methods are associated functions that validate and plan state
/// transitions, returning the appropriate `TransitionAction` with audit
/// trail information. Privilege checks are delegated to the external
/// authorization collaborator by the caller; this machine only enforces the
/// transition graph, preconditions, and timestamp bookkeeping.
pub struct LifecycleMachine;

impl LifecycleMachine {
    /// Lock a draft period, freezing its entries.
    ///
    /// # Errors
    ///
    /// * `LifecycleError::InvalidTransition` if not in Draft status
    /// * `LifecycleError::NoEntries` if the period has no entries
    pub fn lock(
        current: PeriodStatus,
        entry_count: usize,
        actor: UserId,
    ) -> Result<TransitionAction, LifecycleError> {
        match current {
            PeriodStatus::Draft if entry_count == 0 => Err(LifecycleError::NoEntries),
            PeriodStatus::Draft => Ok(TransitionAction::Lock {
                new_status: PeriodStatus::Locked,
                stamp: AuditStamp::new(actor, Utc::now()),
            }),
            _ => Err(LifecycleError::InvalidTransition {
                from: current,
                to: PeriodStatus::Locked,
            }),
        }
    }

    /// Unlock a locked period back to draft.
    ///
    /// Clears the calculation timestamp if one is present.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::InvalidTransition` if not in Locked status.
    pub fn unlock(
        current: PeriodStatus,
        actor: UserId,
    ) -> Result<TransitionAction, LifecycleError> {
        match current {
            PeriodStatus::Locked => Ok(TransitionAction::Unlock {
                new_status: PeriodStatus::Draft,
                stamp: AuditStamp::new(actor, Utc::now()),
            }),
            _ => Err(LifecycleError::InvalidTransition {
                from: current,
                to: PeriodStatus::Draft,
            }),
        }
    }

    /// Move a locked period to calculated.
    ///
    /// The caller runs the aggregator and stores its totals alongside the
    /// calculation timestamp carried by the returned action.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::InvalidTransition` if not in Locked status.
    pub fn calculate(current: PeriodStatus) -> Result<TransitionAction, LifecycleError> {
        match current {
            PeriodStatus::Locked => Ok(TransitionAction::Calculate {
                new_status: PeriodStatus::Calculated,
                calculated_at: Utc::now(),
            }),
            _ => Err(LifecycleError::InvalidTransition {
                from: current,
                to: PeriodStatus::Calculated,
            }),
        }
    }

    /// Return a calculated period to locked, discarding its totals.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::InvalidTransition` if not in Calculated status.
    pub fn reopen(current: PeriodStatus) -> Result<TransitionAction, LifecycleError> {
        match current {
            PeriodStatus::Calculated => Ok(TransitionAction::Reopen {
                new_status: PeriodStatus::Locked,
            }),
            _ => Err(LifecycleError::InvalidTransition {
                from: current,
                to: PeriodStatus::Locked,
            }),
        }
    }

    /// Approve calculated totals for payment.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::InvalidTransition` if not in Calculated status.
    pub fn approve(
        current: PeriodStatus,
        actor: UserId,
    ) -> Result<TransitionAction, LifecycleError> {
        match current {
            PeriodStatus::Calculated => Ok(TransitionAction::Approve {
                new_status: PeriodStatus::Approved,
                stamp: AuditStamp::new(actor, Utc::now()),
            }),
            _ => Err(LifecycleError::InvalidTransition {
                from: current,
                to: PeriodStatus::Approved,
            }),
        }
    }

    /// Return an approved period to calculated for correction.
    ///
    /// Totals are retained until the next recomputation.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::InvalidTransition` if not in Approved status.
    pub fn correct(current: PeriodStatus) -> Result<TransitionAction, LifecycleError> {
        match current {
            PeriodStatus::Approved => Ok(TransitionAction::Correct {
                new_status: PeriodStatus::Calculated,
            }),
            _ => Err(LifecycleError::InvalidTransition {
                from: current,
                to: PeriodStatus::Calculated,
            }),
        }
    }

    /// Mark an approved period as paid.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::InvalidTransition` if not in Approved status.
    pub fn pay(current: PeriodStatus, actor: UserId) -> Result<TransitionAction, LifecycleError> {
        match current {
            PeriodStatus::Approved => Ok(TransitionAction::Pay {
                new_status: PeriodStatus::Paid,
                stamp: AuditStamp::new(actor, Utc::now()),
            }),
            _ => Err(LifecycleError::InvalidTransition {
                from: current,
                to: PeriodStatus::Paid,
            }),
        }
    }

    /// Plan the transition that takes `current` to `target`.
    ///
    /// This is the entry point used by the service facade's `transition`
    /// operation: the (current, target) pair selects which transition to
    /// perform.
    ///
    /// # Errors
    ///
    /// * `LifecycleError::InvalidTransition` for any pair outside the graph
    /// * `LifecycleError::NoEntries` when locking an empty period
    pub fn plan(
        current: PeriodStatus,
        target: PeriodStatus,
        entry_count: usize,
        actor: UserId,
    ) -> Result<TransitionAction, LifecycleError> {
        match (current, target) {
            (PeriodStatus::Draft, PeriodStatus::Locked) => Self::lock(current, entry_count, actor),
            (PeriodStatus::Locked, PeriodStatus::Draft) => Self::unlock(current, actor),
            (PeriodStatus::Locked, PeriodStatus::Calculated) => Self::calculate(current),
            (PeriodStatus::Calculated, PeriodStatus::Locked) => Self::reopen(current),
            (PeriodStatus::Calculated, PeriodStatus::Approved) => Self::approve(current, actor),
            (PeriodStatus::Approved, PeriodStatus::Calculated) => Self::correct(current),
            (PeriodStatus::Approved, PeriodStatus::Paid) => Self::pay(current, actor),
            _ => Err(LifecycleError::InvalidTransition {
                from: current,
                to: target,
            }),
        }
    }

    /// Check if a status transition is valid.
    ///
    /// Valid transitions:
    /// - Draft → Locked (lock)
    /// - Locked → Draft (unlock)
    /// - Locked → Calculated (calculate)
    /// - Calculated → Locked (reopen)
    /// - Calculated → Approved (approve)
    /// - Approved → Calculated (correct)
    /// - Approved → Paid (pay)
    #[must_use]
    pub fn is_valid_transition(from: PeriodStatus, to: PeriodStatus) -> bool {
        matches!(
            (from, to),
            (PeriodStatus::Draft, PeriodStatus::Locked)
                | (
                    PeriodStatus::Locked,
                    PeriodStatus::Draft | PeriodStatus::Calculated
                )
                | (
                    PeriodStatus::Calculated,
                    PeriodStatus::Locked | PeriodStatus::Approved
                )
                | (
                    PeriodStatus::Approved,
                    PeriodStatus::Calculated | PeriodStatus::Paid
                )
        )
    }

    /// Returns the capability required to perform a transition, if any.
    ///
    /// Calculation, reopening, and correction are governed by the
    /// transition graph alone and require no dedicated privilege.
    #[must_use]
    pub fn required_capability(from: PeriodStatus, to: PeriodStatus) -> Option<Capability> {
        match (from, to) {
            (PeriodStatus::Draft, PeriodStatus::Locked) => Some(Capability::Lock),
            (PeriodStatus::Locked, PeriodStatus::Draft) => Some(Capability::Unlock),
            (PeriodStatus::Calculated, PeriodStatus::Approved) => Some(Capability::Approve),
            (PeriodStatus::Approved, PeriodStatus::Paid) => Some(Capability::Pay),
            _ => None,
        }
    }
}
