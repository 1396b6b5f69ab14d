//! Period domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregate::{EmployeeResult, PeriodTotals};
use crate::entry::PayrollEntry;
use crate::lifecycle::{PeriodStatus, TransitionAction};
use paycycle_shared::types::{AuditStamp, PeriodId, TenantId, UserId};

/// One month/year payroll processing batch for a tenant.
///
/// At most one non-retired period exists per (tenant, month, year).
/// Totals are present only from the Calculated state onward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPeriod {
    /// Unique identifier.
    pub id: PeriodId,
    /// The tenant this period belongs to.
    pub tenant_id: TenantId,
    /// Reference month (1-12).
    pub month: u32,
    /// Reference year.
    pub year: i32,
    /// Current lifecycle status.
    pub status: PeriodStatus,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Who created the period and when.
    pub created: AuditStamp,
    /// Who last mutated the period and when.
    pub updated: AuditStamp,
    /// Who locked the period and when, while locked or beyond.
    pub locked: Option<AuditStamp>,
    /// When totals were last computed.
    pub calculated_at: Option<DateTime<Utc>>,
    /// Who approved the period and when.
    pub approved: Option<AuditStamp>,
    /// Who paid the period and when.
    pub paid: Option<AuditStamp>,
    /// Who retired the period and when; a retired period is logically
    /// deleted and frees its (tenant, month, year) slot.
    pub retired: Option<AuditStamp>,
    /// Aggregate totals, present from Calculated onward.
    pub totals: Option<PeriodTotals>,
}

impl PayrollPeriod {
    /// Creates a new draft period.
    #[must_use]
    pub fn new(tenant_id: TenantId, month: u32, year: i32, actor: UserId) -> Self {
        let stamp = AuditStamp::now(actor);
        Self {
            id: PeriodId::new(),
            tenant_id,
            month,
            year,
            status: PeriodStatus::Draft,
            notes: None,
            created: stamp,
            updated: stamp,
            locked: None,
            calculated_at: None,
            approved: None,
            paid: None,
            retired: None,
            totals: None,
        }
    }

    /// Returns true if the period has been retired (logically deleted).
    #[must_use]
    pub fn is_retired(&self) -> bool {
        self.retired.is_some()
    }

    /// Applies a planned transition's status change and bookkeeping.
    ///
    /// Totals for a `Calculate` action are stored separately by the
    /// service once the aggregator has produced them.
    pub fn apply(&mut self, action: &TransitionAction) {
        self.status = action.new_status();
        match action {
            TransitionAction::Lock { stamp, .. } => {
                self.locked = Some(*stamp);
            }
            TransitionAction::Unlock { .. } => {
                self.locked = None;
                self.calculated_at = None;
            }
            TransitionAction::Calculate { calculated_at, .. } => {
                self.calculated_at = Some(*calculated_at);
            }
            TransitionAction::Reopen { .. } => {
                self.totals = None;
            }
            TransitionAction::Approve { stamp, .. } => {
                self.approved = Some(*stamp);
            }
            TransitionAction::Correct { .. } => {
                self.approved = None;
            }
            TransitionAction::Pay { stamp, .. } => {
                self.paid = Some(*stamp);
            }
        }
    }
}

/// The materialized period aggregate handed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSnapshot {
    /// The period record.
    pub period: PayrollPeriod,
    /// The period's entries.
    pub entries: Vec<PayrollEntry>,
    /// Per-employee results from the last calculation.
    pub results: Vec<EmployeeResult>,
}

impl PeriodSnapshot {
    /// Wraps a period with no entries or results.
    #[must_use]
    pub fn empty(period: PayrollPeriod) -> Self {
        Self {
            period,
            entries: Vec::new(),
            results: Vec::new(),
        }
    }
}

/// Listing row for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// Unique identifier.
    pub id: PeriodId,
    /// Reference month (1-12).
    pub month: u32,
    /// Reference year.
    pub year: i32,
    /// Current lifecycle status.
    pub status: PeriodStatus,
    /// Total gross, when calculated.
    pub gross: Option<Decimal>,
    /// When the period was last mutated.
    pub updated_at: DateTime<Utc>,
}

impl From<&PayrollPeriod> for PeriodSummary {
    fn from(period: &PayrollPeriod) -> Self {
        Self {
            id: period.id,
            month: period.month,
            year: period.year,
            status: period.status,
            gross: period.totals.map(|t| t.gross),
            updated_at: period.updated.at,
        }
    }
}

/// Record of a lifecycle transition, persisted with the transition commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// The tenant the period belongs to.
    pub tenant_id: TenantId,
    /// The period the transition was performed on.
    pub period_id: PeriodId,
    /// The transition kind ("lock", "approve", ...).
    pub transition: String,
    /// Who performed the transition.
    pub actor: UserId,
    /// When the transition was performed.
    pub at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::LifecycleMachine;

    fn draft_period() -> PayrollPeriod {
        PayrollPeriod::new(TenantId::new(), 3, 2025, UserId::new())
    }

    #[test]
    fn test_new_period_is_draft() {
        let period = draft_period();
        assert_eq!(period.status, PeriodStatus::Draft);
        assert!(period.totals.is_none());
        assert!(!period.is_retired());
    }

    #[test]
    fn test_apply_lock_stamps_actor() {
        let mut period = draft_period();
        let actor = UserId::new();
        let action = LifecycleMachine::lock(period.status, 1, actor).unwrap();
        period.apply(&action);

        assert_eq!(period.status, PeriodStatus::Locked);
        assert_eq!(period.locked.unwrap().actor, actor);
    }

    #[test]
    fn test_apply_unlock_clears_calculation_timestamp() {
        let mut period = draft_period();
        let actor = UserId::new();
        period.apply(&LifecycleMachine::lock(period.status, 1, actor).unwrap());
        period.apply(&LifecycleMachine::calculate(period.status).unwrap());
        assert!(period.calculated_at.is_some());

        period.apply(&LifecycleMachine::reopen(period.status).unwrap());
        period.apply(&LifecycleMachine::unlock(period.status, actor).unwrap());

        assert_eq!(period.status, PeriodStatus::Draft);
        assert!(period.calculated_at.is_none());
        assert!(period.locked.is_none());
    }

    #[test]
    fn test_apply_reopen_clears_totals() {
        let mut period = draft_period();
        let actor = UserId::new();
        period.apply(&LifecycleMachine::lock(period.status, 1, actor).unwrap());
        period.apply(&LifecycleMachine::calculate(period.status).unwrap());
        period.totals = Some(PeriodTotals::ZERO);

        period.apply(&LifecycleMachine::reopen(period.status).unwrap());
        assert!(period.totals.is_none());
        assert_eq!(period.status, PeriodStatus::Locked);
    }

    #[test]
    fn test_apply_correct_retains_totals_drops_approval() {
        let mut period = draft_period();
        let actor = UserId::new();
        period.apply(&LifecycleMachine::lock(period.status, 1, actor).unwrap());
        period.apply(&LifecycleMachine::calculate(period.status).unwrap());
        period.totals = Some(PeriodTotals::ZERO);
        period.apply(&LifecycleMachine::approve(period.status, actor).unwrap());
        assert!(period.approved.is_some());

        period.apply(&LifecycleMachine::correct(period.status).unwrap());
        assert_eq!(period.status, PeriodStatus::Calculated);
        assert!(period.approved.is_none());
        assert!(period.totals.is_some());
    }

    #[test]
    fn test_summary_from_period() {
        let period = draft_period();
        let summary = PeriodSummary::from(&period);
        assert_eq!(summary.id, period.id);
        assert_eq!(summary.month, 3);
        assert_eq!(summary.year, 2025);
        assert_eq!(summary.gross, None);
    }
}
