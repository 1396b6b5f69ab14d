//! Entry store: CRUD over a period's entry collection.

use paycycle_shared::types::{AuditStamp, EmployeeId, EntryId, PeriodId, UserId};

use crate::entry::error::EntryError;
use crate::entry::types::{EmployeeProfile, EntryFields, PayrollEntry};
use crate::lifecycle::PeriodStatus;

/// Outcome of an upsert.
#[derive(Debug, Clone)]
pub struct UpsertOutcome {
    /// The stored entry after the operation.
    pub entry: PayrollEntry,
    /// False when identical input left the stored row untouched; the
    /// caller can skip the persistence write in that case.
    pub changed: bool,
}

/// Stateless CRUD logic for adjustment rows scoped to one period.
///
/// The service facade owns locking and persistence; these functions
/// operate on an in-memory snapshot of the period's entry collection and
/// enforce the one-row-per-employee invariant and the editability gate.
pub struct EntryStore;

impl EntryStore {
    /// Create or overwrite the entry for an employee.
    ///
    /// Idempotent: identical field values return the stored row unchanged.
    ///
    /// # Errors
    ///
    /// * `EntryError::PeriodNotEditable` if the status forbids mutation
    /// * `EntryError::InvalidAdjustment` for negative adjustment values
    pub fn upsert(
        status: PeriodStatus,
        entries: &mut Vec<PayrollEntry>,
        period_id: PeriodId,
        employee: &EmployeeProfile,
        fields: EntryFields,
        actor: UserId,
    ) -> Result<UpsertOutcome, EntryError> {
        if !status.is_editable() {
            return Err(EntryError::PeriodNotEditable(status));
        }
        fields.validate()?;

        if let Some(existing) = entries.iter_mut().find(|e| e.employee_id == employee.id) {
            if existing.matches(&fields) && existing.employee_name == employee.display_name {
                return Ok(UpsertOutcome {
                    entry: existing.clone(),
                    changed: false,
                });
            }
            existing.apply(fields);
            existing.employee_name = employee.display_name.clone();
            existing.updated = AuditStamp::now(actor);
            return Ok(UpsertOutcome {
                entry: existing.clone(),
                changed: true,
            });
        }

        let stamp = AuditStamp::now(actor);
        let mut entry = PayrollEntry {
            id: EntryId::new(),
            period_id,
            employee_id: employee.id,
            employee_name: employee.display_name.clone(),
            absence_days: None,
            credited_absence_days: None,
            overtime_hours: None,
            tardiness_hours: None,
            note: None,
            created: stamp,
            updated: stamp,
        };
        entry.apply(fields);
        entries.push(entry.clone());
        Ok(UpsertOutcome {
            entry,
            changed: true,
        })
    }

    /// Remove the entry for an employee.
    ///
    /// # Errors
    ///
    /// * `EntryError::PeriodNotEditable` if the status forbids mutation
    /// * `EntryError::EntryNotFound` if no row exists for the employee
    pub fn remove(
        status: PeriodStatus,
        entries: &mut Vec<PayrollEntry>,
        employee_id: EmployeeId,
    ) -> Result<PayrollEntry, EntryError> {
        if !status.is_editable() {
            return Err(EntryError::PeriodNotEditable(status));
        }
        let index = entries
            .iter()
            .position(|e| e.employee_id == employee_id)
            .ok_or(EntryError::EntryNotFound(employee_id))?;
        Ok(entries.remove(index))
    }

    /// Entries ordered by employee display name for deterministic rendering.
    ///
    /// Ties on the name fall back to the employee identifier.
    #[must_use]
    pub fn ordered(entries: &[PayrollEntry]) -> Vec<PayrollEntry> {
        let mut sorted = entries.to_vec();
        sorted.sort_by(|a, b| {
            a.employee_name
                .cmp(&b.employee_name)
                .then_with(|| a.employee_id.cmp(&b.employee_id))
        });
        sorted
    }
}
