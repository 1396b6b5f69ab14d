//! Entry domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entry::error::EntryError;
use paycycle_shared::types::{AuditStamp, EmployeeId, EntryId, PeriodId};

/// An employee as resolved by the external identity collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// The employee's identifier in the external identity store.
    pub id: EmployeeId,
    /// Display name used for deterministic entry ordering.
    pub display_name: String,
}

/// The mutable adjustment fields of an entry.
///
/// All adjustments are optional; an absent value means "no adjustment".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFields {
    /// Unexcused absence days, deducted from gross.
    pub absence_days: Option<Decimal>,
    /// Excused absence days, restoring the deduction.
    pub credited_absence_days: Option<Decimal>,
    /// Overtime hours, credited to gross.
    pub overtime_hours: Option<Decimal>,
    /// Tardiness hours, deducted from gross.
    pub tardiness_hours: Option<Decimal>,
    /// Free-text note.
    pub note: Option<String>,
}

impl EntryFields {
    /// Validates that every present adjustment is non-negative.
    ///
    /// # Errors
    ///
    /// Returns `EntryError::InvalidAdjustment` naming the offending field.
    pub fn validate(&self) -> Result<(), EntryError> {
        let checks = [
            ("absence_days", self.absence_days),
            ("credited_absence_days", self.credited_absence_days),
            ("overtime_hours", self.overtime_hours),
            ("tardiness_hours", self.tardiness_hours),
        ];
        for (field, value) in checks {
            if let Some(value) = value
                && value < Decimal::ZERO
            {
                return Err(EntryError::InvalidAdjustment { field, value });
            }
        }
        Ok(())
    }
}

/// One employee's manual adjustments within a period.
///
/// Unique per (period, employee).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollEntry {
    /// Unique identifier.
    pub id: EntryId,
    /// The owning period.
    pub period_id: PeriodId,
    /// The employee this entry adjusts.
    pub employee_id: EmployeeId,
    /// Display name captured from the identity collaborator at upsert.
    pub employee_name: String,
    /// Unexcused absence days.
    pub absence_days: Option<Decimal>,
    /// Excused absence days.
    pub credited_absence_days: Option<Decimal>,
    /// Overtime hours.
    pub overtime_hours: Option<Decimal>,
    /// Tardiness hours.
    pub tardiness_hours: Option<Decimal>,
    /// Free-text note.
    pub note: Option<String>,
    /// Who created the entry and when.
    pub created: AuditStamp,
    /// Who last updated the entry and when.
    pub updated: AuditStamp,
}

impl PayrollEntry {
    /// Returns true if the stored adjustments equal the given fields.
    #[must_use]
    pub fn matches(&self, fields: &EntryFields) -> bool {
        self.absence_days == fields.absence_days
            && self.credited_absence_days == fields.credited_absence_days
            && self.overtime_hours == fields.overtime_hours
            && self.tardiness_hours == fields.tardiness_hours
            && self.note == fields.note
    }

    /// Overwrites the adjustments with the given fields.
    pub fn apply(&mut self, fields: EntryFields) {
        self.absence_days = fields.absence_days;
        self.credited_absence_days = fields.credited_absence_days;
        self.overtime_hours = fields.overtime_hours;
        self.tardiness_hours = fields.tardiness_hours;
        self.note = fields.note;
    }
}
