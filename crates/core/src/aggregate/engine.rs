//! Totals computation for a payroll period.
//!
//! CRITICAL: Rounding strategy for period totals:
//! - Accumulate per-employee values unrounded
//! - Round only the final totals, to two decimal places
//! - Use banker's rounding (round half to even)

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::aggregate::error::AggregationError;
use crate::aggregate::types::{EmployeeBaseAmounts, EmployeeResult, PeriodTotals, RateCard};
use crate::entry::PayrollEntry;
use paycycle_shared::types::EmployeeId;

/// Rounds a final total to two decimal places with banker's rounding.
fn round_total(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

/// Stateless aggregator producing period totals from entries.
///
/// `aggregate` is a pure function: identical inputs produce bit-identical
/// outputs, which makes recalculation idempotent.
pub struct PeriodAggregator;

impl PeriodAggregator {
    /// Compute period totals and per-employee results.
    ///
    /// For each employee with an entry, the externally supplied base gross
    /// is adjusted by overtime (additive), credited absences (additive, at
    /// the absence rate) and absence/tardiness deductions (subtractive),
    /// clamped at zero. Per-employee values stay unrounded; the five
    /// period totals are rounded at the end, with net and employer cost
    /// derived from the rounded components.
    ///
    /// # Errors
    ///
    /// * `AggregationError::InvalidRate` for a negative rate card value
    /// * `AggregationError::MissingBaseAmount` if an employee with an
    ///   entry has no base-amount input; no partial totals are produced
    pub fn aggregate(
        entries: &[PayrollEntry],
        base_amounts: &HashMap<EmployeeId, EmployeeBaseAmounts>,
        rates: &RateCard,
    ) -> Result<(PeriodTotals, Vec<EmployeeResult>), AggregationError> {
        rates.validate()?;

        let mut gross_sum = Decimal::ZERO;
        let mut tax_a_sum = Decimal::ZERO;
        let mut tax_b_sum = Decimal::ZERO;
        let mut results = Vec::with_capacity(entries.len());

        for entry in entries {
            let base = base_amounts
                .get(&entry.employee_id)
                .ok_or(AggregationError::MissingBaseAmount(entry.employee_id))?;

            let gross = Self::adjusted_gross(entry, base.gross, rates);
            let net = gross - base.tax_a - base.tax_b;

            gross_sum += gross;
            tax_a_sum += base.tax_a;
            tax_b_sum += base.tax_b;

            results.push(EmployeeResult {
                employee_id: entry.employee_id,
                gross,
                tax_a: base.tax_a,
                tax_b: base.tax_b,
                net,
            });
        }

        let gross = round_total(gross_sum);
        let tax_a = round_total(tax_a_sum);
        let tax_b = round_total(tax_b_sum);
        let totals = PeriodTotals {
            gross,
            net: gross - tax_a - tax_b,
            tax_a,
            tax_b,
            employer_cost: round_total(gross * (Decimal::ONE + rates.employer_burden)),
        };

        Ok((totals, results))
    }

    /// Adjusted gross for one employee, clamped at zero.
    fn adjusted_gross(entry: &PayrollEntry, base_gross: Decimal, rates: &RateCard) -> Decimal {
        let overtime = entry.overtime_hours.unwrap_or(Decimal::ZERO) * rates.overtime_hourly;
        let credited =
            entry.credited_absence_days.unwrap_or(Decimal::ZERO) * rates.absence_daily;
        let absences = entry.absence_days.unwrap_or(Decimal::ZERO) * rates.absence_daily;
        let tardiness = entry.tardiness_hours.unwrap_or(Decimal::ZERO) * rates.tardiness_hourly;

        let gross = base_gross + overtime + credited - absences - tardiness;
        gross.max(Decimal::ZERO)
    }
}
