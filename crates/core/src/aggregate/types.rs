//! Aggregation domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregate::error::AggregationError;
use paycycle_shared::config::PayrollConfig;
use paycycle_shared::types::EmployeeId;

/// Monetary rates applied to entry adjustments.
///
/// These are external configuration (see `PayrollConfig`), never computed
/// by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateCard {
    /// Amount credited per overtime hour.
    pub overtime_hourly: Decimal,
    /// Amount deducted per absence day (and restored per credited day).
    pub absence_daily: Decimal,
    /// Amount deducted per tardiness hour.
    pub tardiness_hourly: Decimal,
    /// Employer burden applied to gross as a fraction (0.20 = 20%).
    pub employer_burden: Decimal,
}

impl RateCard {
    /// Validates that every rate is non-negative.
    ///
    /// # Errors
    ///
    /// Returns `AggregationError::InvalidRate` naming the offending rate.
    pub fn validate(&self) -> Result<(), AggregationError> {
        let checks = [
            ("overtime_hourly", self.overtime_hourly),
            ("absence_daily", self.absence_daily),
            ("tardiness_hourly", self.tardiness_hourly),
            ("employer_burden", self.employer_burden),
        ];
        for (field, value) in checks {
            if value < Decimal::ZERO {
                return Err(AggregationError::InvalidRate { field, value });
            }
        }
        Ok(())
    }
}

impl From<&PayrollConfig> for RateCard {
    fn from(cfg: &PayrollConfig) -> Self {
        Self {
            overtime_hourly: cfg.overtime_hourly_rate,
            absence_daily: cfg.absence_daily_rate,
            tardiness_hourly: cfg.tardiness_hourly_rate,
            employer_burden: cfg.employer_burden_rate,
        }
    }
}

/// Externally supplied monetary inputs for one employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeBaseAmounts {
    /// Base gross compensation before adjustments.
    pub gross: Decimal,
    /// Tax withholding A for the employee.
    pub tax_a: Decimal,
    /// Tax withholding B for the employee.
    pub tax_b: Decimal,
}

/// Per-employee computed breakdown, one row per employee with an entry.
///
/// Values are kept unrounded; rounding happens only on the period totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeResult {
    /// The employee this row belongs to.
    pub employee_id: EmployeeId,
    /// Adjusted gross, clamped at zero.
    pub gross: Decimal,
    /// Tax withholding A.
    pub tax_a: Decimal,
    /// Tax withholding B.
    pub tax_b: Decimal,
    /// Net: gross minus both withholdings.
    pub net: Decimal,
}

/// The five aggregate totals stored on a calculated period.
///
/// All values are rounded to two decimal places with banker's rounding.
/// `net` and `employer_cost` are derived from the rounded components, so
/// `net == gross - tax_a - tax_b` holds exactly on the stored values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotals {
    /// Total adjusted gross across employees.
    pub gross: Decimal,
    /// Total net payable.
    pub net: Decimal,
    /// Total tax withholding A.
    pub tax_a: Decimal,
    /// Total tax withholding B.
    pub tax_b: Decimal,
    /// Total employer cost: gross plus the employer burden.
    pub employer_cost: Decimal,
}

impl PeriodTotals {
    /// All-zero totals.
    pub const ZERO: Self = Self {
        gross: Decimal::ZERO,
        net: Decimal::ZERO,
        tax_a: Decimal::ZERO,
        tax_b: Decimal::ZERO,
        employer_cost: Decimal::ZERO,
    };

    /// Returns true if every total is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.gross.is_zero()
            && self.net.is_zero()
            && self.tax_a.is_zero()
            && self.tax_b.is_zero()
            && self.employer_cost.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rate_card_from_config() {
        let cfg = PayrollConfig::default();
        let rates = RateCard::from(&cfg);
        assert_eq!(rates.overtime_hourly, cfg.overtime_hourly_rate);
        assert_eq!(rates.employer_burden, cfg.employer_burden_rate);
        assert!(rates.validate().is_ok());
    }

    #[test]
    fn test_rate_card_rejects_negative() {
        let rates = RateCard {
            overtime_hourly: dec!(50),
            absence_daily: dec!(-93.33),
            tardiness_hourly: dec!(25),
            employer_burden: dec!(0.2),
        };
        assert!(matches!(
            rates.validate(),
            Err(AggregationError::InvalidRate {
                field: "absence_daily",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_totals() {
        assert!(PeriodTotals::ZERO.is_zero());
        let non_zero = PeriodTotals {
            gross: dec!(1),
            ..PeriodTotals::ZERO
        };
        assert!(!non_zero.is_zero());
    }
}
