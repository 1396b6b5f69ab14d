//! Property-based tests for the period aggregator.

use std::collections::HashMap;

use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::aggregate::engine::PeriodAggregator;
use crate::aggregate::types::{EmployeeBaseAmounts, RateCard};
use crate::entry::{EntryFields, PayrollEntry};
use paycycle_shared::types::{AuditStamp, EmployeeId, EntryId, PeriodId, UserId};

/// Strategy for cent-denominated amounts in [0, 10_000_00].
fn arb_cents() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000).prop_map(|c| Decimal::new(c, 2))
}

/// Strategy for optional small adjustment quantities (quarter steps).
fn arb_adjustment() -> impl Strategy<Value = Option<Decimal>> {
    prop_oneof![
        Just(None),
        (0i64..160).prop_map(|q| Some(Decimal::new(q, 2) * Decimal::new(25, 0))),
    ]
}

prop_compose! {
    fn arb_employee_input()(
        gross in arb_cents(),
        tax_a in arb_cents(),
        tax_b in arb_cents(),
        absence in arb_adjustment(),
        credited in arb_adjustment(),
        overtime in arb_adjustment(),
        tardiness in arb_adjustment(),
    ) -> (EmployeeBaseAmounts, EntryFields) {
        (
            EmployeeBaseAmounts { gross, tax_a, tax_b },
            EntryFields {
                absence_days: absence,
                credited_absence_days: credited,
                overtime_hours: overtime,
                tardiness_hours: tardiness,
                note: None,
            },
        )
    }
}

fn rates() -> RateCard {
    RateCard {
        overtime_hourly: Decimal::new(50, 0),
        absence_daily: Decimal::new(9333, 2),
        tardiness_hourly: Decimal::new(25, 0),
        employer_burden: Decimal::new(20, 2),
    }
}

fn build(inputs: &[(EmployeeBaseAmounts, EntryFields)]) -> (
    Vec<PayrollEntry>,
    HashMap<EmployeeId, EmployeeBaseAmounts>,
) {
    let period_id = PeriodId::new();
    let stamp = AuditStamp::now(UserId::new());
    let mut entries = Vec::new();
    let mut base_amounts = HashMap::new();
    for (base, fields) in inputs {
        let employee_id = EmployeeId::new();
        let mut entry = PayrollEntry {
            id: EntryId::new(),
            period_id,
            employee_id,
            employee_name: employee_id.to_string(),
            absence_days: None,
            credited_absence_days: None,
            overtime_hours: None,
            tardiness_hours: None,
            note: None,
            created: stamp,
            updated: stamp,
        };
        entry.apply(fields.clone());
        entries.push(entry);
        base_amounts.insert(employee_id, *base);
    }
    (entries, base_amounts)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Aggregation is deterministic: two runs over the same inputs yield
    /// byte-identical totals and results.
    #[test]
    fn prop_aggregate_is_deterministic(
        inputs in prop::collection::vec(arb_employee_input(), 0..12)
    ) {
        let (entries, base_amounts) = build(&inputs);
        let first = PeriodAggregator::aggregate(&entries, &base_amounts, &rates()).unwrap();
        let second = PeriodAggregator::aggregate(&entries, &base_amounts, &rates()).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Gross never goes negative: each employee is clamped at zero.
    #[test]
    fn prop_gross_is_non_negative(
        inputs in prop::collection::vec(arb_employee_input(), 0..12)
    ) {
        let (entries, base_amounts) = build(&inputs);
        let (totals, results) =
            PeriodAggregator::aggregate(&entries, &base_amounts, &rates()).unwrap();
        prop_assert!(totals.gross >= Decimal::ZERO);
        for row in results {
            prop_assert!(row.gross >= Decimal::ZERO);
        }
    }

    /// The stored totals satisfy net = gross - taxA - taxB exactly.
    #[test]
    fn prop_net_identity_holds(
        inputs in prop::collection::vec(arb_employee_input(), 0..12)
    ) {
        let (entries, base_amounts) = build(&inputs);
        let (totals, _) =
            PeriodAggregator::aggregate(&entries, &base_amounts, &rates()).unwrap();
        prop_assert_eq!(totals.net, totals.gross - totals.tax_a - totals.tax_b);
    }

    /// Employer cost is never below gross for a non-negative burden rate.
    #[test]
    fn prop_employer_cost_covers_gross(
        inputs in prop::collection::vec(arb_employee_input(), 0..12)
    ) {
        let (entries, base_amounts) = build(&inputs);
        let (totals, _) =
            PeriodAggregator::aggregate(&entries, &base_amounts, &rates()).unwrap();
        prop_assert!(totals.employer_cost >= totals.gross);
    }
}
