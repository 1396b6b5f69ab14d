//! Property-based tests for LifecycleMachine.
//!
//! These tests validate the lifecycle invariants using proptest for
//! randomized transition-sequence generation.

use proptest::prelude::*;

use crate::lifecycle::machine::LifecycleMachine;
use crate::lifecycle::types::PeriodStatus;
use paycycle_shared::types::UserId;

/// Strategy for generating random PeriodStatus values.
fn arb_status() -> impl Strategy<Value = PeriodStatus> {
    prop_oneof![
        Just(PeriodStatus::Draft),
        Just(PeriodStatus::Locked),
        Just(PeriodStatus::Calculated),
        Just(PeriodStatus::Approved),
        Just(PeriodStatus::Paid),
    ]
}

/// Strategy for generating random target-status walks.
fn arb_walk() -> impl Strategy<Value = Vec<PeriodStatus>> {
    prop::collection::vec(arb_status(), 0..24)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A period never reaches Paid without having passed through Approved,
    /// for any sequence of attempted transitions starting from Draft.
    #[test]
    fn prop_paid_requires_approved(walk in arb_walk()) {
        let actor = UserId::new();
        let mut status = PeriodStatus::Draft;
        let mut seen_approved = false;

        for target in walk {
            if let Ok(action) = LifecycleMachine::plan(status, target, 1, actor) {
                status = action.new_status();
                if status == PeriodStatus::Approved {
                    seen_approved = true;
                }
                if status == PeriodStatus::Paid {
                    prop_assert!(seen_approved);
                }
            }
        }
    }

    /// Paid is terminal: no transition out of it ever succeeds.
    #[test]
    fn prop_paid_is_terminal(target in arb_status()) {
        let result = LifecycleMachine::plan(PeriodStatus::Paid, target, 1, UserId::new());
        prop_assert!(result.is_err());
    }

    /// `plan` succeeds exactly on the pairs `is_valid_transition` accepts
    /// (given a non-empty period).
    #[test]
    fn prop_plan_matches_transition_graph(from in arb_status(), to in arb_status()) {
        let planned = LifecycleMachine::plan(from, to, 1, UserId::new());
        prop_assert_eq!(planned.is_ok(), LifecycleMachine::is_valid_transition(from, to));
    }

    /// Every successful plan lands on the requested target status.
    #[test]
    fn prop_plan_reaches_target(from in arb_status(), to in arb_status()) {
        if let Ok(action) = LifecycleMachine::plan(from, to, 1, UserId::new()) {
            prop_assert_eq!(action.new_status(), to);
        }
    }

    /// Locking is the only transition out of Draft, and it requires entries.
    #[test]
    fn prop_empty_draft_is_stuck(target in arb_status()) {
        let result = LifecycleMachine::plan(PeriodStatus::Draft, target, 0, UserId::new());
        prop_assert!(result.is_err());
    }
}
