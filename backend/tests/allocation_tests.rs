//! Batch allocation tests
//!
//! Covers:
//! - Conservation of stock: deductions sum to exactly the required quantity
//! - No batch is deducted below zero
//! - Greedy created-first ordering
//! - Insufficiency reporting (available vs required, no plan)

use proptest::prelude::*;
use shared::{plan_deductions, BatchDeduction};
use uuid::Uuid;

fn id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Batches A qty=5 and B qty=8; an order for 10 deducts
    /// 5 from A and 5 from B.
    #[test]
    fn test_two_batch_scenario() {
        let plan = plan_deductions(&[(id(1), 5), (id(2), 8)], 10).unwrap();

        assert_eq!(plan.total_available, 13);
        assert_eq!(
            plan.deductions,
            vec![
                BatchDeduction { batch_id: id(1), amount: 5 },
                BatchDeduction { batch_id: id(2), amount: 5 },
            ]
        );
    }

    #[test]
    fn test_first_batch_covers_everything() {
        let plan = plan_deductions(&[(id(1), 100), (id(2), 50)], 30).unwrap();
        assert_eq!(plan.deductions.len(), 1);
        assert_eq!(plan.deductions[0].amount, 30);
    }

    #[test]
    fn test_exact_drain() {
        let plan = plan_deductions(&[(id(1), 4), (id(2), 6)], 10).unwrap();
        assert_eq!(plan.deductions[0].amount, 4);
        assert_eq!(plan.deductions[1].amount, 6);
    }

    #[test]
    fn test_insufficient_stock() {
        let err = plan_deductions(&[(id(1), 4), (id(2), 3)], 8).unwrap_err();
        assert_eq!(err.available, 7);
        assert_eq!(err.required, 8);
    }

    #[test]
    fn test_empty_candidates() {
        let err = plan_deductions(&[], 5).unwrap_err();
        assert_eq!(err.available, 0);
    }

    #[test]
    fn test_candidate_order_respected() {
        // The older batch is drained first even when a later one is larger
        let plan = plan_deductions(&[(id(7), 2), (id(8), 50)], 10).unwrap();
        assert_eq!(plan.deductions[0].batch_id, id(7));
        assert_eq!(plan.deductions[0].amount, 2);
        assert_eq!(plan.deductions[1].batch_id, id(8));
        assert_eq!(plan.deductions[1].amount, 8);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for candidate batch lists (positive quantities)
    fn candidates_strategy() -> impl Strategy<Value = Vec<(Uuid, i32)>> {
        prop::collection::vec((1u128..1_000_000u128, 1i32..=500i32), 1..15)
            .prop_map(|v| v.into_iter().map(|(n, q)| (id(n), q)).collect())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Conservation of stock: a successful plan deducts exactly the
        /// required quantity
        #[test]
        fn prop_deductions_sum_to_required(
            candidates in candidates_strategy(),
            required in 1i32..=1000i32
        ) {
            if let Ok(plan) = plan_deductions(&candidates, required) {
                let deducted: i32 = plan.deductions.iter().map(|d| d.amount).sum();
                prop_assert_eq!(deducted, required);
            }
        }

        /// No deduction exceeds its batch quantity (no negative balances)
        #[test]
        fn prop_no_batch_overdrawn(
            candidates in candidates_strategy(),
            required in 1i32..=1000i32
        ) {
            if let Ok(plan) = plan_deductions(&candidates, required) {
                for (deduction, (batch_id, quantity)) in plan.deductions.iter().zip(&candidates) {
                    prop_assert_eq!(deduction.batch_id, *batch_id);
                    prop_assert!(deduction.amount >= 1);
                    prop_assert!(deduction.amount <= *quantity);
                }
            }
        }

        /// Success exactly when the total covers the requirement
        #[test]
        fn prop_success_iff_covered(
            candidates in candidates_strategy(),
            required in 1i32..=1000i32
        ) {
            let total: i64 = candidates.iter().map(|(_, q)| i64::from(*q)).sum();
            let result = plan_deductions(&candidates, required);

            if total >= i64::from(required) {
                prop_assert!(result.is_ok());
            } else {
                let err = result.unwrap_err();
                prop_assert_eq!(err.available, total);
                prop_assert_eq!(err.required, required);
            }
        }

        /// Every batch except the last planned one is fully drained: the
        /// greedy policy never skips ahead
        #[test]
        fn prop_greedy_drains_prefix(
            candidates in candidates_strategy(),
            required in 1i32..=1000i32
        ) {
            if let Ok(plan) = plan_deductions(&candidates, required) {
                let n = plan.deductions.len();
                for (deduction, (_, quantity)) in plan.deductions.iter().take(n - 1).zip(&candidates) {
                    prop_assert_eq!(deduction.amount, *quantity);
                }
            }
        }

        /// Insufficiency produces no plan and therefore no mutation
        #[test]
        fn prop_insufficiency_carries_both_numbers(
            candidates in candidates_strategy()
        ) {
            let total: i64 = candidates.iter().map(|(_, q)| i64::from(*q)).sum();
            let required = i32::try_from(total + 1).unwrap_or(i32::MAX);

            let err = plan_deductions(&candidates, required).unwrap_err();
            prop_assert_eq!(err.available, total);
            prop_assert_eq!(err.required, required);
        }
    }
}
