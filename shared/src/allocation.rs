//! Batch allocation planning
//!
//! Planning is pure: given a snapshot of candidate batches, compute an
//! immutable plan of per-batch deductions, or report insufficiency. The
//! backend takes the snapshot under row locks and applies the plan with
//! conditional decrements inside the same transaction.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One deduction to apply against a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchDeduction {
    pub batch_id: Uuid,
    pub amount: i32,
}

/// An immutable allocation plan covering a required quantity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationPlan {
    pub deductions: Vec<BatchDeduction>,
    pub total_available: i64,
}

/// Stock cannot cover the required quantity; carries both numbers so the
/// caller can format "available: X, required: Y"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsufficientStock {
    pub available: i64,
    pub required: i32,
}

/// Plan greedy deductions over candidate batches in the given order
/// (created-first), taking `min(batch.quantity, remaining)` from each until
/// the requirement is covered.
///
/// Candidates must already be filtered to non-expired batches with positive
/// quantity.
pub fn plan_deductions(
    candidates: &[(Uuid, i32)],
    required: i32,
) -> Result<AllocationPlan, InsufficientStock> {
    let total_available: i64 = candidates.iter().map(|(_, q)| i64::from(*q)).sum();

    if total_available < i64::from(required) {
        return Err(InsufficientStock {
            available: total_available,
            required,
        });
    }

    let mut deductions = Vec::new();
    let mut remaining = required;
    for (batch_id, quantity) in candidates {
        if remaining == 0 {
            break;
        }
        let amount = remaining.min(*quantity);
        deductions.push(BatchDeduction {
            batch_id: *batch_id,
            amount,
        });
        remaining -= amount;
    }

    Ok(AllocationPlan {
        deductions,
        total_available,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[test]
    fn test_two_batch_split() {
        // Batch A qty=5, batch B qty=8; order for 10 deducts 5 then 5
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
    fn test_single_batch_covers() {
        let plan = plan_deductions(&[(id(1), 20), (id(2), 5)], 7).unwrap();
        assert_eq!(
            plan.deductions,
            vec![BatchDeduction { batch_id: id(1), amount: 7 }]
        );
    }

    #[test]
    fn test_exact_total() {
        let plan = plan_deductions(&[(id(1), 3), (id(2), 4)], 7).unwrap();
        let deducted: i32 = plan.deductions.iter().map(|d| d.amount).sum();
        assert_eq!(deducted, 7);
        assert_eq!(plan.deductions.len(), 2);
    }

    #[test]
    fn test_insufficient_reports_both_numbers() {
        let err = plan_deductions(&[(id(1), 3), (id(2), 4)], 10).unwrap_err();
        assert_eq!(err.available, 7);
        assert_eq!(err.required, 10);
    }

    #[test]
    fn test_no_candidates() {
        let err = plan_deductions(&[], 1).unwrap_err();
        assert_eq!(err.available, 0);
        assert_eq!(err.required, 1);
    }
}
