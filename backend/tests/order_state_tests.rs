//! Order state machine tests
//!
//! Covers:
//! - Legal transitions: pending -> accepted|rejected, accepted -> received
//! - Idempotent terminal transitions (repeat reject/accept refuses, no mutation)
//! - No illegal transition ever changes status

use proptest::prelude::*;
use shared::OrderStatus;

const ALL_STATUSES: [OrderStatus; 5] = [
    OrderStatus::Pending,
    OrderStatus::Accepted,
    OrderStatus::Rejected,
    OrderStatus::Received,
    OrderStatus::Cancelled,
];

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_legal_transitions() {
        let legal = [
            (OrderStatus::Pending, OrderStatus::Accepted),
            (OrderStatus::Pending, OrderStatus::Rejected),
            (OrderStatus::Accepted, OrderStatus::Received),
        ];

        for (from, to) in legal {
            assert!(from.can_transition_to(to), "{} -> {} must be legal", from, to);
        }
    }

    #[test]
    fn test_reject_after_reject_is_illegal() {
        assert!(!OrderStatus::Rejected.can_transition_to(OrderStatus::Rejected));
    }

    #[test]
    fn test_accept_after_accept_is_illegal() {
        assert!(!OrderStatus::Accepted.can_transition_to(OrderStatus::Accepted));
    }

    #[test]
    fn test_reject_on_accepted_is_illegal() {
        assert!(!OrderStatus::Accepted.can_transition_to(OrderStatus::Rejected));
    }

    #[test]
    fn test_receive_requires_accepted() {
        for from in ALL_STATUSES {
            let legal = from == OrderStatus::Accepted;
            assert_eq!(from.can_transition_to(OrderStatus::Received), legal);
        }
    }

    #[test]
    fn test_cancelled_is_unreachable() {
        for from in ALL_STATUSES {
            assert!(!from.can_transition_to(OrderStatus::Cancelled));
        }
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(OrderStatus::Pending.as_str(), "pending");
        assert_eq!(OrderStatus::Accepted.as_str(), "accepted");
        assert_eq!(OrderStatus::Rejected.as_str(), "rejected");
        assert_eq!(OrderStatus::Received.as_str(), "received");
        assert_eq!(OrderStatus::Cancelled.as_str(), "cancelled");
    }
}

// ============================================================================
// Transition Simulation
// ============================================================================

/// Outcome of attempting a transition on an order in a given status:
/// the new status when legal, or the unchanged status with a refusal.
fn simulate_transition(current: OrderStatus, requested: OrderStatus) -> (OrderStatus, bool) {
    if current.can_transition_to(requested) {
        (requested, true)
    } else {
        (current, false)
    }
}

#[cfg(test)]
mod simulation_tests {
    use super::*;

    #[test]
    fn test_double_reject_keeps_status() {
        let (status, changed) = simulate_transition(OrderStatus::Pending, OrderStatus::Rejected);
        assert!(changed);
        assert_eq!(status, OrderStatus::Rejected);

        // Second reject refuses and leaves status untouched
        let (status, changed) = simulate_transition(status, OrderStatus::Rejected);
        assert!(!changed);
        assert_eq!(status, OrderStatus::Rejected);
    }

    #[test]
    fn test_receive_on_pending_refused() {
        let (status, changed) = simulate_transition(OrderStatus::Pending, OrderStatus::Received);
        assert!(!changed);
        assert_eq!(status, OrderStatus::Pending);
    }

    #[test]
    fn test_receive_on_rejected_refused() {
        let (status, changed) = simulate_transition(OrderStatus::Rejected, OrderStatus::Received);
        assert!(!changed);
        assert_eq!(status, OrderStatus::Rejected);
    }

    #[test]
    fn test_full_lifecycle() {
        let (status, _) = simulate_transition(OrderStatus::Pending, OrderStatus::Accepted);
        let (status, changed) = simulate_transition(status, OrderStatus::Received);
        assert!(changed);
        assert_eq!(status, OrderStatus::Received);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn status_strategy() -> impl Strategy<Value = OrderStatus> {
        prop_oneof![
            Just(OrderStatus::Pending),
            Just(OrderStatus::Accepted),
            Just(OrderStatus::Rejected),
            Just(OrderStatus::Received),
            Just(OrderStatus::Cancelled),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Only the three legal transitions are ever allowed
        #[test]
        fn prop_transition_table_closed(from in status_strategy(), to in status_strategy()) {
            let legal = matches!(
                (from, to),
                (OrderStatus::Pending, OrderStatus::Accepted)
                    | (OrderStatus::Pending, OrderStatus::Rejected)
                    | (OrderStatus::Accepted, OrderStatus::Received)
            );
            prop_assert_eq!(from.can_transition_to(to), legal);
        }

        /// A refused transition never changes the status
        #[test]
        fn prop_refusal_preserves_status(from in status_strategy(), to in status_strategy()) {
            let (after, changed) = simulate_transition(from, to);
            if !changed {
                prop_assert_eq!(after, from);
            }
        }

        /// Terminal statuses admit no transition at all
        #[test]
        fn prop_terminal_is_terminal(to in status_strategy()) {
            for terminal in [OrderStatus::Rejected, OrderStatus::Received, OrderStatus::Cancelled] {
                prop_assert!(!terminal.can_transition_to(to));
            }
        }

        /// Any sequence of transition attempts reaches at most one terminal
        /// status and never leaves it
        #[test]
        fn prop_monotonic_lifecycle(attempts in prop::collection::vec(status_strategy(), 1..20)) {
            let mut status = OrderStatus::Pending;
            let mut terminal_seen = false;

            for requested in attempts {
                let (next, changed) = simulate_transition(status, requested);
                if terminal_seen {
                    prop_assert!(!changed);
                }
                if next.is_terminal() {
                    terminal_seen = true;
                }
                status = next;
            }
        }
    }
}
