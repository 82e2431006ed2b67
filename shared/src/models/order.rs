//! Purchase order model and state-machine rules

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A purchase order from a store's inventory manager to a distributor
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: Uuid,
    pub status: OrderStatus,
    /// Requested quantity; immutable after creation
    pub quantity: i32,
    /// Total price (unit price x quantity); immutable after creation
    pub price: Decimal,
    /// The store-side product being ordered
    pub product_id: Uuid,
    pub inventory_manager_id: Uuid,
    pub salesperson_id: Uuid,
    /// Batch created at acceptance to fulfill this order
    pub sent_batch_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every status transition
    pub updated_at: DateTime<Utc>,
}

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Accepted,
    Rejected,
    Received,
    /// Reserved status value; no transition reaches it
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Accepted => "accepted",
            OrderStatus::Rejected => "rejected",
            OrderStatus::Received => "received",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Legal transitions: pending -> {accepted, rejected}; accepted -> received
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Accepted)
                | (OrderStatus::Pending, OrderStatus::Rejected)
                | (OrderStatus::Accepted, OrderStatus::Received)
        )
    }

    /// A terminal status admits no further transition
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrderStatus::Rejected | OrderStatus::Received | OrderStatus::Cancelled
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_transitions() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Accepted));
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Rejected));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Received));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Cancelled));
    }

    #[test]
    fn test_accepted_transitions() {
        assert!(OrderStatus::Accepted.can_transition_to(OrderStatus::Received));
        assert!(!OrderStatus::Accepted.can_transition_to(OrderStatus::Rejected));
        assert!(!OrderStatus::Accepted.can_transition_to(OrderStatus::Pending));
    }

    #[test]
    fn test_terminal_states_admit_nothing() {
        for terminal in [
            OrderStatus::Rejected,
            OrderStatus::Received,
            OrderStatus::Cancelled,
        ] {
            for next in [
                OrderStatus::Pending,
                OrderStatus::Accepted,
                OrderStatus::Rejected,
                OrderStatus::Received,
                OrderStatus::Cancelled,
            ] {
                assert!(!terminal.can_transition_to(next));
            }
            assert!(terminal.is_terminal());
        }
    }
}
