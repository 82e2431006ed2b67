//! Stock alert model and threshold rules

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A derived, reconciled signal about a product's stock at a store.
///
/// Invariant: at most one unresolved alert per (product_id, store_id) at
/// any time, across kinds.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Alert {
    pub id: Uuid,
    pub kind: AlertKind,
    pub product_id: Uuid,
    pub store_id: Uuid,
    pub message: String,
    pub resolved: bool,
    pub created_at: DateTime<Utc>,
}

/// Alert kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "alert_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    LowStock,
    ExpiredBatch,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::LowStock => "low_stock",
            AlertKind::ExpiredBatch => "expired_batch",
        }
    }
}

/// A product is low on stock when its total non-expired quantity is at or
/// below its configured minimum.
pub fn is_low_stock(total_stock: i64, minimum_stock: i32) -> bool {
    total_stock <= i64::from(minimum_stock)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_stock_boundary() {
        assert!(!is_low_stock(31, 30));
        assert!(is_low_stock(30, 30));
        assert!(is_low_stock(29, 30));
        assert!(is_low_stock(0, 0));
    }
}
