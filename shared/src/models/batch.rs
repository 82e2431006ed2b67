//! Batch model — the unit of stock movement between inventories

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A quantity of one product sharing an expiration date and code.
///
/// `inventory_id` records which inventory currently holds the batch; order
/// receipt rewrites it from the distributor's inventory to the store's.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Batch {
    pub id: Uuid,
    /// Unique human-readable label (e.g., "B-20240115-3f9a2c1d")
    pub code: String,
    pub quantity: i32,
    pub expiration_date: Option<NaiveDate>,
    pub expired: bool,
    pub location: String,
    /// Unit cost when created via order acceptance
    pub purchase_price: Option<Decimal>,
    pub product_id: Uuid,
    pub inventory_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Generate a batch code from a seed id (the fulfilled order's id, or a
/// fresh id for manual stock entries) and the creation date
pub fn generate_batch_code(seed: Uuid, date: NaiveDate) -> String {
    let short = seed.as_simple().to_string();
    format!("B-{}-{}", date.format("%Y%m%d"), &short[..8])
}

/// Unit purchase price for a batch created at order acceptance:
/// total order price divided by the requested quantity.
pub fn unit_purchase_price(total_price: Decimal, requested_quantity: i32) -> Option<Decimal> {
    if requested_quantity <= 0 {
        return None;
    }
    Some(total_price / Decimal::from(requested_quantity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_batch_code_shape() {
        let id = Uuid::nil();
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let code = generate_batch_code(id, date);
        assert_eq!(code, "B-20240115-00000000");
    }

    #[test]
    fn test_unit_purchase_price() {
        let unit = unit_purchase_price(Decimal::from(150), 10).unwrap();
        assert_eq!(unit, Decimal::from(15));
        assert!(unit_purchase_price(Decimal::from(150), 0).is_none());
    }
}
