//! Product model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A catalog or store product.
///
/// A distributor's catalog product lives in the distributor inventory; when
/// an inventory manager adds it to a store, the product is cloned into the
/// store inventory with `distributor_product_id` pointing back at the
/// catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Decimal,
    pub available: bool,
    /// Low-stock alert threshold
    pub minimum_stock: i32,
    pub inventory_id: Uuid,
    pub distributor_product_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
