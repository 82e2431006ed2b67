//! Append-only product audit trail

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An audit entry describing a price or stock change event for a product.
/// Never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProductUpdate {
    pub id: Uuid,
    pub product_id: Uuid,
    pub kind: ProductUpdateKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Audit entry kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "product_update_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProductUpdateKind {
    PriceUpdate,
    StockUpdate,
    StockAdd,
    Sale,
}

impl ProductUpdateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductUpdateKind::PriceUpdate => "price_update",
            ProductUpdateKind::StockUpdate => "stock_update",
            ProductUpdateKind::StockAdd => "stock_add",
            ProductUpdateKind::Sale => "sale",
        }
    }
}
