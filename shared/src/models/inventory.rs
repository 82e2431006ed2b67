//! Inventory model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stock-holding context belonging to a distributor/salesperson or a store
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Inventory {
    pub id: Uuid,
    pub kind: InventoryKind,
    /// Set when `kind` is `Store`
    pub store_id: Option<Uuid>,
    /// Set when `kind` is `Distributor`
    pub salesperson_id: Option<Uuid>,
}

/// Closed set of inventory kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "inventory_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum InventoryKind {
    Distributor,
    Store,
}

impl InventoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InventoryKind::Distributor => "distributor",
            InventoryKind::Store => "store",
        }
    }
}
