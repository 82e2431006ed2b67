//! Parties: stores, salespersons, inventory managers

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A retail store holding its own inventory
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Store {
    pub id: Uuid,
    pub name: String,
}

/// A distributor-side salesperson fulfilling orders from their inventory
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Salesperson {
    pub id: Uuid,
    pub name: String,
}

/// A store-side inventory manager placing orders for their store
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InventoryManager {
    pub id: Uuid,
    pub name: String,
    pub store_id: Uuid,
}
