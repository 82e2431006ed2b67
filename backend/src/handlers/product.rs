//! HTTP handlers for product endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Product, ProductUpdate};
use crate::services::product::{AddToStoreInput, ProductService, ProductUpdateCommand};
use crate::AppState;

/// Clone a distributor catalog product into a store's inventory
pub async fn add_product_to_store(
    State(state): State<AppState>,
    Json(input): Json<AddToStoreInput>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    let product = service.add_to_store(input).await?;
    Ok(Json(product))
}

/// Apply a price/stock update command to a product
pub async fn apply_product_update(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(command): Json<ProductUpdateCommand>,
) -> AppResult<Json<ProductUpdate>> {
    let service = ProductService::new(state.db);
    let update = service.apply_update(product_id, command).await?;
    Ok(Json(update))
}

/// Get a product's audit trail
pub async fn get_product_updates(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Vec<ProductUpdate>>> {
    let service = ProductService::new(state.db);
    let updates = service.update_history(product_id).await?;
    Ok(Json(updates))
}

/// Get a product by id
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    let product = service.get_product(product_id).await?;
    Ok(Json(product))
}
