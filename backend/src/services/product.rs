//! Product service: store catalog clones and audited price/stock edits
//!
//! Edits are expressed as a closed set of update commands; each one is
//! validated, applied transactionally, and appended to the product's audit
//! trail. Stock edits share the conditional-update discipline of the order
//! allocator so manual edits and order acceptance cannot lose updates.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use shared::{
    generate_batch_code, validate_batch_quantity, validate_price, InventoryKind, Product,
    ProductUpdate, ProductUpdateKind,
};

use crate::error::{AppError, AppResult};

const PRODUCT_COLUMNS: &str = "id, title, description, category, price, available, \
                               minimum_stock, inventory_id, distributor_product_id, created_at";

const PRODUCT_UPDATE_COLUMNS: &str = "id, product_id, kind, message, created_at";

/// Product service
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// Input for cloning a distributor catalog product into a store
#[derive(Debug, Deserialize)]
pub struct AddToStoreInput {
    pub distributor_product_id: Uuid,
    pub store_id: Uuid,
}

/// Closed set of product update commands. Each variant is validated before
/// application and produces its own audit entry kind.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProductUpdateCommand {
    PriceUpdate {
        new_price: Decimal,
    },
    StockUpdate {
        batch_id: Uuid,
        new_quantity: i32,
    },
    StockAdd {
        quantity: i32,
        expiration_date: Option<NaiveDate>,
        location: String,
    },
}

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Clone a distributor catalog product into a store's inventory with a
    /// back-reference to the catalog entry.
    pub async fn add_to_store(&self, input: AddToStoreInput) -> AppResult<Product> {
        let mut tx = self.db.begin().await?;

        let (catalog, owner_kind) = sqlx::query_as::<_, (Uuid, InventoryKind)>(
            r#"
            SELECT p.id, i.kind
            FROM products p
            JOIN inventories i ON i.id = p.inventory_id
            WHERE p.id = $1
            "#,
        )
        .bind(input.distributor_product_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        if owner_kind != InventoryKind::Distributor {
            return Err(AppError::Validation {
                field: "distributor_product_id".to_string(),
                message: "Product does not belong to a distributor catalog".to_string(),
                message_es: "El producto no pertenece al catálogo de un distribuidor".to_string(),
            });
        }

        let store_inventory_id = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM inventories WHERE store_id = $1 AND kind = 'store'",
        )
        .bind(input.store_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Store inventory".to_string()))?;

        let already_added = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM products
                WHERE distributor_product_id = $1 AND inventory_id = $2
            )
            "#,
        )
        .bind(catalog)
        .bind(store_inventory_id)
        .fetch_one(&mut *tx)
        .await?;

        if already_added {
            return Err(AppError::Conflict {
                resource: "products".to_string(),
                message: "Product already added to this store".to_string(),
                message_es: "El producto ya fue agregado a esta tienda".to_string(),
            });
        }

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (title, description, category, price, available, minimum_stock, inventory_id, distributor_product_id)
            SELECT title, description, category, price, available, minimum_stock, $2, id
            FROM products
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#,
        ))
        .bind(catalog)
        .bind(store_inventory_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(product)
    }

    /// Apply one update command to a product and append its audit entry
    pub async fn apply_update(
        &self,
        product_id: Uuid,
        command: ProductUpdateCommand,
    ) -> AppResult<ProductUpdate> {
        let mut tx = self.db.begin().await?;

        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 FOR UPDATE",
        ))
        .bind(product_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        let (kind, message) = match command {
            ProductUpdateCommand::PriceUpdate { new_price } => {
                if let Err(msg) = validate_price(new_price) {
                    return Err(AppError::Validation {
                        field: "new_price".to_string(),
                        message: msg.to_string(),
                        message_es: "El precio debe ser positivo".to_string(),
                    });
                }

                sqlx::query("UPDATE products SET price = $1 WHERE id = $2")
                    .bind(new_price)
                    .bind(product.id)
                    .execute(&mut *tx)
                    .await?;

                (
                    ProductUpdateKind::PriceUpdate,
                    format!(
                        "Precio de {} actualizado de {} a {}",
                        product.title, product.price, new_price
                    ),
                )
            }
            ProductUpdateCommand::StockUpdate {
                batch_id,
                new_quantity,
            } => {
                if let Err(msg) = validate_batch_quantity(new_quantity) {
                    return Err(AppError::Validation {
                        field: "new_quantity".to_string(),
                        message: msg.to_string(),
                        message_es: "La cantidad no puede ser negativa".to_string(),
                    });
                }

                let result = sqlx::query(
                    "UPDATE batches SET quantity = $1 WHERE id = $2 AND product_id = $3",
                )
                .bind(new_quantity)
                .bind(batch_id)
                .bind(product.id)
                .execute(&mut *tx)
                .await?;

                if result.rows_affected() == 0 {
                    return Err(AppError::NotFound("Batch".to_string()));
                }

                (
                    ProductUpdateKind::StockUpdate,
                    format!(
                        "Stock de {} ajustado a {} unidades en el lote {}",
                        product.title, new_quantity, batch_id
                    ),
                )
            }
            ProductUpdateCommand::StockAdd {
                quantity,
                expiration_date,
                location,
            } => {
                if quantity <= 0 {
                    return Err(AppError::Validation {
                        field: "quantity".to_string(),
                        message: "Quantity must be positive".to_string(),
                        message_es: "La cantidad debe ser positiva".to_string(),
                    });
                }

                let code = generate_batch_code(Uuid::new_v4(), Utc::now().date_naive());
                sqlx::query(
                    r#"
                    INSERT INTO batches (code, quantity, expiration_date, expired, location, product_id, inventory_id)
                    VALUES ($1, $2, $3, false, $4, $5, $6)
                    "#,
                )
                .bind(&code)
                .bind(quantity)
                .bind(expiration_date)
                .bind(&location)
                .bind(product.id)
                .bind(product.inventory_id)
                .execute(&mut *tx)
                .await?;

                (
                    ProductUpdateKind::StockAdd,
                    format!(
                        "Ingreso de stock: {} unidades de {} (lote {})",
                        quantity, product.title, code
                    ),
                )
            }
        };

        let update = sqlx::query_as::<_, ProductUpdate>(&format!(
            r#"
            INSERT INTO product_updates (product_id, kind, message)
            VALUES ($1, $2, $3)
            RETURNING {PRODUCT_UPDATE_COLUMNS}
            "#,
        ))
        .bind(product.id)
        .bind(kind)
        .bind(&message)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(update)
    }

    /// List a product's audit trail, most recent first
    pub async fn update_history(&self, product_id: Uuid) -> AppResult<Vec<ProductUpdate>> {
        let product_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                .bind(product_id)
                .fetch_one(&self.db)
                .await?;

        if !product_exists {
            return Err(AppError::NotFound("Product".to_string()));
        }

        let updates = sqlx::query_as::<_, ProductUpdate>(&format!(
            r#"
            SELECT {PRODUCT_UPDATE_COLUMNS}
            FROM product_updates
            WHERE product_id = $1
            ORDER BY created_at DESC
            "#,
        ))
        .bind(product_id)
        .fetch_all(&self.db)
        .await?;

        Ok(updates)
    }

    /// Get a product by id
    pub async fn get_product(&self, product_id: Uuid) -> AppResult<Product> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1",
        ))
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        Ok(product)
    }
}
