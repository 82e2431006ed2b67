//! Order lifecycle service
//!
//! Enforces the order state machine (pending -> accepted|rejected,
//! accepted -> received) and executes each transition's side effects —
//! batch allocation, batch creation/transfer, audit entries, notifications —
//! atomically in a single transaction per transition.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use shared::{
    generate_batch_code, plan_deductions, unit_purchase_price, validate_order_quantity,
    validate_price, Batch, Inventory, InventoryManager, NotificationKind, Order, OrderStatus,
    ProductUpdateKind, Salesperson,
};

use crate::error::{AppError, AppResult};
use crate::services::notification::{insert_notification, NewNotification};

/// Order service driving the order state machine
#[derive(Clone)]
pub struct OrderService {
    db: PgPool,
}

/// Input for creating an order.
///
/// The fulfilling salesperson is an explicit parameter; the order is always
/// tied to a concrete distributor-side fulfiller.
#[derive(Debug, Deserialize)]
pub struct CreateOrderInput {
    pub product_id: Uuid,
    pub quantity: i32,
    /// Total price (unit price x quantity)
    pub price: Decimal,
    pub salesperson_id: Uuid,
    pub inventory_manager_id: Uuid,
}

/// Input for accepting an order.
///
/// `fulfilled_quantity` sizes the batch sent to the store; allocation always
/// deducts the order's originally requested quantity from distributor stock.
/// The two may legitimately differ.
#[derive(Debug, Deserialize)]
pub struct AcceptOrderInput {
    pub fulfilled_quantity: i32,
    pub expiration_date: Option<NaiveDate>,
    pub location: String,
}

/// Input for marking an order received
#[derive(Debug, Deserialize)]
pub struct ReceiveOrderInput {
    pub location: String,
}

/// Result of an accept attempt. Refusals are data, not errors: the request
/// reached the system and was declined with a user-facing message.
#[derive(Debug)]
pub enum AcceptOutcome {
    Accepted { order: Order, batch: Batch },
    Refused { message: String },
    InsufficientStock { available: i64, required: i32 },
}

/// Result of a reject attempt
#[derive(Debug)]
pub enum RejectOutcome {
    Rejected { order: Order },
    Refused { message: String },
}

const ORDER_COLUMNS: &str = "id, status, quantity, price, product_id, inventory_manager_id, \
                             salesperson_id, sent_batch_id, created_at, updated_at";

const BATCH_COLUMNS: &str = "id, code, quantity, expiration_date, expired, location, \
                             purchase_price, product_id, inventory_id, created_at";

impl OrderService {
    /// Create a new OrderService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create an order with status `pending` and notify the salesperson
    pub async fn create_order(&self, input: CreateOrderInput) -> AppResult<Order> {
        if let Err(msg) = validate_order_quantity(input.quantity) {
            return Err(AppError::Validation {
                field: "quantity".to_string(),
                message: msg.to_string(),
                message_es: "La cantidad debe ser positiva".to_string(),
            });
        }
        if let Err(msg) = validate_price(input.price) {
            return Err(AppError::Validation {
                field: "price".to_string(),
                message: msg.to_string(),
                message_es: "El precio debe ser positivo".to_string(),
            });
        }

        let mut tx = self.db.begin().await?;

        let product_title = sqlx::query_scalar::<_, String>(
            "SELECT title FROM products WHERE id = $1",
        )
        .bind(input.product_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        let manager = sqlx::query_as::<_, InventoryManager>(
            "SELECT id, name, store_id FROM inventory_managers WHERE id = $1",
        )
        .bind(input.inventory_manager_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Inventory manager".to_string()))?;

        let salesperson = sqlx::query_as::<_, Salesperson>(
            "SELECT id, name FROM salespersons WHERE id = $1",
        )
        .bind(input.salesperson_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Salesperson".to_string()))?;

        let order = sqlx::query_as::<_, Order>(&format!(
            r#"
            INSERT INTO orders (status, quantity, price, product_id, inventory_manager_id, salesperson_id)
            VALUES ('pending', $1, $2, $3, $4, $5)
            RETURNING {ORDER_COLUMNS}
            "#,
        ))
        .bind(input.quantity)
        .bind(input.price)
        .bind(input.product_id)
        .bind(input.inventory_manager_id)
        .bind(input.salesperson_id)
        .fetch_one(&mut *tx)
        .await?;

        insert_notification(
            &mut *tx,
            NewNotification {
                recipient_id: salesperson.id,
                title: "Nuevo pedido",
                message: format!(
                    "Nuevo pedido de {}: {} unidades de {}",
                    manager.name, order.quantity, product_title
                ),
                kind: NotificationKind::OrderCreated,
                order_id: Some(order.id),
            },
        )
        .await?;

        tx.commit().await?;

        Ok(order)
    }

    /// Accept a pending order: deduct the requested quantity from the
    /// salesperson's distributor batches, create the fulfillment batch, and
    /// notify the requesting manager. All mutations land in one transaction.
    pub async fn accept_order(
        &self,
        order_id: Uuid,
        input: AcceptOrderInput,
    ) -> AppResult<AcceptOutcome> {
        if input.fulfilled_quantity <= 0 {
            return Err(AppError::Validation {
                field: "fulfilled_quantity".to_string(),
                message: "Fulfilled quantity must be positive".to_string(),
                message_es: "La cantidad enviada debe ser positiva".to_string(),
            });
        }

        let mut tx = self.db.begin().await?;

        let order = fetch_order_for_update(&mut tx, order_id).await?;

        match order.status {
            OrderStatus::Pending => {}
            OrderStatus::Accepted => {
                return Ok(AcceptOutcome::Refused {
                    message: "El pedido ya fue aceptado".to_string(),
                });
            }
            OrderStatus::Rejected => {
                return Ok(AcceptOutcome::Refused {
                    message: "El pedido ya fue rechazado".to_string(),
                });
            }
            OrderStatus::Received | OrderStatus::Cancelled => {
                return Ok(AcceptOutcome::Refused {
                    message: "El pedido ya fue procesado".to_string(),
                });
            }
        }

        let distributor_inventory = sqlx::query_as::<_, Inventory>(
            r#"
            SELECT id, kind, store_id, salesperson_id
            FROM inventories
            WHERE salesperson_id = $1 AND kind = 'distributor'
            "#,
        )
        .bind(order.salesperson_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Distributor inventory".to_string()))?;

        let (product_title, distributor_product_id) =
            sqlx::query_as::<_, (String, Option<Uuid>)>(
                "SELECT title, distributor_product_id FROM products WHERE id = $1",
            )
            .bind(order.product_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        let distributor_product_id = distributor_product_id.ok_or_else(|| AppError::Validation {
            field: "product_id".to_string(),
            message: "Product is not linked to a distributor catalog product".to_string(),
            message_es: "El producto no está vinculado a un producto del distribuidor".to_string(),
        })?;

        // Candidate batches, oldest-created first, locked for the remainder
        // of the transaction so concurrent accepts cannot double-spend.
        let candidates = sqlx::query_as::<_, (Uuid, i32)>(
            r#"
            SELECT id, quantity
            FROM batches
            WHERE inventory_id = $1 AND product_id = $2 AND expired = false AND quantity > 0
            ORDER BY created_at
            FOR UPDATE
            "#,
        )
        .bind(distributor_inventory.id)
        .bind(distributor_product_id)
        .fetch_all(&mut *tx)
        .await?;

        let plan = match plan_deductions(&candidates, order.quantity) {
            Ok(plan) => plan,
            Err(insufficient) => {
                return Ok(AcceptOutcome::InsufficientStock {
                    available: insufficient.available,
                    required: insufficient.required,
                });
            }
        };

        for deduction in &plan.deductions {
            let result = sqlx::query(
                "UPDATE batches SET quantity = quantity - $1 WHERE id = $2 AND quantity >= $1",
            )
            .bind(deduction.amount)
            .bind(deduction.batch_id)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() != 1 {
                return Err(AppError::Conflict {
                    resource: "batches".to_string(),
                    message: "Stock changed while allocating; please retry".to_string(),
                    message_es: "El stock cambió durante la asignación; intente de nuevo"
                        .to_string(),
                });
            }
        }

        let now = Utc::now();
        let code = generate_batch_code(order.id, now.date_naive());
        let purchase_price = unit_purchase_price(order.price, order.quantity);

        let batch = sqlx::query_as::<_, Batch>(&format!(
            r#"
            INSERT INTO batches (code, quantity, expiration_date, expired, location, purchase_price, product_id, inventory_id)
            VALUES ($1, $2, $3, false, $4, $5, $6, $7)
            RETURNING {BATCH_COLUMNS}
            "#,
        ))
        .bind(&code)
        .bind(input.fulfilled_quantity)
        .bind(input.expiration_date)
        .bind(&input.location)
        .bind(purchase_price)
        .bind(order.product_id)
        .bind(distributor_inventory.id)
        .fetch_one(&mut *tx)
        .await?;

        let order = sqlx::query_as::<_, Order>(&format!(
            r#"
            UPDATE orders
            SET status = 'accepted', sent_batch_id = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING {ORDER_COLUMNS}
            "#,
        ))
        .bind(batch.id)
        .bind(order.id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO product_updates (product_id, kind, message) VALUES ($1, $2, $3)",
        )
        .bind(order.product_id)
        .bind(ProductUpdateKind::Sale)
        .bind(format!(
            "Pedido aceptado: {} unidades de {}",
            order.quantity, product_title
        ))
        .execute(&mut *tx)
        .await?;

        insert_notification(
            &mut *tx,
            NewNotification {
                recipient_id: order.inventory_manager_id,
                title: "Pedido aceptado",
                message: format!(
                    "Su pedido de {} unidades de {} fue aceptado",
                    order.quantity, product_title
                ),
                kind: NotificationKind::OrderAccepted,
                order_id: Some(order.id),
            },
        )
        .await?;

        tx.commit().await?;

        Ok(AcceptOutcome::Accepted { order, batch })
    }

    /// Reject a pending order and notify the requesting manager.
    /// No stock moves on reject: pending orders hold no reservation.
    pub async fn reject_order(&self, order_id: Uuid) -> AppResult<RejectOutcome> {
        let mut tx = self.db.begin().await?;

        let order = fetch_order_for_update(&mut tx, order_id).await?;

        match order.status {
            OrderStatus::Pending => {}
            OrderStatus::Rejected => {
                return Ok(RejectOutcome::Refused {
                    message: "El pedido ya fue rechazado".to_string(),
                });
            }
            OrderStatus::Accepted | OrderStatus::Received => {
                return Ok(RejectOutcome::Refused {
                    message: "No se puede rechazar un pedido aceptado".to_string(),
                });
            }
            OrderStatus::Cancelled => {
                return Ok(RejectOutcome::Refused {
                    message: "No se puede rechazar un pedido cancelado".to_string(),
                });
            }
        }

        let order = sqlx::query_as::<_, Order>(&format!(
            r#"
            UPDATE orders
            SET status = 'rejected', updated_at = NOW()
            WHERE id = $1
            RETURNING {ORDER_COLUMNS}
            "#,
        ))
        .bind(order.id)
        .fetch_one(&mut *tx)
        .await?;

        insert_notification(
            &mut *tx,
            NewNotification {
                recipient_id: order.inventory_manager_id,
                title: "Pedido rechazado",
                message: format!("Su pedido de {} unidades fue rechazado", order.quantity),
                kind: NotificationKind::OrderRejected,
                order_id: Some(order.id),
            },
        )
        .await?;

        tx.commit().await?;

        Ok(RejectOutcome::Rejected { order })
    }

    /// Mark an accepted order received: the sent batch is relocated into the
    /// manager's store inventory (quantity untouched) and the salesperson is
    /// notified.
    pub async fn mark_received(
        &self,
        order_id: Uuid,
        input: ReceiveOrderInput,
    ) -> AppResult<(Order, Batch)> {
        let mut tx = self.db.begin().await?;

        let order = fetch_order_for_update(&mut tx, order_id).await?;

        if order.status != OrderStatus::Accepted {
            return Err(AppError::Validation {
                field: "status".to_string(),
                message: "Only accepted orders can be received".to_string(),
                message_es: "Solo pedidos aceptados pueden ser recibidos".to_string(),
            });
        }

        let sent_batch_id = order
            .sent_batch_id
            .ok_or_else(|| AppError::NotFound("Sent batch".to_string()))?;

        sqlx::query_scalar::<_, Uuid>("SELECT id FROM batches WHERE id = $1 FOR UPDATE")
            .bind(sent_batch_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Sent batch".to_string()))?;

        let manager = sqlx::query_as::<_, InventoryManager>(
            "SELECT id, name, store_id FROM inventory_managers WHERE id = $1",
        )
        .bind(order.inventory_manager_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Inventory manager".to_string()))?;

        let store_inventory = sqlx::query_as::<_, Inventory>(
            r#"
            SELECT id, kind, store_id, salesperson_id
            FROM inventories
            WHERE store_id = $1 AND kind = 'store'
            "#,
        )
        .bind(manager.store_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Store inventory".to_string()))?;

        let batch = sqlx::query_as::<_, Batch>(&format!(
            r#"
            UPDATE batches
            SET inventory_id = $1, location = $2
            WHERE id = $3
            RETURNING {BATCH_COLUMNS}
            "#,
        ))
        .bind(store_inventory.id)
        .bind(&input.location)
        .bind(sent_batch_id)
        .fetch_one(&mut *tx)
        .await?;

        let order = sqlx::query_as::<_, Order>(&format!(
            r#"
            UPDATE orders
            SET status = 'received', updated_at = NOW()
            WHERE id = $1
            RETURNING {ORDER_COLUMNS}
            "#,
        ))
        .bind(order.id)
        .fetch_one(&mut *tx)
        .await?;

        insert_notification(
            &mut *tx,
            NewNotification {
                recipient_id: order.salesperson_id,
                title: "Pedido recibido",
                message: format!(
                    "El pedido de {} unidades fue recibido por la tienda",
                    order.quantity
                ),
                kind: NotificationKind::OrderReceived,
                order_id: Some(order.id),
            },
        )
        .await?;

        tx.commit().await?;

        Ok((order, batch))
    }

    /// Get an order by id
    pub async fn get_order(&self, order_id: Uuid) -> AppResult<Order> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1",
        ))
        .bind(order_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Order".to_string()))?;

        Ok(order)
    }

    /// List orders placed by an inventory manager, most recent first
    pub async fn list_for_manager(&self, inventory_manager_id: Uuid) -> AppResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM orders
            WHERE inventory_manager_id = $1
            ORDER BY created_at DESC
            "#,
        ))
        .bind(inventory_manager_id)
        .fetch_all(&self.db)
        .await?;

        Ok(orders)
    }

    /// List orders assigned to a salesperson, most recent first
    pub async fn list_for_salesperson(&self, salesperson_id: Uuid) -> AppResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM orders
            WHERE salesperson_id = $1
            ORDER BY created_at DESC
            "#,
        ))
        .bind(salesperson_id)
        .fetch_all(&self.db)
        .await?;

        Ok(orders)
    }
}

/// Fetch an order inside a transaction with a row lock, so concurrent
/// transitions on the same order serialize.
async fn fetch_order_for_update(
    tx: &mut Transaction<'_, Postgres>,
    order_id: Uuid,
) -> AppResult<Order> {
    let order = sqlx::query_as::<_, Order>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 FOR UPDATE",
    ))
    .bind(order_id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or_else(|| AppError::NotFound("Order".to_string()))?;

    Ok(order)
}
