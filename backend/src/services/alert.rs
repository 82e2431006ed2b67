//! Alert reconciliation service
//!
//! Diffs each store product's non-expired stock against its minimum and
//! creates/resolves alerts to match. The pass is idempotent: re-running on
//! consistent state creates and resolves nothing.

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use shared::{is_low_stock, Alert, AlertKind, Store};

use crate::error::{AppError, AppResult};

const ALERT_COLUMNS: &str = "id, kind, product_id, store_id, message, resolved, created_at";

/// Alert service for stock reconciliation
#[derive(Clone)]
pub struct AlertService {
    db: PgPool,
}

/// Counts produced by an evaluation pass
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct EvaluationSummary {
    pub created: i32,
    pub resolved: i32,
}

/// Result of a manual resolve attempt
#[derive(Debug)]
pub enum ResolveOutcome {
    Resolved,
    /// Stock is still at or below the minimum; the alert stays open
    StillLow { message: String },
}

/// Product stock row for the evaluation pass
#[derive(Debug, sqlx::FromRow)]
struct StockRow {
    product_id: Uuid,
    title: String,
    minimum_stock: i32,
    store_id: Option<Uuid>,
    total_stock: i64,
}

impl AlertService {
    /// Create a new AlertService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Evaluate one store's products
    pub async fn evaluate_store(&self, store_id: Uuid) -> AppResult<EvaluationSummary> {
        let store = sqlx::query_as::<_, Store>("SELECT id, name FROM stores WHERE id = $1")
            .bind(store_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::Validation {
                field: "store_id".to_string(),
                message: "Invalid store id".to_string(),
                message_es: "Identificador de tienda no válido".to_string(),
            })?;

        tracing::debug!(store = %store.name, "evaluating store alerts");

        self.evaluate(Some(store.id)).await
    }

    /// Evaluate every store's products
    pub async fn evaluate_all(&self) -> AppResult<EvaluationSummary> {
        self.evaluate(None).await
    }

    async fn evaluate(&self, scope: Option<Uuid>) -> AppResult<EvaluationSummary> {
        let mut summary = EvaluationSummary::default();

        summary.created += self.sweep_expired_batches(scope).await?;

        let rows = sqlx::query_as::<_, StockRow>(
            r#"
            SELECT p.id AS product_id, p.title, p.minimum_stock, i.store_id,
                   COALESCE(SUM(b.quantity) FILTER (WHERE NOT b.expired), 0) AS total_stock
            FROM products p
            JOIN inventories i ON i.id = p.inventory_id
            LEFT JOIN batches b ON b.product_id = p.id AND b.inventory_id = i.id
            WHERE i.kind = 'store' AND ($1::uuid IS NULL OR i.store_id = $1)
            GROUP BY p.id, p.title, p.minimum_stock, i.store_id
            "#,
        )
        .bind(scope)
        .fetch_all(&self.db)
        .await?;

        for row in rows {
            let Some(store_id) = row.store_id else {
                continue;
            };

            if is_low_stock(row.total_stock, row.minimum_stock) {
                let created = self
                    .create_alert_if_absent(
                        AlertKind::LowStock,
                        row.product_id,
                        store_id,
                        format!(
                            "Stock bajo: {} ({} unidades restantes)",
                            row.title, row.total_stock
                        ),
                    )
                    .await?;
                if created {
                    summary.created += 1;
                }
            } else {
                let result = sqlx::query(
                    r#"
                    UPDATE alerts
                    SET resolved = true, message = 'Stock normalizado'
                    WHERE product_id = $1 AND store_id = $2 AND resolved = false
                    "#,
                )
                .bind(row.product_id)
                .bind(store_id)
                .execute(&self.db)
                .await?;
                summary.resolved += result.rows_affected() as i32;
            }
        }

        tracing::debug!(
            created = summary.created,
            resolved = summary.resolved,
            "alert evaluation pass completed"
        );

        Ok(summary)
    }

    /// Flag batches past their expiration date and raise an alert per
    /// affected store product. Returns the number of alerts created.
    async fn sweep_expired_batches(&self, scope: Option<Uuid>) -> AppResult<i32> {
        let expired = sqlx::query_as::<_, (Uuid, String, Option<Uuid>, String)>(
            r#"
            UPDATE batches b
            SET expired = true
            FROM inventories i, products p
            WHERE b.inventory_id = i.id AND b.product_id = p.id
              AND b.expired = false
              AND b.expiration_date IS NOT NULL
              AND b.expiration_date < CURRENT_DATE
              AND ($1::uuid IS NULL OR i.store_id = $1 OR i.kind = 'distributor')
            RETURNING b.product_id, b.code, i.store_id, p.title
            "#,
        )
        .bind(scope)
        .fetch_all(&self.db)
        .await?;

        let mut created = 0;
        for (product_id, code, store_id, title) in expired {
            // Distributor-held batches only lose eligibility for allocation;
            // alerts are a store-level signal.
            let Some(store_id) = store_id else {
                continue;
            };

            let was_created = self
                .create_alert_if_absent(
                    AlertKind::ExpiredBatch,
                    product_id,
                    store_id,
                    format!("Lote {} de {} venció", code, title),
                )
                .await?;
            if was_created {
                created += 1;
            }
        }

        Ok(created)
    }

    /// Check-before-create: at most one unresolved alert per
    /// (product, store) pair, across kinds.
    async fn create_alert_if_absent(
        &self,
        kind: AlertKind,
        product_id: Uuid,
        store_id: Uuid,
        message: String,
    ) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM alerts
                WHERE product_id = $1 AND store_id = $2 AND resolved = false
            )
            "#,
        )
        .bind(product_id)
        .bind(store_id)
        .fetch_one(&self.db)
        .await?;

        if exists {
            return Ok(false);
        }

        sqlx::query("INSERT INTO alerts (kind, product_id, store_id, message) VALUES ($1, $2, $3, $4)")
            .bind(kind)
            .bind(product_id)
            .bind(store_id)
            .bind(&message)
            .execute(&self.db)
            .await?;

        Ok(true)
    }

    /// Manually resolve an alert. Refused while the product's stock is still
    /// at or below its minimum, so a real shortage cannot be hidden.
    pub async fn resolve_alert(&self, alert_id: Uuid) -> AppResult<ResolveOutcome> {
        let alert = sqlx::query_as::<_, Alert>(&format!(
            "SELECT {ALERT_COLUMNS} FROM alerts WHERE id = $1",
        ))
        .bind(alert_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Alert".to_string()))?;

        if alert.resolved {
            return Ok(ResolveOutcome::Resolved);
        }

        let (minimum_stock, total_stock) = sqlx::query_as::<_, (i32, i64)>(
            r#"
            SELECT p.minimum_stock,
                   COALESCE(SUM(b.quantity) FILTER (WHERE NOT b.expired), 0) AS total_stock
            FROM products p
            LEFT JOIN batches b ON b.product_id = p.id AND b.inventory_id = p.inventory_id
            WHERE p.id = $1
            GROUP BY p.minimum_stock
            "#,
        )
        .bind(alert.product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        if alert.kind == AlertKind::LowStock && is_low_stock(total_stock, minimum_stock) {
            return Ok(ResolveOutcome::StillLow {
                message: format!(
                    "El stock sigue por debajo del mínimo ({} de {})",
                    total_stock, minimum_stock
                ),
            });
        }

        sqlx::query("UPDATE alerts SET resolved = true WHERE id = $1")
            .bind(alert_id)
            .execute(&self.db)
            .await?;

        Ok(ResolveOutcome::Resolved)
    }

    /// List a store's unresolved alerts, most recent first
    pub async fn list_unresolved(&self, store_id: Uuid) -> AppResult<Vec<Alert>> {
        let alerts = sqlx::query_as::<_, Alert>(&format!(
            r#"
            SELECT {ALERT_COLUMNS}
            FROM alerts
            WHERE store_id = $1 AND resolved = false
            ORDER BY created_at DESC
            "#,
        ))
        .bind(store_id)
        .fetch_all(&self.db)
        .await?;

        Ok(alerts)
    }
}
