//! Notification service
//!
//! Order transitions append notifications inside their own transactions via
//! [`insert_notification`]; the service covers the read side (unread
//! listing, counts, mark-read).

use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use shared::{Notification, NotificationKind, UNREAD_LIST_CAP};

use crate::error::{AppError, AppResult};

const NOTIFICATION_COLUMNS: &str =
    "id, recipient_id, title, message, kind, order_id, read, created_at";

/// A notification to append. `order_id` must be set for order-related kinds
/// so the consuming UI can build the destination URL.
#[derive(Debug)]
pub struct NewNotification<'a> {
    pub recipient_id: Uuid,
    pub title: &'a str,
    pub message: String,
    pub kind: NotificationKind,
    pub order_id: Option<Uuid>,
}

/// Append a notification. Executor-generic so callers can write through the
/// pool or inside an open transaction.
pub async fn insert_notification<'e, E>(
    executor: E,
    input: NewNotification<'_>,
) -> Result<Notification, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Notification>(&format!(
        r#"
        INSERT INTO notifications (recipient_id, title, message, kind, order_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {NOTIFICATION_COLUMNS}
        "#,
    ))
    .bind(input.recipient_id)
    .bind(input.title)
    .bind(&input.message)
    .bind(input.kind)
    .bind(input.order_id)
    .fetch_one(executor)
    .await
}

/// Notification service for the read side
#[derive(Clone)]
pub struct NotificationService {
    db: PgPool,
}

impl NotificationService {
    /// Create a new NotificationService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List a recipient's unread notifications, most recent first, capped
    pub async fn list_unread(&self, recipient_id: Uuid) -> AppResult<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(&format!(
            r#"
            SELECT {NOTIFICATION_COLUMNS}
            FROM notifications
            WHERE recipient_id = $1 AND read = false
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        ))
        .bind(recipient_id)
        .bind(UNREAD_LIST_CAP)
        .fetch_all(&self.db)
        .await?;

        Ok(notifications)
    }

    /// Count a recipient's unread notifications
    pub async fn unread_count(&self, recipient_id: Uuid) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE recipient_id = $1 AND read = false",
        )
        .bind(recipient_id)
        .fetch_one(&self.db)
        .await?;

        Ok(count)
    }

    /// Mark a notification read. Re-marking is a no-op by nature.
    pub async fn mark_read(&self, notification_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("UPDATE notifications SET read = true WHERE id = $1")
            .bind(notification_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Notification".to_string()));
        }

        Ok(())
    }

    /// Mark all of a recipient's notifications read; returns how many changed
    pub async fn mark_all_read(&self, recipient_id: Uuid) -> AppResult<i64> {
        let result = sqlx::query(
            "UPDATE notifications SET read = true WHERE recipient_id = $1 AND read = false",
        )
        .bind(recipient_id)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() as i64)
    }
}
