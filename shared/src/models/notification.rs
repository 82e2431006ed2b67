//! Notification model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Unread listings are capped at the most recent entries
pub const UNREAD_LIST_CAP: i64 = 20;

/// A durable notification addressed to a recipient.
///
/// `order_id` is always set for order-related kinds so the consuming UI can
/// build `/orders/{id}/process` style destinations from `kind`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub order_id: Option<Uuid>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Notification kinds emitted by order transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    OrderCreated,
    OrderAccepted,
    OrderRejected,
    OrderReceived,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::OrderCreated => "order_created",
            NotificationKind::OrderAccepted => "order_accepted",
            NotificationKind::OrderRejected => "order_rejected",
            NotificationKind::OrderReceived => "order_received",
        }
    }
}
