//! HTTP handlers for notification endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::Notification;
use crate::services::notification::NotificationService;
use crate::AppState;

#[derive(Serialize)]
pub struct UnreadCountResponse {
    pub count: i64,
}

#[derive(Serialize)]
pub struct MarkReadResponse {
    pub success: bool,
}

#[derive(Serialize)]
pub struct MarkAllReadResponse {
    pub success: bool,
    pub updated: i64,
}

/// List a recipient's unread notifications, most recent first
pub async fn list_notifications(
    State(state): State<AppState>,
    Path(recipient_id): Path<Uuid>,
) -> AppResult<Json<Vec<Notification>>> {
    let service = NotificationService::new(state.db);
    let notifications = service.list_unread(recipient_id).await?;
    Ok(Json(notifications))
}

/// Count a recipient's unread notifications
pub async fn unread_count(
    State(state): State<AppState>,
    Path(recipient_id): Path<Uuid>,
) -> AppResult<Json<UnreadCountResponse>> {
    let service = NotificationService::new(state.db);
    let count = service.unread_count(recipient_id).await?;
    Ok(Json(UnreadCountResponse { count }))
}

/// Mark one notification read
pub async fn mark_notification_read(
    State(state): State<AppState>,
    Path(notification_id): Path<Uuid>,
) -> AppResult<Json<MarkReadResponse>> {
    let service = NotificationService::new(state.db);
    service.mark_read(notification_id).await?;
    Ok(Json(MarkReadResponse { success: true }))
}

/// Mark all of a recipient's notifications read
pub async fn mark_all_notifications_read(
    State(state): State<AppState>,
    Path(recipient_id): Path<Uuid>,
) -> AppResult<Json<MarkAllReadResponse>> {
    let service = NotificationService::new(state.db);
    let updated = service.mark_all_read(recipient_id).await?;
    Ok(Json(MarkAllReadResponse {
        success: true,
        updated,
    }))
}
