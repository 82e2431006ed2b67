//! Route definitions for the Inventory & Order Management Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Order lifecycle
        .nest("/orders", order_routes())
        // Stock alerts
        .nest("/alerts", alert_routes())
        // Notifications
        .nest("/notifications", notification_routes())
        // Products
        .nest("/products", product_routes())
}

/// Order lifecycle routes
fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_orders).post(handlers::create_order))
        .route("/:order_id", get(handlers::get_order))
        .route("/:order_id/accept", post(handlers::accept_order))
        .route("/:order_id/reject", post(handlers::reject_order))
        .route("/:order_id/receive", post(handlers::receive_order))
}

/// Stock alert routes
fn alert_routes() -> Router<AppState> {
    Router::new()
        .route("/evaluate", post(handlers::evaluate_alerts))
        .route("/evaluate/:store_id", post(handlers::evaluate_store_alerts))
        .route("/:alert_id/resolve", post(handlers::resolve_alert))
        .route("/store/:store_id", get(handlers::list_store_alerts))
}

/// Notification routes
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/recipient/:recipient_id", get(handlers::list_notifications))
        .route(
            "/recipient/:recipient_id/unread-count",
            get(handlers::unread_count),
        )
        .route(
            "/recipient/:recipient_id/read-all",
            post(handlers::mark_all_notifications_read),
        )
        .route("/:notification_id/read", post(handlers::mark_notification_read))
}

/// Product routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/add-to-store", post(handlers::add_product_to_store))
        .route("/:product_id", get(handlers::get_product))
        .route(
            "/:product_id/updates",
            get(handlers::get_product_updates).post(handlers::apply_product_update),
        )
}
