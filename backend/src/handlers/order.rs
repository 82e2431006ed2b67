//! HTTP handlers for order lifecycle endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Batch, Order};
use crate::services::order::{
    AcceptOrderInput, AcceptOutcome, CreateOrderInput, OrderService, ReceiveOrderInput,
    RejectOutcome,
};
use crate::AppState;

/// Soft refusal envelope: the request was well-formed but inapplicable in
/// the order's current state. The message is shown to the user verbatim.
#[derive(Serialize)]
pub struct RefusalResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
pub struct AcceptResponse {
    pub message: String,
    pub order: Order,
    pub batch: Batch,
}

#[derive(Serialize)]
pub struct RejectResponse {
    pub message: String,
    pub order: Order,
}

#[derive(Serialize)]
pub struct ReceiveResponse {
    pub success: bool,
    pub message: String,
    pub order: Order,
    pub batch: Batch,
}

fn refusal(message: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(RefusalResponse {
            success: false,
            message,
        }),
    )
        .into_response()
}

/// Create an order
pub async fn create_order(
    State(state): State<AppState>,
    Json(input): Json<CreateOrderInput>,
) -> AppResult<Json<Order>> {
    let service = OrderService::new(state.db);
    let order = service.create_order(input).await?;
    Ok(Json(order))
}

/// Accept a pending order
pub async fn accept_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(input): Json<AcceptOrderInput>,
) -> AppResult<Response> {
    let service = OrderService::new(state.db);

    let response = match service.accept_order(order_id, input).await? {
        AcceptOutcome::Accepted { order, batch } => Json(AcceptResponse {
            message: "Pedido aceptado".to_string(),
            order,
            batch,
        })
        .into_response(),
        AcceptOutcome::Refused { message } => refusal(message),
        AcceptOutcome::InsufficientStock {
            available,
            required,
        } => refusal(format!(
            "Stock insuficiente. Disponible: {}, requerido: {}",
            available, required
        )),
    };

    Ok(response)
}

/// Reject a pending order
pub async fn reject_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Response> {
    let service = OrderService::new(state.db);

    let response = match service.reject_order(order_id).await? {
        RejectOutcome::Rejected { order } => Json(RejectResponse {
            message: "Pedido rechazado".to_string(),
            order,
        })
        .into_response(),
        RejectOutcome::Refused { message } => refusal(message),
    };

    Ok(response)
}

/// Mark an accepted order received
pub async fn receive_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(input): Json<ReceiveOrderInput>,
) -> AppResult<Json<ReceiveResponse>> {
    let service = OrderService::new(state.db);
    let (order, batch) = service.mark_received(order_id, input).await?;

    Ok(Json(ReceiveResponse {
        success: true,
        message: "Pedido recibido".to_string(),
        order,
        batch,
    }))
}

/// Get an order by id
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<Order>> {
    let service = OrderService::new(state.db);
    let order = service.get_order(order_id).await?;
    Ok(Json(order))
}

/// Query parameters for listing orders
#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    pub inventory_manager_id: Option<Uuid>,
    pub salesperson_id: Option<Uuid>,
}

/// List orders for one side of the exchange
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<ListOrdersQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let service = OrderService::new(state.db);

    let orders = match (query.inventory_manager_id, query.salesperson_id) {
        (Some(manager_id), _) => service.list_for_manager(manager_id).await?,
        (None, Some(salesperson_id)) => service.list_for_salesperson(salesperson_id).await?,
        (None, None) => {
            return Err(AppError::ValidationError(
                "inventory_manager_id or salesperson_id is required".to_string(),
            ));
        }
    };

    Ok(Json(orders))
}
