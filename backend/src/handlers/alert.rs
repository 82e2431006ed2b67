//! HTTP handlers for stock alert endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::Alert;
use crate::services::alert::{AlertService, EvaluationSummary, ResolveOutcome};
use crate::AppState;

#[derive(Serialize)]
pub struct EvaluateResponse {
    pub message: String,
    pub created: i32,
    pub resolved: i32,
}

#[derive(Serialize)]
pub struct ResolveResponse {
    pub success: bool,
    pub message: String,
}

fn evaluate_response(summary: EvaluationSummary) -> Json<EvaluateResponse> {
    Json(EvaluateResponse {
        message: "Evaluación de alertas completada".to_string(),
        created: summary.created,
        resolved: summary.resolved,
    })
}

/// Evaluate alerts across every store
pub async fn evaluate_alerts(State(state): State<AppState>) -> AppResult<Json<EvaluateResponse>> {
    let service = AlertService::new(state.db);
    let summary = service.evaluate_all().await?;
    Ok(evaluate_response(summary))
}

/// Evaluate alerts for one store
pub async fn evaluate_store_alerts(
    State(state): State<AppState>,
    Path(store_id): Path<Uuid>,
) -> AppResult<Json<EvaluateResponse>> {
    let service = AlertService::new(state.db);
    let summary = service.evaluate_store(store_id).await?;
    Ok(evaluate_response(summary))
}

/// Manually resolve an alert; refused while stock is still low
pub async fn resolve_alert(
    State(state): State<AppState>,
    Path(alert_id): Path<Uuid>,
) -> AppResult<Json<ResolveResponse>> {
    let service = AlertService::new(state.db);

    let response = match service.resolve_alert(alert_id).await? {
        ResolveOutcome::Resolved => ResolveResponse {
            success: true,
            message: "Alerta resuelta".to_string(),
        },
        ResolveOutcome::StillLow { message } => ResolveResponse {
            success: false,
            message,
        },
    };

    Ok(Json(response))
}

/// List a store's unresolved alerts
pub async fn list_store_alerts(
    State(state): State<AppState>,
    Path(store_id): Path<Uuid>,
) -> AppResult<Json<Vec<Alert>>> {
    let service = AlertService::new(state.db);
    let alerts = service.list_unresolved(store_id).await?;
    Ok(Json(alerts))
}
