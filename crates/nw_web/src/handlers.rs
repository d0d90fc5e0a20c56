use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::error;

use crate::invocation::{handle_event, InvocationResponse};
use crate::AppState;

/// Runs one invocation; the HTTP status and body mirror the invocation response.
pub async fn invoke(
    State(state): State<Arc<AppState>>,
    event: Result<Json<Value>, JsonRejection>,
) -> impl IntoResponse {
    let response = match event {
        Ok(Json(event)) => handle_event(&state.manager, event).await,
        Err(rejection) => {
            error!("Validation error: {}", rejection.body_text());
            InvocationResponse::error(400, format!("Invalid event: {}", rejection.body_text()))
        }
    };
    let status = StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, "application/json")], response.body)
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
