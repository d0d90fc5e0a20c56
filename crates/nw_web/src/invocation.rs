//! Request/response boundary around [`PublishManager::publish_articles`].
//!
//! Every outcome, failures included, becomes an [`InvocationResponse`]; nothing
//! escapes as an `Err`.

use nw_core::PublishManager;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationRequest {
    #[serde(default)]
    pub search_term: Option<String>,
    #[serde(default)]
    pub date_from: Option<String>,
    #[serde(default)]
    pub broker_reference: Option<String>,
}

/// Status code plus a JSON text body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl InvocationResponse {
    pub fn new(status_code: u16, body: &Value) -> Self {
        Self {
            status_code,
            body: body.to_string(),
        }
    }

    pub fn error(status_code: u16, message: impl AsRef<str>) -> Self {
        Self::new(status_code, &json!({ "error": message.as_ref() }))
    }

    /// The body parsed back into JSON.
    pub fn body_json(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }
}

fn required(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

pub async fn handle_invocation(manager: &PublishManager, request: InvocationRequest) -> InvocationResponse {
    let Some(search_term) = required(&request.search_term) else {
        return InvocationResponse::error(400, "search_term is required");
    };
    let Some(broker_reference) = required(&request.broker_reference) else {
        return InvocationResponse::error(400, "broker_reference is required");
    };

    info!("Invocation for '{}' to {}", search_term, broker_reference);

    match manager
        .publish_articles(search_term, broker_reference, request.date_from.as_deref())
        .await
    {
        Ok(result) => match serde_json::to_value(&result) {
            Ok(body) => InvocationResponse::new(200, &body),
            Err(e) => {
                error!("Unexpected error: {}", e);
                InvocationResponse::error(500, format!("An unexpected error occurred: {}", e))
            }
        },
        Err(e) if e.is_validation() => {
            error!("Validation error: {}", e);
            InvocationResponse::error(400, e.to_string())
        }
        Err(e) => {
            error!("Unexpected error: {}", e);
            InvocationResponse::error(500, format!("An unexpected error occurred: {}", e))
        }
    }
}

/// Decodes a raw JSON event, then runs [`handle_invocation`].
pub async fn handle_event(manager: &PublishManager, event: Value) -> InvocationResponse {
    if !event.is_object() {
        return InvocationResponse::error(400, "event must be a JSON object");
    }
    match serde_json::from_value::<InvocationRequest>(event) {
        Ok(request) => handle_invocation(manager, request).await,
        Err(e) => {
            error!("Validation error: {}", e);
            InvocationResponse::error(400, format!("Invalid event: {}", e))
        }
    }
}
