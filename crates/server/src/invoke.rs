use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use switchboard_agent::{ActionHandler, ActionRequest, ActionResponse};

/// Runtime-facing invocation endpoint. Always answers 200 with a response
/// envelope; the envelope's own status code carries the operation outcome,
/// because the calling runtime expects a structured result for every
/// invocation rather than a transport-level failure.
pub fn router(handler: Arc<ActionHandler>) -> Router {
    Router::new().route("/invoke", post(invoke)).with_state(handler)
}

pub async fn invoke(
    State(handler): State<Arc<ActionHandler>>,
    Json(request): Json<ActionRequest>,
) -> Json<ActionResponse> {
    Json(handler.handle(request).await)
}
