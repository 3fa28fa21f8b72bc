//! Tool-call API for automated callers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use toolbox::{InvocationResponse, ToolDescriptor, ToolError, ToolInvocationRequest};
use tracing::warn;

use crate::state::AppState;

/// List registered tools with their parameter schemas.
pub async fn list_api(State(state): State<AppState>) -> Json<Vec<ToolDescriptor>> {
    Json(state.invoker.registry().descriptors())
}

/// Invoke `name` with the request body as its JSON arguments.
pub async fn invoke_api(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: String,
) -> (StatusCode, Json<InvocationResponse>) {
    let response = state.invoker.invoke_json(&name, &body).await;
    (status_for(&response), Json(response))
}

/// Invoke a tool described by a `{"tool_name": .., "arguments": {..}}` body.
pub async fn call_api(
    State(state): State<AppState>,
    body: String,
) -> (StatusCode, Json<InvocationResponse>) {
    let response = match serde_json::from_str::<ToolInvocationRequest>(&body) {
        Ok(request) => state.invoker.invoke(request).await,
        Err(err) => {
            warn!(error = %err, "Malformed tool call");
            InvocationResponse::failure("", &ToolError::from(err))
        }
    };
    (status_for(&response), Json(response))
}

/// Tool-level failures are still a successful call; only addressing and
/// argument problems get an error status.
fn status_for(response: &InvocationResponse) -> StatusCode {
    match response.error_kind() {
        Some("tool_not_found") => StatusCode::NOT_FOUND,
        Some("argument_schema_mismatch") => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::OK,
    }
}
