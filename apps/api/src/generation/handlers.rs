//! Axum route handler for the generation proxy.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::generation::request::{GenerationRequest, RequestParseError};
use crate::generation::service::GenerationOutput;
use crate::state::AppState;

/// POST /api/generate
///
/// Forwards one `{action, payload}` request to the configured backend.
/// Text actions answer `{result}`; GENERATE_DESIGN answers the bare `DesignConfig`.
pub async fn handle_generate(
    State(state): State<AppState>,
    AppJson(body): AppJson<Value>,
) -> Result<Json<Value>, AppError> {
    let request = GenerationRequest::from_value(body).map_err(|e| match e {
        RequestParseError::UnknownAction => AppError::UnknownAction,
        RequestParseError::BadPayload(msg) => AppError::Validation(msg),
    })?;
    request.validate().map_err(AppError::from_proxy)?;

    tracing::info!(
        action = request.action(),
        backend = state.generator.backend(),
        "generation requested"
    );

    let output = state
        .generator
        .generate(&request)
        .await
        .map_err(AppError::from_proxy)?;

    let body = match output {
        GenerationOutput::Text(result) => json!({ "result": result }),
        GenerationOutput::Design(design) => serde_json::to_value(design)
            .map_err(|e| AppError::Internal(anyhow::Error::new(e)))?,
    };
    Ok(Json(body))
}
