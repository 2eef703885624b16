use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::{AppState, DatasetSlot};
use crate::utils::to_json;

/// Answers even when the dataset failed to load, so the client can show why.
pub async fn fetch_meta(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let slot = state.slot.lock().await;
    let dataset = match &*slot {
        DatasetSlot::Ready(session) => json!({
            "status": "ready",
            "metadata": to_json(session.dataset().metadata())?,
            "report": to_json(session.dataset().report())?,
        }),
        DatasetSlot::Failed(reason) => json!({
            "status": "failed",
            "error": reason,
            "retryable": true,
        }),
    };
    Ok(Json(json!({
        "server": to_json(state.meta.as_ref())?,
        "region": to_json(state.region.as_ref())?,
        "maxBounds": to_json(&state.region.max_bounds())?,
        "dataset": dataset,
    })))
}

pub async fn load_dataset(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let dataset = state.ensure_loaded().await?;
    Ok(Json(json!({
        "metadata": to_json(dataset.metadata())?,
        "report": to_json(dataset.report())?,
    })))
}
