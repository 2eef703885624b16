use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use core_model::filter::FilterSpec;
use core_model::incident::RecordId;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::to_json;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(fetch_view))
        .route("/filters", post(submit_filters))
        .route("/filters/reset", post(reset_filters))
        .route("/selection", post(select_record))
        .route("/markers", get(list_markers))
        .route("/resolve", get(resolve_viewport))
}

#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    #[serde(default)]
    pub id: Option<RecordId>,
}

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub width: u32,
    pub height: u32,
}

pub async fn fetch_view(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    state
        .with_session(|session| to_json(&session.snapshot()))
        .await
        .map(Json)
}

pub async fn submit_filters(
    State(state): State<AppState>,
    Json(spec): Json<FilterSpec>,
) -> Result<Json<Value>, AppError> {
    state
        .with_session(|session| {
            session.apply_filters(spec)?;
            info!(
                revision = session.revision(),
                visible = session.filtered_len(),
                "applied filter submission"
            );
            to_json(&session.snapshot())
        })
        .await
        .map(Json)
}

pub async fn reset_filters(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    state
        .with_session(|session| {
            session.reset_filters();
            to_json(&session.snapshot())
        })
        .await
        .map(Json)
}

pub async fn select_record(
    State(state): State<AppState>,
    Json(request): Json<SelectionRequest>,
) -> Result<Json<Value>, AppError> {
    state
        .with_session(|session| {
            session.select(request.id).map_err(AppError::selection)?;
            to_json(&session.snapshot())
        })
        .await
        .map(Json)
}

pub async fn list_markers(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let now = Utc::now();
    state
        .with_session(|session| to_json(&session.markers(now)))
        .await
        .map(Json)
}

/// Turns the current viewport request into a concrete centre and zoom for a
/// map of the given pixel size.
pub async fn resolve_viewport(
    State(state): State<AppState>,
    Query(query): Query<ResolveQuery>,
) -> Result<Json<Value>, AppError> {
    state
        .with_session(|session| {
            let resolved = session
                .viewport()
                .resolve(query.width, query.height, session.viewport_policy());
            Ok(json!({
                "viewport": to_json(&session.viewport())?,
                "resolved": to_json(&resolved)?,
            }))
        })
        .await
        .map(Json)
}
