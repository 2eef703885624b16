use axum::extract::{Path, Query, State};
use axum::Json;
use core_model::incident::{IncidentRecord, RecordId};
use core_model::Severity;
use core_view::{apply, Statistics};
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::{build_filter_spec, to_json, BoundsQuery, EventsQuery};

pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<Vec<IncidentRecord>>, AppError> {
    let spec = build_filter_spec(&query)?;
    let dataset = state.dataset().await?;
    let mut events: Vec<IncidentRecord> = apply(dataset.records(), &spec)
        .into_iter()
        .cloned()
        .collect();
    if let Some(limit) = query.limit {
        events.truncate(limit);
    }
    Ok(Json(events))
}

pub async fn events_in_bounds(
    State(state): State<AppState>,
    Query(query): Query<BoundsQuery>,
) -> Result<Json<Vec<IncidentRecord>>, AppError> {
    let bounds = query.into_bounds()?;
    let dataset = state.dataset().await?;
    let events = dataset.in_bounds(&bounds).into_iter().cloned().collect();
    Ok(Json(events))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<IncidentRecord>, AppError> {
    let dataset = state.dataset().await?;
    dataset
        .get(&RecordId::new(id.clone()))
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("no incident with id `{}`", id)))
}

pub async fn list_facets(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let dataset = state.dataset().await?;
    let severities: Vec<Value> = Severity::ALL
        .iter()
        .map(|severity| {
            json!({
                "value": severity,
                "label": dataset.metadata().severity_label(*severity),
            })
        })
        .collect();
    Ok(Json(json!({
        "actors": dataset.distinct_actors(),
        "districts": dataset.distinct_districts(),
        "divisions": &state.region.divisions,
        "severities": severities,
    })))
}

pub async fn fetch_stats(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let dataset = state.dataset().await?;
    let stats = Statistics::compute(dataset.records());
    Ok(Json(to_json(&stats)?))
}
