use axum::http::StatusCode;
use core_model::filter::{FilterSpec, FilterSpecError};
use core_model::geo::GeoBounds;
use core_model::time::parse_datetime_input;
use core_model::Severity;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;

/// Query-string form of a filter spec. Facets are comma-separated.
#[derive(Debug, Default, Deserialize)]
pub struct EventsQuery {
    pub start: Option<String>,
    pub end: Option<String>,
    pub actors: Option<String>,
    pub divisions: Option<String>,
    pub districts: Option<String>,
    pub severities: Option<String>,
    #[serde(default)]
    pub verified_only: bool,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct BoundsQuery {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundsQuery {
    pub fn into_bounds(self) -> Result<GeoBounds, AppError> {
        let bounds = GeoBounds {
            north: self.north,
            south: self.south,
            east: self.east,
            west: self.west,
        };
        if !bounds.is_valid() {
            return Err(AppError::from(anyhow::anyhow!(
                "bounds must be finite with north >= south and east >= west"
            )));
        }
        Ok(bounds)
    }
}

pub(crate) fn build_filter_spec(query: &EventsQuery) -> Result<FilterSpec, AppError> {
    let start = parse_date_param("start", query.start.as_deref())?;
    let end = parse_date_param("end", query.end.as_deref())?;
    let severities = parse_severities(query.severities.as_deref())?;
    let spec = FilterSpec::default()
        .with_date_range(start, end)
        .with_actors(parse_csv(query.actors.as_deref()))
        .with_divisions(parse_csv(query.divisions.as_deref()))
        .with_districts(parse_csv(query.districts.as_deref()))
        .with_severities(severities)
        .with_verified_only(query.verified_only);
    spec.validate()?;
    Ok(spec)
}

fn parse_date_param(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<chrono::DateTime<chrono::Utc>>, FilterSpecError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_datetime_input(value)
            .map(Some)
            .map_err(|_| FilterSpecError::InvalidDate {
                field,
                value: value.to_string(),
            }),
    }
}

pub(crate) fn parse_csv(raw: Option<&str>) -> Vec<String> {
    raw.map(|csv| {
        csv.split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

pub(crate) fn parse_severities(raw: Option<&str>) -> Result<Vec<Severity>, AppError> {
    parse_csv(raw)
        .iter()
        .map(|token| token.parse::<Severity>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(AppError::from)
}

/// Serializes while the caller still holds whatever the value borrows from.
pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<Value, AppError> {
    serde_json::to_value(value)
        .map_err(|err| AppError::new(StatusCode::INTERNAL_SERVER_ERROR, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_drops_blank_tokens() {
        assert_eq!(parse_csv(Some(" A, ,B ,")), vec!["A", "B"]);
        assert!(parse_csv(None).is_empty());
    }

    #[test]
    fn query_builds_full_spec() {
        let query = EventsQuery {
            start: Some("2024-08-01".into()),
            end: Some("2024-08-31".into()),
            actors: Some("Party X,Party Y".into()),
            severities: Some("high,low".into()),
            verified_only: true,
            ..EventsQuery::default()
        };
        let spec = build_filter_spec(&query).unwrap();
        assert_eq!(spec.actors.len(), 2);
        assert!(spec.severities.contains(&Severity::High));
        assert!(spec.severities.contains(&Severity::Low));
        assert!(spec.verified_only);
        assert_eq!(spec.active_facet_count(), 6);
    }

    #[test]
    fn bad_date_is_a_client_error() {
        let query = EventsQuery {
            start: Some("yesterday".into()),
            ..EventsQuery::default()
        };
        let err = build_filter_spec(&query).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let query = EventsQuery {
            start: Some("2024-09-01".into()),
            end: Some("2024-08-01".into()),
            ..EventsQuery::default()
        };
        assert!(build_filter_spec(&query).is_err());
    }

    #[test]
    fn unknown_severity_is_rejected() {
        assert!(parse_severities(Some("critical")).is_err());
    }

    #[test]
    fn severity_names_are_lowercase_only() {
        assert_eq!(
            parse_severities(Some("low, high")).unwrap(),
            vec![Severity::Low, Severity::High]
        );
        let err = parse_severities(Some("High")).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let query = BoundsQuery {
            north: 20.0,
            south: 25.0,
            east: 92.0,
            west: 88.0,
        };
        assert!(query.into_bounds().is_err());
    }
}
