use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use core_model::incident::{Casualties, IncidentRecord, Location, RecordId};
use core_model::metadata::DatasetMetadata;
use core_model::Severity;
use serde::Deserialize;
use serde_json::Value;

use crate::error::RecordParseError;

/// Top-level dataset document. Records stay as raw JSON here so a single bad
/// record cannot fail the whole document.
#[derive(Debug, Deserialize)]
pub(crate) struct WireDocument {
    pub events: Vec<Value>,
    #[serde(default)]
    pub metadata: DatasetMetadata,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireIncident {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    summary: String,
    location: WireLocation,
    #[serde(default)]
    casualties: WireCasualties,
    #[serde(default)]
    political_party: String,
    #[serde(default)]
    opposing_party: String,
    date: String,
    severity: String,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    source: String,
    #[serde(default)]
    verified: bool,
}

#[derive(Debug, Deserialize)]
struct WireLocation {
    lat: f64,
    lng: f64,
    #[serde(default)]
    address: String,
    #[serde(default)]
    division: String,
    #[serde(default)]
    district: String,
}

#[derive(Debug, Default, Deserialize)]
struct WireCasualties {
    #[serde(default)]
    injured: i64,
    #[serde(default)]
    dead: i64,
}

/// Validates one raw record. Uniqueness of ids is checked by the caller.
pub(crate) fn parse_record(raw: Value) -> Result<IncidentRecord, RecordParseError> {
    let wire: WireIncident =
        serde_json::from_value(raw).map_err(|err| RecordParseError::Malformed {
            reason: err.to_string(),
        })?;

    let id = wire.id.trim().to_string();
    if id.is_empty() {
        return Err(RecordParseError::MissingId);
    }

    let timestamp =
        parse_timestamp(&wire.date).ok_or_else(|| RecordParseError::InvalidTimestamp {
            id: id.clone(),
            raw: wire.date.clone(),
        })?;

    let severity: Severity = wire
        .severity
        .parse()
        .map_err(|_| RecordParseError::InvalidSeverity {
            id: id.clone(),
            raw: wire.severity.clone(),
        })?;

    let (injured, dead) = match (
        u32::try_from(wire.casualties.injured),
        u32::try_from(wire.casualties.dead),
    ) {
        (Ok(injured), Ok(dead)) => (injured, dead),
        _ => return Err(RecordParseError::NegativeCasualties { id }),
    };

    let WireLocation {
        lat,
        lng,
        address,
        division,
        district,
    } = wire.location;
    if !valid_coordinates(lat, lng) {
        return Err(RecordParseError::InvalidCoordinates {
            id,
            lat: lat.to_string(),
            lng: lng.to_string(),
        });
    }

    Ok(IncidentRecord {
        id: RecordId(id),
        title: wire.title,
        summary: wire.summary,
        location: Location {
            lat,
            lng,
            address,
            division: division.trim().to_string(),
            district: district.trim().to_string(),
        },
        casualties: Casualties { injured, dead },
        actor_primary: wire.political_party.trim().to_string(),
        actor_secondary: wire.opposing_party.trim().to_string(),
        timestamp,
        severity,
        image_ref: wire.image_url.filter(|url| !url.trim().is_empty()),
        source: wire.source,
        verified: wire.verified,
    })
}

/// Id of a raw record, if it has a usable one. Used for rejection reports.
pub(crate) fn raw_id(raw: &Value) -> Option<String> {
    raw.get("id")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn valid_coordinates(lat: f64, lng: f64) -> bool {
    lat.is_finite()
        && lng.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lng)
}
