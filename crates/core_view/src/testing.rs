use chrono::{TimeZone, Utc};
use core_model::incident::{Casualties, IncidentRecord, Location, RecordId};
use core_model::Severity;

pub(crate) fn record(
    id: &str,
    severity: Severity,
    primary: &str,
    secondary: &str,
) -> IncidentRecord {
    IncidentRecord {
        id: RecordId::from(id),
        title: format!("Incident {id}"),
        summary: String::new(),
        location: Location {
            lat: 23.8,
            lng: 90.4,
            address: String::new(),
            division: "Dhaka".into(),
            district: "Dhaka".into(),
        },
        casualties: Casualties { injured: 1, dead: 0 },
        actor_primary: primary.into(),
        actor_secondary: secondary.into(),
        timestamp: Utc.with_ymd_and_hms(2024, 8, 1, 12, 0, 0).unwrap(),
        severity,
        image_ref: None,
        source: "test".into(),
        verified: false,
    }
}

/// Three records: high (A vs B), medium (A alone), low (C vs B).
pub(crate) fn scenario() -> Vec<IncidentRecord> {
    vec![
        record("1", Severity::High, "A", "B"),
        record("2", Severity::Medium, "A", ""),
        record("3", Severity::Low, "C", "B"),
    ]
}

pub(crate) fn ids<'a>(records: impl IntoIterator<Item = &'a IncidentRecord>) -> Vec<&'a str> {
    records.into_iter().map(|r| r.id.as_str()).collect()
}
