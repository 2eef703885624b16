use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;
use crate::Severity;

/// Dataset-unique identifier of an incident record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    pub address: String,
    pub division: String,
    pub district: String,
}

impl Location {
    pub fn point(&self) -> GeoPoint {
        GeoPoint {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Casualties {
    pub injured: u32,
    pub dead: u32,
}

impl Casualties {
    pub fn total(&self) -> u64 {
        u64::from(self.injured) + u64::from(self.dead)
    }
}

/// A validated incident. Only the dataset store constructs these, so every
/// instance has a parsed timestamp, a known severity and non-negative counts.
///
/// Serializes with the same field names the dataset document uses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentRecord {
    pub id: RecordId,
    pub title: String,
    pub summary: String,
    pub location: Location,
    pub casualties: Casualties,
    #[serde(rename = "politicalParty")]
    pub actor_primary: String,
    /// Empty when there is no opposing actor.
    #[serde(rename = "opposingParty")]
    pub actor_secondary: String,
    #[serde(rename = "date")]
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    #[serde(rename = "imageUrl")]
    pub image_ref: Option<String>,
    pub source: String,
    pub verified: bool,
}

impl IncidentRecord {
    /// Non-blank actor names involved in the incident, primary first.
    pub fn actors(&self) -> impl Iterator<Item = &str> {
        [self.actor_primary.as_str(), self.actor_secondary.as_str()]
            .into_iter()
            .filter(|name| !name.trim().is_empty())
    }
}
