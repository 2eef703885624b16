//! Load-and-freeze store for the incident dataset.
//!
//! The document is read once, every record is validated, and the result is
//! frozen into a [`Dataset`] together with the facet lists the filter panel
//! needs. Those lists are derived from the full dataset and never change for
//! the lifetime of the value.

mod error;
mod source;
mod wire;

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use core_model::geo::GeoBounds;
use core_model::incident::{IncidentRecord, RecordId};
use core_model::metadata::DatasetMetadata;
use core_model::source::DatasetSource;
use serde::Serialize;
use tracing::{info, warn};

pub use error::{LoadError, RecordParseError};
pub use source::JsonFileSource;

/// What to do with a record that fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordPolicy {
    /// Skip the record, log it, and keep loading.
    #[default]
    Drop,
    /// Fail the whole load.
    Strict,
}

impl FromStr for RecordPolicy {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "drop" => Ok(RecordPolicy::Drop),
            "strict" => Ok(RecordPolicy::Strict),
            other => Err(anyhow!(
                "unknown record policy `{}` (expected drop or strict)",
                other
            )),
        }
    }
}

impl fmt::Display for RecordPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordPolicy::Drop => f.write_str("drop"),
            RecordPolicy::Strict => f.write_str("strict"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedRecord {
    /// Zero-based position in the document's `events` array.
    pub position: usize,
    pub id: Option<String>,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadReport {
    pub origin: String,
    pub policy: RecordPolicy,
    pub accepted: usize,
    pub rejected: Vec<RejectedRecord>,
}

/// The frozen record collection.
#[derive(Debug)]
pub struct Dataset {
    records: Vec<IncidentRecord>,
    positions: HashMap<RecordId, usize>,
    actors: Vec<String>,
    districts: Vec<String>,
    metadata: DatasetMetadata,
    report: LoadReport,
}

impl Dataset {
    /// Read and parse the document behind `source`.
    pub fn load(source: &dyn DatasetSource, policy: RecordPolicy) -> Result<Self, LoadError> {
        let origin = source.describe();
        let bytes = source.read_document().map_err(|err| LoadError::Read {
            origin: origin.clone(),
            reason: format!("{:#}", err),
        })?;
        Self::from_slice(&bytes, &origin, policy)
    }

    pub fn from_slice(bytes: &[u8], origin: &str, policy: RecordPolicy) -> Result<Self, LoadError> {
        let document: wire::WireDocument =
            serde_json::from_slice(bytes).map_err(|source| LoadError::Parse {
                origin: origin.to_string(),
                source,
            })?;

        let mut records = Vec::with_capacity(document.events.len());
        let mut positions = HashMap::with_capacity(document.events.len());
        let mut rejected = Vec::new();

        for (position, raw) in document.events.into_iter().enumerate() {
            let raw_id = wire::raw_id(&raw);
            let parsed = wire::parse_record(raw).and_then(|record| {
                if positions.contains_key(&record.id) {
                    Err(RecordParseError::DuplicateId {
                        id: record.id.to_string(),
                    })
                } else {
                    Ok(record)
                }
            });

            match parsed {
                Ok(record) => {
                    positions.insert(record.id.clone(), records.len());
                    records.push(record);
                }
                Err(err) if policy == RecordPolicy::Strict => {
                    return Err(LoadError::Strict {
                        position,
                        source: err,
                    });
                }
                Err(err) => {
                    warn!(origin, position, id = ?raw_id, "dropping record: {}", err);
                    rejected.push(RejectedRecord {
                        position,
                        id: raw_id,
                        reason: err.to_string(),
                    });
                }
            }
        }

        let report = LoadReport {
            origin: origin.to_string(),
            policy,
            accepted: records.len(),
            rejected,
        };
        info!(
            origin,
            accepted = report.accepted,
            rejected = report.rejected.len(),
            "loaded incident dataset"
        );

        Ok(Self::freeze(records, positions, document.metadata, report))
    }

    /// Build a dataset from records that are already validated. Fails on the
    /// first repeated id.
    pub fn from_records(
        records: Vec<IncidentRecord>,
        metadata: DatasetMetadata,
    ) -> Result<Self, RecordParseError> {
        let mut positions = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if positions.insert(record.id.clone(), position).is_some() {
                return Err(RecordParseError::DuplicateId {
                    id: record.id.to_string(),
                });
            }
        }
        let report = LoadReport {
            origin: "memory".into(),
            policy: RecordPolicy::Strict,
            accepted: records.len(),
            rejected: Vec::new(),
        };
        Ok(Self::freeze(records, positions, metadata, report))
    }

    fn freeze(
        records: Vec<IncidentRecord>,
        positions: HashMap<RecordId, usize>,
        metadata: DatasetMetadata,
        report: LoadReport,
    ) -> Self {
        let actors = distinct(
            records
                .iter()
                .flat_map(|r| [r.actor_primary.as_str(), r.actor_secondary.as_str()]),
        );
        let districts = distinct(records.iter().map(|r| r.location.district.as_str()));
        Self {
            records,
            positions,
            actors,
            districts,
            metadata,
            report,
        }
    }

    /// All records in document order.
    pub fn records(&self) -> &[IncidentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &RecordId) -> Option<&IncidentRecord> {
        self.position(id).map(|pos| &self.records[pos])
    }

    pub fn position(&self, id: &RecordId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Every actor named as primary or secondary, sorted, blanks excluded.
    pub fn distinct_actors(&self) -> &[String] {
        &self.actors
    }

    /// Every district in the dataset, sorted, blanks excluded.
    pub fn distinct_districts(&self) -> &[String] {
        &self.districts
    }

    pub fn in_bounds(&self, bounds: &GeoBounds) -> Vec<&IncidentRecord> {
        self.records
            .iter()
            .filter(|record| bounds.contains(&record.location.point()))
            .collect()
    }

    pub fn metadata(&self) -> &DatasetMetadata {
        &self.metadata
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
