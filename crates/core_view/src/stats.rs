use std::collections::BTreeMap;

use core_model::incident::IncidentRecord;
use core_model::Severity;
use serde::Serialize;

const RECENT_EVENTS_LIMIT: usize = 5;

/// Summary counts for a set of records.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics<'a> {
    pub total_events: usize,
    pub total_injured: u64,
    pub total_dead: u64,
    pub by_division: BTreeMap<String, usize>,
    pub by_severity: BTreeMap<Severity, usize>,
    /// Keyed by primary actor only.
    pub by_actor: BTreeMap<String, usize>,
    /// Newest first; records sharing a timestamp keep their input order.
    pub recent_events: Vec<&'a IncidentRecord>,
}

impl<'a> Statistics<'a> {
    pub fn compute<I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a IncidentRecord>,
    {
        let mut stats = Statistics {
            total_events: 0,
            total_injured: 0,
            total_dead: 0,
            by_division: BTreeMap::new(),
            by_severity: BTreeMap::new(),
            by_actor: BTreeMap::new(),
            recent_events: Vec::new(),
        };

        for record in records {
            stats.total_events += 1;
            stats.total_injured += u64::from(record.casualties.injured);
            stats.total_dead += u64::from(record.casualties.dead);
            *stats
                .by_division
                .entry(record.location.division.clone())
                .or_default() += 1;
            *stats.by_severity.entry(record.severity).or_default() += 1;
            if !record.actor_primary.trim().is_empty() {
                *stats
                    .by_actor
                    .entry(record.actor_primary.clone())
                    .or_default() += 1;
            }
            stats.recent_events.push(record);
        }

        stats
            .recent_events
            .sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        stats.recent_events.truncate(RECENT_EVENTS_LIMIT);
        stats
    }
}
