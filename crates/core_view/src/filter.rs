use core_model::filter::FilterSpec;
use core_model::incident::IncidentRecord;

/// True when `record` passes every active facet of `spec`. Facets combine
/// with AND; values inside one facet combine with OR.
pub fn matches(record: &IncidentRecord, spec: &FilterSpec) -> bool {
    date_matches(record, spec)
        && actor_matches(record, spec)
        && division_matches(record, spec)
        && district_matches(record, spec)
        && severity_matches(record, spec)
        && (!spec.verified_only || record.verified)
}

/// Records passing `spec`, in input order.
pub fn apply<'a>(records: &'a [IncidentRecord], spec: &FilterSpec) -> Vec<&'a IncidentRecord> {
    if spec.is_unconstrained() {
        return records.iter().collect();
    }
    records
        .iter()
        .filter(|record| matches(record, spec))
        .collect()
}

/// Same selection as [`apply`], as positions into `records`.
pub fn apply_positions(records: &[IncidentRecord], spec: &FilterSpec) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches(record, spec))
        .map(|(pos, _)| pos)
        .collect()
}

fn date_matches(record: &IncidentRecord, spec: &FilterSpec) -> bool {
    spec.date_range.contains(&record.timestamp)
}

fn actor_matches(record: &IncidentRecord, spec: &FilterSpec) -> bool {
    spec.actors.is_empty() || record.actors().any(|actor| spec.actors.contains(actor))
}

fn division_matches(record: &IncidentRecord, spec: &FilterSpec) -> bool {
    spec.divisions.is_empty() || spec.divisions.contains(&record.location.division)
}

fn district_matches(record: &IncidentRecord, spec: &FilterSpec) -> bool {
    spec.districts.is_empty() || spec.districts.contains(&record.location.district)
}

fn severity_matches(record: &IncidentRecord, spec: &FilterSpec) -> bool {
    spec.severities.is_empty() || spec.severities.contains(&record.severity)
}
