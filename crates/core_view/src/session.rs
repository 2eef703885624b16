use std::sync::Arc;

use chrono::{DateTime, Utc};
use core_model::filter::{FilterSpec, FilterSpecError};
use core_model::incident::{IncidentRecord, RecordId};
use core_model::style::{is_recent, marker_style, MarkerStyle};
use incident_store::Dataset;
use serde::Serialize;
use tracing::debug;

use crate::filter::apply_positions;
use crate::selection::{Selection, SelectionError};
use crate::viewport::{compute_viewport, Viewport, ViewportPolicy};

/// State container for one dashboard session.
///
/// The dataset is shared and frozen. Everything else changes only through
/// [`apply_filters`](Self::apply_filters), [`reset_filters`](Self::reset_filters)
/// and [`select`](Self::select), and after each of them the selection always
/// refers to a record in the current filtered set.
pub struct DashboardSession {
    dataset: Arc<Dataset>,
    policy: ViewportPolicy,
    filters: FilterSpec,
    filtered: Vec<usize>,
    selection: Selection,
    viewport: Viewport,
    revision: u64,
}

/// Serializable view of the session, as sent to the renderer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot<'a> {
    pub revision: u64,
    pub filters: &'a FilterSpec,
    pub active_filter_count: usize,
    pub total_records: usize,
    pub events: Vec<&'a IncidentRecord>,
    pub selected: Option<&'a IncidentRecord>,
    pub viewport: Viewport,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerView<'a> {
    pub id: &'a RecordId,
    pub lat: f64,
    pub lng: f64,
    pub selected: bool,
    pub style: MarkerStyle,
}

impl DashboardSession {
    pub fn new(dataset: Arc<Dataset>, policy: ViewportPolicy) -> Self {
        let mut session = Self {
            dataset,
            policy,
            filters: FilterSpec::default(),
            filtered: Vec::new(),
            selection: Selection::default(),
            viewport: Viewport::Center {
                center: policy.default_center,
                zoom: policy.default_zoom,
            },
            revision: 0,
        };
        session.recompute();
        session
    }

    /// Replaces the whole filter set and recomputes the view.
    /// Invalid specs are rejected before anything changes.
    pub fn apply_filters(&mut self, spec: FilterSpec) -> Result<(), FilterSpecError> {
        spec.validate()?;
        self.filters = spec;
        self.revision += 1;
        self.recompute();
        Ok(())
    }

    pub fn reset_filters(&mut self) {
        self.filters = FilterSpec::default();
        self.revision += 1;
        self.recompute();
    }

    /// Selects a visible record, or clears the selection with `None`.
    pub fn select(&mut self, id: Option<RecordId>) -> Result<(), SelectionError> {
        if let Some(id) = &id {
            let position = self
                .dataset
                .position(id)
                .ok_or_else(|| SelectionError::Unknown(id.clone()))?;
            if self.filtered.binary_search(&position).is_err() {
                return Err(SelectionError::NotVisible(id.clone()));
            }
        }
        self.selection.select(id);
        Ok(())
    }

    fn recompute(&mut self) {
        let records = self.dataset.records();
        self.filtered = apply_positions(records, &self.filters);
        let cleared = self
            .selection
            .reconcile(self.filtered.iter().map(|&pos| &records[pos].id));
        self.viewport = compute_viewport(
            self.filtered.iter().map(|&pos| &records[pos]),
            &self.policy,
        );
        debug!(
            revision = self.revision,
            visible = self.filtered.len(),
            total = records.len(),
            selection_cleared = cleared,
            "recomputed dashboard view"
        );
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn filters(&self) -> &FilterSpec {
        &self.filters
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn viewport_policy(&self) -> &ViewportPolicy {
        &self.policy
    }

    /// Visible records in dataset order.
    pub fn filtered_records(&self) -> impl Iterator<Item = &IncidentRecord> + '_ {
        let records = self.dataset.records();
        self.filtered.iter().map(move |&pos| &records[pos])
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn selected_record(&self) -> Option<&IncidentRecord> {
        self.selection.id().and_then(|id| self.dataset.get(id))
    }

    pub fn available_actors(&self) -> &[String] {
        self.dataset.distinct_actors()
    }

    pub fn available_districts(&self) -> &[String] {
        self.dataset.distinct_districts()
    }

    pub fn snapshot(&self) -> ViewSnapshot<'_> {
        ViewSnapshot {
            revision: self.revision,
            filters: &self.filters,
            active_filter_count: self.filters.active_facet_count(),
            total_records: self.dataset.len(),
            events: self.filtered_records().collect(),
            selected: self.selected_record(),
            viewport: self.viewport,
        }
    }

    pub fn markers(&self, now: DateTime<Utc>) -> Vec<MarkerView<'_>> {
        self.filtered_records()
            .map(|record| {
                let selected = self.selection.is_selected(&record.id);
                MarkerView {
                    id: &record.id,
                    lat: record.location.lat,
                    lng: record.location.lng,
                    selected,
                    style: marker_style(
                        record.severity,
                        selected,
                        is_recent(&record.timestamp, &now),
                    ),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use core_model::metadata::DatasetMetadata;
    use core_model::Severity;

    use super::*;
    use crate::testing::{ids, scenario};

    fn session() -> DashboardSession {
        let dataset = Dataset::from_records(scenario(), DatasetMetadata::default()).unwrap();
        DashboardSession::new(Arc::new(dataset), ViewportPolicy::default())
    }

    #[test]
    fn starts_unfiltered_with_nothing_selected() {
        let session = session();
        assert_eq!(ids(session.filtered_records()), ["1", "2", "3"]);
        assert_eq!(session.selection(), &Selection::NoSelection);
        assert_eq!(session.revision(), 0);
        assert!(matches!(session.viewport(), Viewport::Fit { .. }));
    }

    #[test]
    fn filtering_out_the_selection_clears_it() {
        let mut session = session();
        session.select(Some("2".into())).unwrap();
        assert_eq!(session.selected_record().unwrap().id.as_str(), "2");

        session
            .apply_filters(FilterSpec::default().with_actors(["B"]))
            .unwrap();
        assert_eq!(ids(session.filtered_records()), ["1", "3"]);
        assert_eq!(session.selection(), &Selection::NoSelection);
        assert!(session.selected_record().is_none());
    }

    #[test]
    fn selection_survives_filters_that_keep_it() {
        let mut session = session();
        session.select(Some("3".into())).unwrap();
        session
            .apply_filters(FilterSpec::default().with_severities([Severity::Low, Severity::High]))
            .unwrap();
        assert!(session.selection().is_selected(&"3".into()));
    }

    #[test]
    fn cannot_select_hidden_or_unknown_records() {
        let mut session = session();
        session
            .apply_filters(FilterSpec::default().with_severities([Severity::High]))
            .unwrap();
        assert_eq!(
            session.select(Some("2".into())),
            Err(SelectionError::NotVisible("2".into()))
        );
        assert_eq!(
            session.select(Some("nope".into())),
            Err(SelectionError::Unknown("nope".into()))
        );
        assert_eq!(session.select(None), Ok(()));
    }

    #[test]
    fn empty_result_uses_default_viewport() {
        let mut session = session();
        session
            .apply_filters(FilterSpec::default().with_divisions(["Khulna"]))
            .unwrap();
        assert_eq!(session.filtered_len(), 0);
        assert_eq!(
            session.viewport(),
            Viewport::Center {
                center: ViewportPolicy::default().default_center,
                zoom: 7
            }
        );
    }

    #[test]
    fn invalid_spec_leaves_state_untouched() {
        let mut session = session();
        let start = Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap();
        let end = start - Duration::days(1);
        let spec = FilterSpec::default().with_date_range(Some(start), Some(end));
        assert!(session.apply_filters(spec).is_err());
        assert_eq!(session.revision(), 0);
        assert!(session.filters().is_unconstrained());
    }

    #[test]
    fn facets_ignore_filters() {
        let mut session = session();
        let before = (
            session.available_actors().to_vec(),
            session.available_districts().to_vec(),
        );
        session
            .apply_filters(
                FilterSpec::default()
                    .with_actors(["C"])
                    .with_verified_only(true),
            )
            .unwrap();
        assert_eq!(session.available_actors(), before.0.as_slice());
        assert_eq!(session.available_districts(), before.1.as_slice());
        assert_eq!(session.available_actors(), ["A", "B", "C"]);
    }

    #[test]
    fn reset_restores_full_view_and_bumps_revision() {
        let mut session = session();
        session
            .apply_filters(FilterSpec::default().with_actors(["C"]))
            .unwrap();
        session.reset_filters();
        assert_eq!(session.revision(), 2);
        assert_eq!(session.filtered_len(), 3);
    }

    #[test]
    fn snapshot_and_markers_reflect_selection() {
        let mut session = session();
        session.select(Some("1".into())).unwrap();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.events.len(), 3);
        assert_eq!(snapshot.selected.map(|r| r.id.as_str()), Some("1"));
        assert_eq!(snapshot.active_filter_count, 0);

        let now = Utc.with_ymd_and_hms(2024, 8, 3, 0, 0, 0).unwrap();
        let markers = session.markers(now);
        assert_eq!(markers.len(), 3);
        assert!(markers[0].selected);
        assert_eq!(markers[0].style.size_px, 32);
        assert_eq!(markers[1].style.size_px, 24);
        assert!(markers.iter().all(|m| m.style.pulse));

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["events"][0]["politicalParty"], "A");
        assert_eq!(json["viewport"]["kind"], "fit");
    }
}
