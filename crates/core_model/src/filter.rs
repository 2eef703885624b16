use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::time::DateRange;
use crate::Severity;

/// Complete set of active filter predicates. Submitted wholesale; an empty
/// set on any facet means that facet does not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    pub date_range: DateRange,
    #[serde(alias = "politicalParties")]
    pub actors: BTreeSet<String>,
    pub divisions: BTreeSet<String>,
    pub districts: BTreeSet<String>,
    #[serde(alias = "severityLevels")]
    pub severities: BTreeSet<Severity>,
    pub verified_only: bool,
}

#[derive(Debug, Error, PartialEq)]
pub enum FilterSpecError {
    #[error("invalid {field} date `{value}`")]
    InvalidDate { field: &'static str, value: String },
    #[error("date range start {start} is after end {end}")]
    InvertedRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl FilterSpec {
    pub fn with_date_range(
        mut self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Self {
        self.date_range = DateRange::new(start, end);
        self
    }

    pub fn with_actors<I, S>(mut self, actors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actors = actors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_divisions<I, S>(mut self, divisions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.divisions = divisions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_districts<I, S>(mut self, districts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.districts = districts.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_severities<I>(mut self, severities: I) -> Self
    where
        I: IntoIterator<Item = Severity>,
    {
        self.severities = severities.into_iter().collect();
        self
    }

    pub fn with_verified_only(mut self, verified_only: bool) -> Self {
        self.verified_only = verified_only;
        self
    }

    /// Boundary check run before a spec reaches the filter engine.
    pub fn validate(&self) -> Result<(), FilterSpecError> {
        if let (Some(start), Some(end)) = (self.date_range.start, self.date_range.end) {
            if start > end {
                return Err(FilterSpecError::InvertedRange { start, end });
            }
        }
        Ok(())
    }

    pub fn is_unconstrained(&self) -> bool {
        self.date_range.is_unbounded()
            && self.actors.is_empty()
            && self.divisions.is_empty()
            && self.districts.is_empty()
            && self.severities.is_empty()
            && !self.verified_only
    }

    /// Badge count shown next to the filter panel: one for any date bound,
    /// one per selected facet value, one for the verified toggle.
    pub fn active_facet_count(&self) -> usize {
        usize::from(!self.date_range.is_unbounded())
            + self.actors.len()
            + self.divisions.len()
            + self.districts.len()
            + self.severities.len()
            + usize::from(self.verified_only)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn default_spec_is_unconstrained() {
        let spec = FilterSpec::default();
        assert!(spec.is_unconstrained());
        assert_eq!(spec.active_facet_count(), 0);
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn counts_each_selected_value() {
        let spec = FilterSpec::default()
            .with_date_range(Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()), None)
            .with_actors(["Awami League", "BNP"])
            .with_severities([Severity::High])
            .with_verified_only(true);
        assert_eq!(spec.active_facet_count(), 5);
        assert!(!spec.is_unconstrained());
    }

    #[test]
    fn rejects_inverted_range() {
        let start = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let spec = FilterSpec::default().with_date_range(Some(start), Some(end));
        assert_eq!(
            spec.validate(),
            Err(FilterSpecError::InvertedRange { start, end })
        );
    }

    #[test]
    fn accepts_dashboard_wire_names() {
        let spec: FilterSpec = serde_json::from_str(
            r#"{
                "dateRange": {"start": "2024-07-01", "end": null},
                "politicalParties": ["BNP"],
                "severityLevels": ["high", "low"],
                "verifiedOnly": true
            }"#,
        )
        .unwrap();
        assert!(spec.actors.contains("BNP"));
        assert_eq!(spec.severities.len(), 2);
        assert!(spec.divisions.is_empty());
        assert!(spec.verified_only);
        assert!(spec.date_range.start.is_some());
    }

    #[test]
    fn rejects_unknown_severity_on_the_wire() {
        let parsed = serde_json::from_str::<FilterSpec>(r#"{"severities": ["extreme"]}"#);
        assert!(parsed.is_err());
        let parsed = serde_json::from_str::<FilterSpec>(r#"{"severities": ["High"]}"#);
        assert!(parsed.is_err());
    }
}
