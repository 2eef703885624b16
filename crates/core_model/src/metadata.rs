use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Severity;

/// Descriptive block that ships alongside the records in the dataset document.
/// Every field is optional; nothing in the filtering core depends on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatasetMetadata {
    pub total_events: Option<u64>,
    pub last_updated: Option<String>,
    pub divisions: Vec<String>,
    pub political_parties: Vec<String>,
    pub severity_levels: BTreeMap<Severity, String>,
}

impl DatasetMetadata {
    pub fn severity_label(&self, severity: Severity) -> String {
        self.severity_levels
            .get(&severity)
            .cloned()
            .unwrap_or_else(|| default_severity_label(severity).to_string())
    }
}

pub fn default_severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Low => "Low",
        Severity::Medium => "Medium",
        Severity::High => "High",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_metadata_and_falls_back_on_missing_labels() {
        let meta: DatasetMetadata = serde_json::from_str(
            r#"{
                "totalEvents": 42,
                "lastUpdated": "2024-08-10T00:00:00Z",
                "divisions": ["Dhaka"],
                "severityLevels": {"high": "Fatal or mass casualty"}
            }"#,
        )
        .unwrap();
        assert_eq!(meta.total_events, Some(42));
        assert_eq!(meta.severity_label(Severity::High), "Fatal or mass casualty");
        assert_eq!(meta.severity_label(Severity::Low), "Low");
        assert!(meta.political_parties.is_empty());
    }
}
