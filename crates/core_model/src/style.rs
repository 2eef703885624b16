use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::Severity;

/// Records newer than this are drawn with a pulse.
pub const RECENT_WINDOW_DAYS: i64 = 7;

const MARKER_SIZE_PX: u32 = 24;
const SELECTED_MARKER_SIZE_PX: u32 = 32;

pub fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::High => "#ef4444",
        Severity::Medium => "#f97316",
        Severity::Low => "#eab308",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStyle {
    pub color: &'static str,
    pub size_px: u32,
    pub ring_width_px: u32,
    pub pulse: bool,
}

pub fn marker_style(severity: Severity, selected: bool, recent: bool) -> MarkerStyle {
    MarkerStyle {
        color: severity_color(severity),
        size_px: if selected {
            SELECTED_MARKER_SIZE_PX
        } else {
            MARKER_SIZE_PX
        },
        ring_width_px: if selected { 3 } else { 2 },
        pulse: recent,
    }
}

pub fn is_recent(at: &DateTime<Utc>, now: &DateTime<Utc>) -> bool {
    *now - *at <= Duration::days(RECENT_WINDOW_DAYS)
}
