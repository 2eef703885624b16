use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Inclusive date-time range. A missing bound leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub start: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, ts: &DateTime<Utc>) -> bool {
        if let Some(start) = &self.start {
            if ts < start {
                return false;
            }
        }
        if let Some(end) = &self.end {
            if ts > end {
                return false;
            }
        }
        true
    }
}

/// Accepts `YYYY-MM-DD` (midnight UTC) or RFC 3339.
pub fn parse_datetime_input(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let naive = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| anyhow!("invalid midnight for date {}", raw))?;
        return Ok(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc));
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| anyhow!("failed to parse `{}` as ISO datetime: {}", raw, err))
}

fn deserialize_optional_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_datetime_input(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn bounds_are_inclusive() {
        let range = DateRange::new(Some(at(2024, 7, 1, 0)), Some(at(2024, 7, 31, 0)));
        assert!(range.contains(&at(2024, 7, 1, 0)));
        assert!(range.contains(&at(2024, 7, 31, 0)));
        assert!(!range.contains(&at(2024, 6, 30, 23)));
        assert!(!range.contains(&at(2024, 7, 31, 1)));
    }

    #[test]
    fn open_sides_do_not_constrain() {
        let range = DateRange::new(None, Some(at(2024, 1, 1, 0)));
        assert!(range.contains(&at(1990, 1, 1, 0)));
        assert!(DateRange::default().contains(&at(2999, 1, 1, 0)));
    }

    #[test]
    fn parses_date_only_and_rfc3339() {
        assert_eq!(parse_datetime_input("2024-08-05").unwrap(), at(2024, 8, 5, 0));
        assert_eq!(
            parse_datetime_input("2024-08-05T14:00:00+06:00").unwrap(),
            at(2024, 8, 5, 8)
        );
        assert!(parse_datetime_input("05/08/2024").is_err());
    }

    #[test]
    fn deserializes_blank_bounds_as_open() {
        let range: DateRange =
            serde_json::from_str(r#"{"start": "", "end": "2024-08-05"}"#).unwrap();
        assert_eq!(range.start, None);
        assert_eq!(range.end, Some(at(2024, 8, 5, 0)));
        assert!(serde_json::from_str::<DateRange>(r#"{"start": "yesterday"}"#).is_err());
    }
}
