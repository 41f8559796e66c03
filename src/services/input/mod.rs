//! JSON event input for callers that hand the engine a file instead of
//! in-memory [`Event`]s.
//!
//! Records are lenient: an unparseable start drops the record, an unparseable
//! or missing end produces a degraded event.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::models::event::{Event, EventId};

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const UNTITLED: &str = "(untitled)";

#[derive(Debug, Clone, Deserialize)]
pub struct EventRecord {
    pub id: EventId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl EventRecord {
    /// Convert to an [`Event`], or `None` when the start cannot be used.
    pub fn into_event(self) -> Option<Event> {
        let Some(start) = self.start.as_deref().and_then(parse_datetime) else {
            log::warn!("Event {} has no usable start ({:?}); dropped", self.id, self.start);
            return None;
        };

        let end = match self.end.as_deref().map(|value| (value, parse_datetime(value))) {
            Some((_, Some(end))) if end >= start => Some(end),
            Some((raw, Some(_))) => {
                log::warn!(
                    "Event {} ends ({}) before it starts; treating as degraded",
                    self.id,
                    raw
                );
                None
            }
            Some((raw, None)) => {
                log::warn!("Event {} has unparseable end {:?}", self.id, raw);
                None
            }
            None => None,
        };

        let title = if self.title.trim().is_empty() {
            UNTITLED.to_string()
        } else {
            self.title
        };

        Some(Event {
            id: self.id,
            title,
            start,
            end,
            all_day: self.all_day,
            category: self.category,
            color: self.color,
        })
    }
}

/// Parse an ISO-8601 local date-time, or a plain date as its midnight.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Parse a JSON array of event records.
pub fn parse_events(json: &str) -> Result<Vec<Event>> {
    let records: Vec<EventRecord> =
        serde_json::from_str(json).context("failed to parse event records")?;
    Ok(records.into_iter().filter_map(EventRecord::into_event).collect())
}

pub fn load_events(path: &Path) -> Result<Vec<Event>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read events from {}", path.display()))?;
    parse_events(&data).with_context(|| format!("in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use test_case::test_case;

    #[test_case("2025-01-15T09:30:00", 9, 30; "iso seconds")]
    #[test_case("2025-01-15T09:30", 9, 30; "iso minutes")]
    #[test_case("2025-01-15 18:05", 18, 5; "space separated")]
    #[test_case(" 2025-01-15 ", 0, 0; "plain date")]
    fn test_parse_datetime(value: &str, hour: u32, minute: u32) {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap();
        assert_eq!(parse_datetime(value), Some(expected));
    }

    #[test]
    fn test_parse_datetime_rejects_garbage() {
        assert_eq!(parse_datetime("next tuesday"), None);
    }

    #[test]
    fn test_parse_events_lenient() {
        let json = r#"[
            {"id": 1, "title": "Standup", "start": "2025-01-15T09:00", "end": "2025-01-15T09:15"},
            {"id": 2, "title": "Broken", "start": "soon"},
            {"id": 3, "title": "No end", "start": "2025-01-15T10:00"},
            {"id": 4, "title": "", "start": "2025-01-16", "end": "2025-01-17", "all_day": true},
            {"id": 5, "title": "Backwards", "start": "2025-01-15T10:00", "end": "2025-01-14T10:00"}
        ]"#;

        let events = parse_events(json).unwrap();
        let ids: Vec<_> = events.iter().map(|event| event.id).collect();
        assert_eq!(ids, vec![1, 3, 4, 5]);

        assert!(!events[0].is_degraded());
        assert!(events[1].is_degraded());
        assert_eq!(events[2].title, UNTITLED);
        assert!(events[2].all_day);
        assert!(!events[2].is_multi_day());
        assert!(events[3].is_degraded());
    }

    #[test]
    fn test_parse_events_invalid_json() {
        assert!(parse_events("{not json").is_err());
    }

    #[test]
    fn test_load_events_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 9, "title": "Trip", "start": "2025-01-15", "end": "2025-01-18"}}]"#
        )
        .unwrap();

        let events = load_events(file.path()).unwrap();
        assert_eq!(events.len(), 1);
        assert!(events[0].is_multi_day());
    }

    #[test]
    fn test_load_events_missing_file() {
        let err = load_events(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read events"));
    }
}
