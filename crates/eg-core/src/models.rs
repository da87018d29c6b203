//! Event model consumed by the layout engine

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};

/// A calendar event as supplied by the surrounding application.
///
/// Only `id`, `start`, `end` and `all_day` drive the layout. The remaining
/// fields are display data carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Identifier, unique within a working set
    pub id: String,
    /// Event title
    #[serde(default)]
    pub title: String,
    /// Start (wall-clock time)
    #[serde(alias = "startDate", deserialize_with = "deserialize_timestamp")]
    pub start: NaiveDateTime,
    /// End (wall-clock time, inclusive)
    #[serde(alias = "endDate", deserialize_with = "deserialize_timestamp")]
    pub end: NaiveDateTime,
    /// All-day flag
    #[serde(default, alias = "isAllDay")]
    pub all_day: bool,
    /// Display color
    #[serde(default)]
    pub color: Option<String>,
    /// Event description
    #[serde(default)]
    pub description: Option<String>,
    /// Owning user
    #[serde(default)]
    pub user: Option<String>,
}

impl CalendarEvent {
    /// Create a new timed event
    pub fn new(id: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            start,
            end,
            all_day: false,
            color: None,
            description: None,
            user: None,
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Mark the event as all-day
    pub fn all_day(mut self) -> Self {
        self.all_day = true;
        self
    }

    /// Reject events whose end precedes their start
    pub fn validate(&self) -> Result<()> {
        if self.end < self.start {
            return Err(Error::InvertedRange {
                id: self.id.clone(),
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Timed event whose start and end fall on the same calendar date
    pub fn is_single_day(&self) -> bool {
        !self.all_day && self.start.date() == self.end.date()
    }

    /// Half-open overlap test. Events that only touch do not overlap.
    pub fn overlaps(&self, other: &CalendarEvent) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether the event's date range covers `day`
    pub fn covers_date(&self, day: NaiveDate) -> bool {
        self.start.date() <= day && day <= self.end.date()
    }

    /// Duration in whole minutes
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Parse a timestamp string.
///
/// Accepts RFC 3339 (offset dropped, wall time kept), naive ISO-8601 date-times
/// with or without seconds, and bare dates (midnight).
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = value.parse::<NaiveDateTime>() {
        return Some(dt);
    }
    for format in ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    value
        .parse::<NaiveDate>()
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        parse_timestamp(s).unwrap()
    }

    #[test]
    fn test_parse_timestamp_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(parse_timestamp("2024-03-04T10:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-04T10:30"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-04 10:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-04T10:30:00+09:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-04T10:30:00.000Z"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-03-04"),
            Some(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap().and_hms_opt(0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("not a date"), None);
    }

    #[test]
    fn test_deserialize_with_aliases() {
        let json = r#"{
            "id": "e1",
            "title": "Standup",
            "startDate": "2024-03-04T09:00:00",
            "endDate": "2024-03-04T09:15:00",
            "isAllDay": false,
            "color": "blue"
        }"#;
        let event: CalendarEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.id, "e1");
        assert_eq!(event.start, at("2024-03-04T09:00"));
        assert_eq!(event.color.as_deref(), Some("blue"));
        assert!(!event.all_day);
    }

    #[test]
    fn test_deserialize_rejects_bad_timestamp() {
        let json = r#"{"id": "e1", "start": "yesterday", "end": "2024-03-04"}"#;
        assert!(serde_json::from_str::<CalendarEvent>(json).is_err());
    }

    #[test]
    fn test_is_single_day() {
        let timed = CalendarEvent::new("a", at("2024-03-04T09:00"), at("2024-03-04T17:00"));
        assert!(timed.is_single_day());

        let all_day = timed.clone().all_day();
        assert!(!all_day.is_single_day());

        let overnight = CalendarEvent::new("b", at("2024-03-04T22:00"), at("2024-03-05T02:00"));
        assert!(!overnight.is_single_day());
    }

    #[test]
    fn test_overlaps_is_half_open() {
        let a = CalendarEvent::new("a", at("2024-03-04T09:00"), at("2024-03-04T10:00"));
        let b = CalendarEvent::new("b", at("2024-03-04T10:00"), at("2024-03-04T11:00"));
        let c = CalendarEvent::new("c", at("2024-03-04T09:30"), at("2024-03-04T10:30"));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
    }

    #[test]
    fn test_validate_inverted_range() {
        let event = CalendarEvent::new("bad", at("2024-03-05"), at("2024-03-04"));
        assert!(matches!(event.validate(), Err(Error::InvertedRange { .. })));

        let ok = CalendarEvent::new("ok", at("2024-03-04"), at("2024-03-04"));
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_covers_date() {
        let event = CalendarEvent::new("a", at("2024-03-04T22:00"), at("2024-03-06T01:00"));
        assert!(event.covers_date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()));
        assert!(event.covers_date(NaiveDate::from_ymd_opt(2024, 3, 6).unwrap()));
        assert!(!event.covers_date(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()));
        assert_eq!(event.duration_minutes(), 27 * 60);
    }
}
