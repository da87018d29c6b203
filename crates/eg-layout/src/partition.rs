//! Single-day / multi-day partitioning and per-day event queries

use chrono::NaiveDate;
use eg_core::{CalendarEvent, WeekWindow};
use serde::Serialize;

/// Events split by duration, both buckets in input order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Partition<'a> {
    /// Timed events starting and ending on the same date
    pub single_day: Vec<&'a CalendarEvent>,
    /// All-day events and events spanning several dates
    pub multi_day: Vec<&'a CalendarEvent>,
}

impl Partition<'_> {
    /// Total number of partitioned events
    pub fn len(&self) -> usize {
        self.single_day.len() + self.multi_day.len()
    }

    /// Check if both buckets are empty
    pub fn is_empty(&self) -> bool {
        self.single_day.is_empty() && self.multi_day.is_empty()
    }
}

/// Split events into single-day and multi-day buckets.
///
/// All-day events are always multi-day. Otherwise the calendar dates of start
/// and end decide, ignoring time of day.
pub fn partition_by_duration(events: &[CalendarEvent]) -> Partition<'_> {
    let (single_day, multi_day): (Vec<_>, Vec<_>) = events.iter().partition(|event| event.is_single_day());
    Partition {
        single_day,
        multi_day,
    }
}

/// Single-day events starting on `day`
pub fn events_on_day<'a>(single_day: &[&'a CalendarEvent], day: NaiveDate) -> Vec<&'a CalendarEvent> {
    single_day
        .iter()
        .copied()
        .filter(|event| event.start.date() == day)
        .collect()
}

/// Multi-day events whose date range covers `day`, for the all-day strip of a day view
pub fn multi_day_events_on_day<'a>(
    multi_day: &[&'a CalendarEvent],
    day: NaiveDate,
) -> Vec<&'a CalendarEvent> {
    multi_day
        .iter()
        .copied()
        .filter(|event| event.covers_date(day))
        .collect()
}

/// Number of events whose date range touches the week
pub fn event_count_in_window(events: &[CalendarEvent], week: &WeekWindow) -> usize {
    events
        .iter()
        .filter(|event| event.start.date() <= week.end() && event.end.date() >= week.start())
        .count()
}
