//! Side-by-side layout of timed events within one day
//!
//! Events are bucketed into columns ("groups") so that events sharing a column
//! never overlap. Each event then gets `width = 100 / groups` and
//! `left = group_index * width`, unless it overlaps nothing in any other column,
//! in which case it spans the full width.

use crate::hours::VisibleHours;
use chrono::NaiveDate;
use eg_core::{CalendarEvent, start_of_day};
use serde::Serialize;
use tracing::debug;

const MINUTES_PER_DAY: f64 = 24.0 * 60.0;

/// Bucket events into columns.
///
/// Events are taken in start order; each joins the first column whose last
/// event has ended by the time it starts, otherwise it opens a new column.
pub fn group_overlaps<'a>(events: &[&'a CalendarEvent]) -> Vec<Vec<&'a CalendarEvent>> {
    let mut sorted = events.to_vec();
    sorted.sort_by_key(|event| event.start);

    let mut groups: Vec<Vec<&'a CalendarEvent>> = Vec::new();
    for event in sorted {
        match groups
            .iter_mut()
            .find(|group| group.last().is_some_and(|last| event.start >= last.end))
        {
            Some(group) => group.push(event),
            None => groups.push(vec![event]),
        }
    }
    groups
}

/// Geometry of one event block, all lengths in percent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventBlock<'a> {
    pub event: &'a CalendarEvent,
    pub group_index: usize,
    pub group_count: usize,
    /// Minutes from midnight to the (day-clipped) start
    pub start_minutes: i64,
    pub duration_minutes: i64,
    /// Offset from midnight, relative to the whole day
    pub top: f64,
    /// Height relative to the whole day
    pub height: f64,
    pub left: f64,
    pub width: f64,
}

impl EventBlock<'_> {
    /// Whether the block was widened because nothing in another column overlaps it
    pub fn is_full_width(&self) -> bool {
        self.group_count > 1 && self.width >= 100.0
    }

    /// `(top, height)` rescaled to a grid showing only `hours`
    pub fn position_in_hours(&self, hours: VisibleHours) -> (f64, f64) {
        let range = hours.range_minutes() as f64;
        let offset = (self.start_minutes - i64::from(hours.from) * 60) as f64;
        (offset / range * 100.0, self.duration_minutes as f64 / range * 100.0)
    }
}

fn overlaps_other_group(
    event: &CalendarEvent,
    group_index: usize,
    groups: &[Vec<&CalendarEvent>],
) -> bool {
    groups
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != group_index)
        .any(|(_, other)| other.iter().any(|candidate| event.overlaps(candidate)))
}

/// Derive geometry for grouped events on `day`, one block per event in group order
pub fn layout_groups<'a>(groups: &[Vec<&'a CalendarEvent>], day: NaiveDate) -> Vec<EventBlock<'a>> {
    let group_count = groups.len();
    let day_start = start_of_day(day);
    let mut blocks = Vec::with_capacity(groups.iter().map(Vec::len).sum());

    for (group_index, group) in groups.iter().enumerate() {
        for &event in group {
            let (left, width) = if overlaps_other_group(event, group_index, groups) {
                let width = 100.0 / group_count as f64;
                (group_index as f64 * width, width)
            } else {
                (0.0, 100.0)
            };

            let clipped_start = event.start.max(day_start);
            let start_minutes = (clipped_start - day_start).num_minutes();
            let duration_minutes = (event.end - clipped_start).num_minutes().max(0);

            blocks.push(EventBlock {
                event,
                group_index,
                group_count,
                start_minutes,
                duration_minutes,
                top: start_minutes as f64 / MINUTES_PER_DAY * 100.0,
                height: duration_minutes as f64 / MINUTES_PER_DAY * 100.0,
                left,
                width,
            });
        }
    }

    blocks
}

/// Lay out the timed single-day events that start on `day`
pub fn layout_day<'a>(events: &[&'a CalendarEvent], day: NaiveDate) -> Vec<EventBlock<'a>> {
    let on_day: Vec<&CalendarEvent> = events
        .iter()
        .copied()
        .filter(|event| event.is_single_day() && event.start.date() == day)
        .collect();

    let groups = group_overlaps(&on_day);
    debug!(%day, events = on_day.len(), groups = groups.len(), "Grouped day events");

    layout_groups(&groups, day)
}
