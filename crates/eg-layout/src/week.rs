//! Multi-day band packing for a week grid
//!
//! Each multi-day event is clipped to the week and turned into a band spanning
//! day indices `[start_index, end_index]`. Bands are sorted by clipped start,
//! longer bands first on ties, then packed greedily: a band goes into the first
//! row where it collides with nothing, or opens a new row. The packing is
//! first-fit, not optimal, and row assignment is visible through the
//! "+N more" counts.

use chrono::NaiveDateTime;
use eg_core::{CalendarEvent, DAYS_IN_WEEK, WeekWindow};
use serde::Serialize;
use std::cmp::Ordering;
use tracing::debug;

/// A multi-day event clipped to a week
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekBand<'a> {
    pub event: &'a CalendarEvent,
    pub adjusted_start: NaiveDateTime,
    pub adjusted_end: NaiveDateTime,
    pub start_index: usize,
    pub end_index: usize,
}

impl<'a> WeekBand<'a> {
    fn clip(event: &'a CalendarEvent, week: &WeekWindow) -> Self {
        let adjusted_start = event.start.max(week.start_instant());
        let adjusted_end = event.end.min(week.end_instant());

        Self {
            event,
            adjusted_start,
            adjusted_end,
            start_index: day_offset(week, adjusted_start),
            end_index: day_offset(week, adjusted_end),
        }
    }

    /// Number of days covered minus one
    pub fn span(&self) -> isize {
        self.end_index as isize - self.start_index as isize
    }

    /// Whether the band covers the day at `day_index`
    pub fn covers(&self, day_index: usize) -> bool {
        self.start_index <= day_index && day_index <= self.end_index
    }

    fn collides_with(&self, other: &WeekBand<'_>) -> bool {
        !(self.end_index < other.start_index || self.start_index > other.end_index)
    }
}

/// Calendar-day offset of `instant` from the week start, clamped to the week
fn day_offset(week: &WeekWindow, instant: NaiveDateTime) -> usize {
    let days = (instant.date() - week.start()).num_days();
    days.clamp(0, DAYS_IN_WEEK as i64 - 1) as usize
}

/// Whether the event starts in, ends in, or spans the whole week
fn touches_week(event: &CalendarEvent, week: &WeekWindow) -> bool {
    week.contains_instant(event.start)
        || week.contains_instant(event.end)
        || (event.start < week.start_instant() && event.end > week.end_instant())
}

/// Whether any of the events should render in the week's multi-day row
pub fn has_events_in_week(events: &[&CalendarEvent], week: &WeekWindow) -> bool {
    events.iter().any(|event| touches_week(event, week))
}

fn compare_bands(a: &WeekBand<'_>, b: &WeekBand<'_>) -> Ordering {
    a.adjusted_start
        .cmp(&b.adjusted_start)
        .then_with(|| b.span().cmp(&a.span()))
}

/// Clip, sort and pack multi-day events into rows for `week`
pub fn compute_week_bands<'a>(events: &[&'a CalendarEvent], week: &WeekWindow) -> WeekLayout<'a> {
    let mut bands: Vec<WeekBand<'a>> = events
        .iter()
        .copied()
        .filter(|event| touches_week(event, week))
        .map(|event| WeekBand::clip(event, week))
        .collect();

    // stable: equal keys keep input order
    bands.sort_by(compare_bands);

    let mut rows: Vec<Vec<WeekBand<'a>>> = Vec::new();
    for band in bands {
        match rows
            .iter_mut()
            .find(|row| row.iter().all(|existing| !existing.collides_with(&band)))
        {
            Some(row) => row.push(band),
            None => rows.push(vec![band]),
        }
    }

    debug!(
        week_start = %week.start(),
        events = events.len(),
        rows = rows.len(),
        "Packed multi-day bands"
    );

    WeekLayout { week: *week, rows }
}

/// Packed rows for one week, row 0 rendered topmost
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekLayout<'a> {
    pub week: WeekWindow,
    pub rows: Vec<Vec<WeekBand<'a>>>,
}

impl<'a> WeekLayout<'a> {
    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if there are no bands
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows rendered directly
    pub fn visible_rows(&self, max_visible_rows: usize) -> &[Vec<WeekBand<'a>>] {
        &self.rows[..self.rows.len().min(max_visible_rows)]
    }

    /// Bands hidden behind "+N more" that cover `day_index`, in row order
    pub fn hidden_bands_for_day(&self, day_index: usize, max_visible_rows: usize) -> Vec<&WeekBand<'a>> {
        self.rows
            .iter()
            .skip(max_visible_rows)
            .flatten()
            .filter(|band| band.covers(day_index))
            .collect()
    }

    /// The N of "+N more" for one day column
    pub fn overflow_count(&self, day_index: usize, max_visible_rows: usize) -> usize {
        self.hidden_bands_for_day(day_index, max_visible_rows).len()
    }

    /// Overflow counts for every day of the week
    pub fn overflow_counts(&self, max_visible_rows: usize) -> [usize; DAYS_IN_WEEK] {
        let mut counts = [0; DAYS_IN_WEEK];
        for (day_index, count) in counts.iter_mut().enumerate() {
            *count = self.overflow_count(day_index, max_visible_rows);
        }
        counts
    }

    /// Every band covering `day_index`, paired with its row
    pub fn bands_for_day(&self, day_index: usize) -> Vec<(usize, &WeekBand<'a>)> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(row, bands)| bands.iter().map(move |band| (row, band)))
            .filter(|(_, band)| band.covers(day_index))
            .collect()
    }
}
