//! Hour range shown by day and week time grids

use chrono::Timelike;
use eg_core::{CalendarEvent, WorkingHours};
use serde::Serialize;

/// Hours `[from, to)` shown by a time grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisibleHours {
    pub from: u32,
    pub to: u32,
}

impl VisibleHours {
    /// The whole day
    pub const FULL_DAY: VisibleHours = VisibleHours { from: 0, to: 24 };

    /// Length of the range in minutes
    pub fn range_minutes(&self) -> i64 {
        (i64::from(self.to) - i64::from(self.from)) * 60
    }

    /// Hours of the range
    pub fn hours(&self) -> std::ops::Range<u32> {
        self.from..self.to
    }
}

impl From<WorkingHours> for VisibleHours {
    fn from(hours: WorkingHours) -> Self {
        Self {
            from: hours.start,
            to: hours.end,
        }
    }
}

/// Working hours widened to fit every timed single-day event.
///
/// An event ending at 14:30 needs the 14:00 row, so partial end hours round up.
pub fn visible_hours(events: &[&CalendarEvent], working_hours: WorkingHours) -> VisibleHours {
    let mut range = VisibleHours::from(working_hours);

    for event in events.iter().filter(|event| event.is_single_day()) {
        let start_hour = event.start.hour();
        let end_hour = event.end.hour() + u32::from(event.end.minute() > 0);

        range.from = range.from.min(start_hour);
        range.to = range.to.max(end_hour);
    }

    range.to = range.to.min(24);
    range
}
