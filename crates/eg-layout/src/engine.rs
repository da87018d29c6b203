//! Layout engine facade
//!
//! Combines partitioning, week band packing and day grouping into the two
//! views a calendar renders: a 7-day week and a single day.

use crate::day::{EventBlock, layout_day};
use crate::hours::{VisibleHours, visible_hours};
use crate::partition::{Partition, multi_day_events_on_day, partition_by_duration};
use crate::week::{WeekLayout, compute_week_bands, has_events_in_week};
use chrono::NaiveDate;
use eg_core::{CalendarEvent, LayoutConfig, WeekWindow};
use serde::Serialize;
use tracing::debug;

/// One day column of a week view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayColumn<'a> {
    pub date: NaiveDate,
    /// "+N more" count below the visible band rows
    pub overflow: usize,
    pub blocks: Vec<EventBlock<'a>>,
}

/// Everything needed to render a week
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekView<'a> {
    pub week: WeekWindow,
    /// Whether the multi-day row renders at all
    pub has_multi_day: bool,
    pub bands: WeekLayout<'a>,
    pub max_visible_rows: usize,
    pub days: Vec<DayColumn<'a>>,
    pub hours: VisibleHours,
}

/// Everything needed to render a single day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayView<'a> {
    pub date: NaiveDate,
    /// Multi-day and all-day events covering the date
    pub all_day: Vec<&'a CalendarEvent>,
    pub blocks: Vec<EventBlock<'a>>,
    pub hours: VisibleHours,
}

/// Stateless layout engine parameterised by configuration
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    /// Create an engine with the given configuration
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Split events into single-day and multi-day buckets
    pub fn partition<'a>(&self, events: &'a [CalendarEvent]) -> Partition<'a> {
        partition_by_duration(events)
    }

    /// Lay out the week containing `date`
    pub fn week_view<'a>(&self, events: &'a [CalendarEvent], date: NaiveDate) -> WeekView<'a> {
        let week = WeekWindow::containing(date, self.config.week_start);
        let partition = partition_by_duration(events);
        let max_visible_rows = self.config.max_visible_rows;

        let bands = compute_week_bands(&partition.multi_day, &week);
        let overflow = bands.overflow_counts(max_visible_rows);

        let days: Vec<DayColumn<'a>> = week
            .days()
            .zip(overflow)
            .map(|(date, overflow)| DayColumn {
                date,
                overflow,
                blocks: layout_day(&partition.single_day, date),
            })
            .collect();

        let in_week: Vec<&CalendarEvent> = partition
            .single_day
            .iter()
            .copied()
            .filter(|event| week.contains(event.start.date()))
            .collect();

        debug!(
            week_start = %week.start(),
            single_day = in_week.len(),
            band_rows = bands.row_count(),
            "Built week view"
        );

        WeekView {
            week,
            has_multi_day: has_events_in_week(&partition.multi_day, &week),
            bands,
            max_visible_rows,
            days,
            hours: visible_hours(&in_week, self.config.working_hours),
        }
    }

    /// Lay out a single day
    pub fn day_view<'a>(&self, events: &'a [CalendarEvent], date: NaiveDate) -> DayView<'a> {
        let partition = partition_by_duration(events);
        let blocks = layout_day(&partition.single_day, date);
        let on_day: Vec<&CalendarEvent> = blocks.iter().map(|block| block.event).collect();

        DayView {
            date,
            all_day: multi_day_events_on_day(&partition.multi_day, date),
            hours: visible_hours(&on_day, self.config.working_hours),
            blocks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eg_core::{WeekStart, parse_timestamp};

    fn event(id: &str, start: &str, end: &str) -> CalendarEvent {
        CalendarEvent::new(id, parse_timestamp(start).unwrap(), parse_timestamp(end).unwrap())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn engine(max_visible_rows: usize) -> LayoutEngine {
        LayoutEngine::new(LayoutConfig {
            max_visible_rows,
            week_start: WeekStart::Monday,
            ..Default::default()
        })
    }

    fn sample() -> Vec<CalendarEvent> {
        vec![
            event("standup", "2024-03-04T09:00", "2024-03-04T09:15"),
            event("review", "2024-03-04T09:00", "2024-03-04T10:00"),
            event("offsite", "2024-03-05T09:00", "2024-03-07T17:00"),
            event("holiday", "2024-03-06", "2024-03-06").all_day(),
            event("trip", "2024-03-05", "2024-03-06").all_day(),
            event("early", "2024-03-08T07:00", "2024-03-08T08:00"),
            event("next-week", "2024-03-12T09:00", "2024-03-12T10:00"),
        ]
    }

    #[test]
    fn test_week_view() {
        let events = sample();
        let view = engine(2).week_view(&events, date(2024, 3, 6));

        assert_eq!(view.week.start(), date(2024, 3, 4));
        assert!(view.has_multi_day);
        assert_eq!(view.days.len(), 7);

        // trip (1-2) row 0, offsite (1-3) row 1, holiday (2-2) row 2
        assert_eq!(view.bands.row_count(), 3);
        assert_eq!(view.days[2].overflow, 1);
        assert_eq!(view.days[1].overflow, 0);

        assert_eq!(view.days[0].blocks.len(), 2);
        assert_eq!(view.days[4].blocks.len(), 1);
        assert!(view.days.iter().all(|day| day.blocks.iter().all(|b| b.event.id != "next-week")));

        assert_eq!(view.hours, VisibleHours { from: 7, to: 17 });
    }

    #[test]
    fn test_week_view_without_multi_day() {
        let events = vec![event("standup", "2024-03-04T09:00", "2024-03-04T09:15")];
        let view = engine(3).week_view(&events, date(2024, 3, 4));

        assert!(!view.has_multi_day);
        assert!(view.bands.is_empty());
        assert!(view.days.iter().all(|day| day.overflow == 0));
    }

    #[test]
    fn test_day_view() {
        let events = sample();
        let view = engine(3).day_view(&events, date(2024, 3, 6));

        let all_day: Vec<&str> = view.all_day.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(all_day, vec!["offsite", "holiday", "trip"]);
        assert!(view.blocks.is_empty());
        assert_eq!(view.hours, VisibleHours { from: 9, to: 17 });

        let view = engine(3).day_view(&events, date(2024, 3, 4));
        assert_eq!(view.blocks.len(), 2);
        assert!(view.all_day.is_empty());
    }

    #[test]
    fn test_week_view_serializes() {
        let events = sample();
        let view = engine(3).week_view(&events, date(2024, 3, 6));
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["week"]["start"], "2024-03-04");
        assert_eq!(json["bands"]["rows"][0][0]["event"]["id"], "trip");
        assert_eq!(json["bands"]["rows"][0][0]["start_index"], 1);
        assert_eq!(json["days"][0]["blocks"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_partition_through_engine() {
        let events = sample();
        let partition = LayoutEngine::default().partition(&events);
        assert_eq!(partition.single_day.len(), 4);
        assert_eq!(partition.multi_day.len(), 3);
    }
}
