//! eg-layout: calendar event layout engine
//!
//! Pure, synchronous layout of date-ranged events for day and week grids.
//!
//! ## Features
//!
//! - Single-day / multi-day partitioning
//! - Greedy row packing of multi-day bands with per-day "+N more" counts
//! - Side-by-side column grouping and geometry for overlapping timed events
//! - Visible hour range for time grids
//!
//! ## Usage
//!
//! ```rust,ignore
//! use eg_core::{EventSet, LayoutConfig};
//! use eg_layout::LayoutEngine;
//!
//! let events = EventSet::from_json_file("events.json")?;
//! let engine = LayoutEngine::new(LayoutConfig::load()?);
//!
//! let view = engine.week_view(events.events(), chrono::Local::now().date_naive());
//! for (row, bands) in view.bands.visible_rows(view.max_visible_rows).iter().enumerate() {
//!     for band in bands {
//!         println!("row {}: {} ({}..={})", row, band.event.title, band.start_index, band.end_index);
//!     }
//! }
//! ```

pub mod day;
pub mod engine;
pub mod hours;
pub mod partition;
pub mod week;

pub use day::{EventBlock, group_overlaps, layout_day, layout_groups};
pub use engine::{DayColumn, DayView, LayoutEngine, WeekView};
pub use hours::{VisibleHours, visible_hours};
pub use partition::{
    Partition, event_count_in_window, events_on_day, multi_day_events_on_day, partition_by_duration,
};
pub use week::{WeekBand, WeekLayout, compute_week_bands, has_events_in_week};
