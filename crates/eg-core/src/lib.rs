//! eg-core: eventgrid core library
//!
//! Event model, calendar windows, configuration and error types shared by
//! the layout engine and the command line front end.

pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod window;

pub use config::{LayoutConfig, MAX_VISIBLE_ROWS, WorkingHours};
pub use error::{Error, Result};
pub use events::EventSet;
pub use models::{CalendarEvent, parse_timestamp};
pub use window::{CalendarView, DAYS_IN_WEEK, Direction, WeekStart, WeekWindow, end_of_day, start_of_day};
