//! Calendar windows: locale-dependent weeks, day/week views and navigation

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of days in a week window
pub const DAYS_IN_WEEK: usize = 7;

/// First day of the week
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl WeekStart {
    /// Corresponding chrono weekday
    pub fn weekday(self) -> Weekday {
        match self {
            Self::Sunday => Weekday::Sun,
            Self::Monday => Weekday::Mon,
            Self::Tuesday => Weekday::Tue,
            Self::Wednesday => Weekday::Wed,
            Self::Thursday => Weekday::Thu,
            Self::Friday => Weekday::Fri,
            Self::Saturday => Weekday::Sat,
        }
    }
}

impl FromStr for WeekStart {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sunday" | "sun" => Ok(Self::Sunday),
            "monday" | "mon" => Ok(Self::Monday),
            "tuesday" | "tue" => Ok(Self::Tuesday),
            "wednesday" | "wed" => Ok(Self::Wednesday),
            "thursday" | "thu" => Ok(Self::Thursday),
            "friday" | "fri" => Ok(Self::Friday),
            "saturday" | "sat" => Ok(Self::Saturday),
            other => Err(format!("unknown week start: {}", other)),
        }
    }
}

/// 00:00 on `date`
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// 23:59:59.999 on `date`
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date) + Duration::days(1) - Duration::milliseconds(1)
}

/// A 7-day window; `end` is always `start + 6 days`.
///
/// Only constructible through [`WeekWindow::starting`] and
/// [`WeekWindow::containing`], so the size cannot drift.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct WeekWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl WeekWindow {
    /// First day of the week
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the week
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Window beginning on `start`
    pub fn starting(start: NaiveDate) -> Self {
        Self {
            start,
            end: start + Duration::days(DAYS_IN_WEEK as i64 - 1),
        }
    }

    /// Week that contains `date`, honouring the first day of the week
    pub fn containing(date: NaiveDate, week_start: WeekStart) -> Self {
        let first = week_start.weekday().num_days_from_sunday();
        let current = date.weekday().num_days_from_sunday();
        let offset = (current + 7 - first) % 7;
        Self::starting(date - Duration::days(offset as i64))
    }

    /// First instant of the window
    pub fn start_instant(&self) -> NaiveDateTime {
        start_of_day(self.start)
    }

    /// Last instant of the window
    pub fn end_instant(&self) -> NaiveDateTime {
        end_of_day(self.end)
    }

    /// The seven dates of the window
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..DAYS_IN_WEEK as i64).map(move |offset| self.start + Duration::days(offset))
    }

    /// Day offset of `date` from the window start, if it lies inside
    pub fn day_index(&self, date: NaiveDate) -> Option<usize> {
        if self.contains(date) {
            Some((date - self.start).num_days() as usize)
        } else {
            None
        }
    }

    /// Whether `date` lies inside the window
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Whether `instant` lies inside the window (inclusive on both ends)
    pub fn contains_instant(&self, instant: NaiveDateTime) -> bool {
        self.start_instant() <= instant && instant <= self.end_instant()
    }

    /// Following week
    pub fn next(&self) -> Self {
        Self::starting(self.start + Duration::days(DAYS_IN_WEEK as i64))
    }

    /// Preceding week
    pub fn previous(&self) -> Self {
        Self::starting(self.start - Duration::days(DAYS_IN_WEEK as i64))
    }
}

impl fmt::Display for WeekWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%b %-d, %Y"),
            self.end.format("%b %-d, %Y")
        )
    }
}

/// Visible calendar view
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    Day,
    #[default]
    Week,
}

/// Navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl CalendarView {
    /// Move the selected date by one view-length
    pub fn navigate(self, date: NaiveDate, direction: Direction) -> NaiveDate {
        let step = match self {
            Self::Day => Duration::days(1),
            Self::Week => Duration::days(DAYS_IN_WEEK as i64),
        };
        match direction {
            Direction::Previous => date - step,
            Direction::Next => date + step,
        }
    }

    /// Human readable label for the range shown around `date`
    pub fn range_label(self, date: NaiveDate, week_start: WeekStart) -> String {
        match self {
            Self::Day => date.format("%a, %b %-d, %Y").to_string(),
            Self::Week => WeekWindow::containing(date, week_start).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_start_default() {
        assert_eq!(WeekStart::default(), WeekStart::Sunday);
    }

    #[test]
    fn test_week_start_from_str() {
        assert_eq!("Monday".parse::<WeekStart>(), Ok(WeekStart::Monday));
        assert_eq!("sat".parse::<WeekStart>(), Ok(WeekStart::Saturday));
        assert!("someday".parse::<WeekStart>().is_err());
    }

    #[test]
    fn test_containing_sunday_start() {
        // 2024-03-06 is a Wednesday
        let week = WeekWindow::containing(date(2024, 3, 6), WeekStart::Sunday);
        assert_eq!(week.start, date(2024, 3, 3));
        assert_eq!(week.end, date(2024, 3, 9));
    }

    #[test]
    fn test_containing_monday_start() {
        let week = WeekWindow::containing(date(2024, 3, 6), WeekStart::Monday);
        assert_eq!(week.start, date(2024, 3, 4));
        assert_eq!(week.end, date(2024, 3, 10));

        // A Sunday belongs to the week that began the previous Monday
        let week = WeekWindow::containing(date(2024, 3, 10), WeekStart::Monday);
        assert_eq!(week.start, date(2024, 3, 4));
    }

    #[test]
    fn test_instants_and_days() {
        let week = WeekWindow::starting(date(2024, 3, 4));
        assert_eq!(week.start_instant(), date(2024, 3, 4).and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(
            week.end_instant(),
            date(2024, 3, 10).and_hms_milli_opt(23, 59, 59, 999).unwrap()
        );
        let days: Vec<_> = week.days().collect();
        assert_eq!(days.len(), 7);
        assert_eq!(days[6], date(2024, 3, 10));
        assert_eq!(week.day_index(date(2024, 3, 7)), Some(3));
        assert_eq!(week.day_index(date(2024, 3, 11)), None);
    }

    #[test]
    fn test_week_navigation() {
        let week = WeekWindow::starting(date(2024, 2, 26));
        assert_eq!(week.next().start, date(2024, 3, 4));
        assert_eq!(week.previous().start, date(2024, 2, 19));
        assert_eq!(
            CalendarView::Day.navigate(date(2024, 2, 29), Direction::Next),
            date(2024, 3, 1)
        );
        assert_eq!(
            CalendarView::Week.navigate(date(2024, 3, 1), Direction::Previous),
            date(2024, 2, 23)
        );
    }

    #[test]
    fn test_window_always_spans_seven_days() {
        for week in [
            WeekWindow::starting(date(2024, 2, 26)),
            WeekWindow::containing(date(2024, 12, 31), WeekStart::Saturday),
            WeekWindow::starting(date(2024, 2, 26)).next().previous(),
        ] {
            assert_eq!((week.end() - week.start()).num_days(), 6);
            assert_eq!(week.days().count(), DAYS_IN_WEEK);
        }
    }

    #[test]
    fn test_range_label() {
        assert_eq!(
            CalendarView::Week.range_label(date(2024, 3, 6), WeekStart::Monday),
            "Mar 4, 2024 - Mar 10, 2024"
        );
        assert_eq!(
            CalendarView::Day.range_label(date(2024, 3, 6), WeekStart::Monday),
            "Wed, Mar 6, 2024"
        );
    }
}
