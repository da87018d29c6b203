//! Text rendering of week and day layouts

use chrono::NaiveDateTime;
use eg_core::CalendarEvent;
use eg_layout::{DayView, EventBlock, WeekBand, WeekView};
use nu_ansi_term::{Color, Style};
use std::fmt::Write;

/// Width of one day cell in the band grid
const CELL_WIDTH: usize = 14;

fn label(event: &CalendarEvent) -> &str {
    if event.title.is_empty() {
        &event.id
    } else {
        &event.title
    }
}

fn fit(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat_n(' ', width - len));
    out
}

fn time(at: NaiveDateTime) -> String {
    at.format("%H:%M").to_string()
}

fn band_cell(band: Option<&WeekBand<'_>>, day_index: usize) -> String {
    match band {
        Some(band) if band.start_index == day_index => fit(&format!("[{}", label(band.event)), CELL_WIDTH),
        Some(_) => "─".repeat(CELL_WIDTH),
        None => fit("·", CELL_WIDTH),
    }
}

fn block_line(block: &EventBlock<'_>) -> String {
    let columns = if block.is_full_width() {
        "full width".to_string()
    } else {
        format!(
            "col {}/{}, left {:.1}%, width {:.1}%",
            block.group_index + 1,
            block.group_count,
            block.left,
            block.width
        )
    };
    format!(
        "  {}-{}  {}  ({})",
        time(block.event.start),
        time(block.event.end),
        label(block.event),
        columns
    )
}

/// Render a week: the multi-day band grid, "+N more" counts, then each day's blocks
pub fn render_week(view: &WeekView<'_>) -> String {
    let heading = Color::Cyan.bold();
    let dim = Style::new().dimmed();
    let mut out = String::new();

    let _ = writeln!(out, "{}", heading.paint(view.week.to_string()));

    let header: String = view
        .week
        .days()
        .map(|day| fit(&day.format("%a %m-%d").to_string(), CELL_WIDTH))
        .collect();
    let _ = writeln!(out, "{}", Style::new().bold().paint(header));

    if view.has_multi_day {
        for row in view.bands.visible_rows(view.max_visible_rows) {
            let line: String = (0..view.days.len())
                .map(|day_index| {
                    band_cell(row.iter().find(|band| band.covers(day_index)), day_index)
                })
                .collect();
            let _ = writeln!(out, "{}", line);
        }

        if view.days.iter().any(|day| day.overflow > 0) {
            let line: String = view
                .days
                .iter()
                .map(|day| {
                    if day.overflow > 0 {
                        fit(&format!("+{} more", day.overflow), CELL_WIDTH)
                    } else {
                        fit("", CELL_WIDTH)
                    }
                })
                .collect();
            let _ = writeln!(out, "{}", Color::Yellow.paint(line));
        }
    } else {
        let _ = writeln!(out, "{}", dim.paint("(no multi-day events)"));
    }

    let _ = writeln!(
        out,
        "{}",
        dim.paint(format!("hours {:02}:00-{:02}:00", view.hours.from, view.hours.to))
    );

    for day in &view.days {
        if day.blocks.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{}", heading.paint(day.date.format("%a %Y-%m-%d").to_string()));
        for block in &day.blocks {
            let _ = writeln!(out, "{}", block_line(block));
        }
    }

    out
}

/// Render a day: the all-day strip followed by the timed blocks
pub fn render_day(view: &DayView<'_>) -> String {
    let heading = Color::Cyan.bold();
    let mut out = String::new();

    let _ = writeln!(out, "{}", heading.paint(view.date.format("%a, %b %-d, %Y").to_string()));

    for event in &view.all_day {
        let _ = writeln!(out, "  {} {}", Color::Magenta.paint("all-day"), label(event));
    }

    let _ = writeln!(
        out,
        "{}",
        Style::new()
            .dimmed()
            .paint(format!("hours {:02}:00-{:02}:00", view.hours.from, view.hours.to))
    );

    for block in &view.blocks {
        let _ = writeln!(out, "{}", block_line(block));
    }

    out
}
