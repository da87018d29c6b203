//! eventgrid: calendar layout command line
//!
//! Usage:
//!   eventgrid --events events.json            - Lay out the current week
//!   eventgrid --day --date 2024-03-06         - Lay out a single day
//!   eventgrid --json                          - Print the layout as JSON
//!   eventgrid --help                          - Show help

mod render;

use anyhow::Context;
use chrono::NaiveDate;
use eg_core::{CalendarView, EventSet, LayoutConfig};
use eg_layout::LayoutEngine;
use tracing_subscriber::EnvFilter;

/// Layout options given on the command line
#[derive(Debug, Default, PartialEq)]
struct LayoutOptions {
    view: CalendarView,
    date: Option<NaiveDate>,
    events_path: Option<String>,
    config_path: Option<String>,
    json: bool,
}

/// Run mode
#[derive(Debug, PartialEq)]
enum RunMode {
    /// Lay out events
    Layout(LayoutOptions),
    /// Show help
    Help,
    /// Show version
    Version,
}

fn main() -> anyhow::Result<()> {
    let mode = parse_args(std::env::args().skip(1))?;

    let options = match mode {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("eventgrid {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        RunMode::Layout(options) => options,
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();

    // Load .env file
    dotenvy::dotenv().ok();

    let config = match &options.config_path {
        Some(path) => LayoutConfig::from_toml_file(path),
        None => LayoutConfig::load(),
    }
    .context("Failed to load configuration")?;

    let events_path = options
        .events_path
        .clone()
        .or_else(|| config.events_path.clone())
        .context("No events file given (use --events or EVENTGRID_EVENTS_PATH)")?;

    let events = EventSet::from_json_file(&events_path)
        .with_context(|| format!("Failed to load events from {}", events_path))?;

    let date = options
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    tracing::info!(
        events = events.len(),
        view = ?options.view,
        %date,
        "Laying out calendar"
    );

    let engine = LayoutEngine::new(config);
    let output = match (options.view, options.json) {
        (CalendarView::Week, false) => render::render_week(&engine.week_view(events.events(), date)),
        (CalendarView::Day, false) => render::render_day(&engine.day_view(events.events(), date)),
        (CalendarView::Week, true) => {
            serde_json::to_string_pretty(&engine.week_view(events.events(), date))?
        }
        (CalendarView::Day, true) => {
            serde_json::to_string_pretty(&engine.day_view(events.events(), date))?
        }
    };

    println!("{}", output);
    Ok(())
}

/// `RUST_LOG` when set and valid, otherwise `info`
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Parse command line arguments
fn parse_args<I>(args: I) -> anyhow::Result<RunMode>
where
    I: IntoIterator<Item = String>,
{
    let mut options = LayoutOptions::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(RunMode::Help),
            "--version" | "-v" => return Ok(RunMode::Version),
            "--week" | "-w" => options.view = CalendarView::Week,
            "--day" | "-d" => options.view = CalendarView::Day,
            "--json" => options.json = true,
            "--date" => {
                let value = args.next().context("--date requires a value")?;
                let date = value
                    .parse::<NaiveDate>()
                    .with_context(|| format!("Invalid date: {}", value))?;
                options.date = Some(date);
            }
            "--events" | "-e" => {
                options.events_path = Some(args.next().context("--events requires a path")?);
            }
            "--config" | "-c" => {
                options.config_path = Some(args.next().context("--config requires a path")?);
            }
            other => anyhow::bail!("Unknown argument: {}", other),
        }
    }

    Ok(RunMode::Layout(options))
}

/// Print help message
fn print_help() {
    println!("eventgrid - calendar event layout");
    println!();
    println!("Usage:");
    println!("  eventgrid [--week|--day] [--date YYYY-MM-DD] [--events PATH] [--config PATH] [--json]");
    println!("  eventgrid --help     Show this help message");
    println!("  eventgrid --version  Show version");
    println!();
    println!("Environment Variables:");
    println!("  EVENTGRID_EVENTS_PATH       Events JSON file (default for --events)");
    println!("  EVENTGRID_MAX_VISIBLE_ROWS  Multi-day rows shown before \"+N more\" (default: 3)");
    println!("  EVENTGRID_WEEK_START        First day of the week (default: sunday)");
    println!("  EVENTGRID_WORKING_HOURS     Working hours, e.g. 9-17 (default: 9-17)");
    println!("  RUST_LOG                    Log filter (default: info)");
}
