//! Configuration management
//!
//! Settings are resolved in this order (later wins):
//! 1. Default values
//! 2. `eventgrid.toml` configuration file
//! 3. Environment variables
//!
//! `${VAR_NAME}` inside the configuration file is expanded from the environment.

use crate::error::Error;
use crate::window::WeekStart;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Rows of multi-day bands rendered per day cell before "+N more"
pub const MAX_VISIBLE_ROWS: usize = 3;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "eventgrid.toml";

/// Working hours of a day, `[start, end)` in whole hours
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkingHours {
    /// First working hour
    #[serde(default = "default_working_start")]
    pub start: u32,
    /// Hour at which work ends
    #[serde(default = "default_working_end")]
    pub end: u32,
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            start: default_working_start(),
            end: default_working_end(),
        }
    }
}

impl WorkingHours {
    /// Whether `hour` falls inside the working hours
    pub fn contains(&self, hour: u32) -> bool {
        self.start <= hour && hour < self.end
    }

    /// Parse `"9-17"`
    fn parse(value: &str) -> Option<Self> {
        let (start, end) = value.split_once('-')?;
        Some(Self {
            start: start.trim().parse().ok()?,
            end: end.trim().parse().ok()?,
        })
    }
}

fn default_working_start() -> u32 {
    9
}

fn default_working_end() -> u32 {
    17
}

fn default_max_visible_rows() -> usize {
    MAX_VISIBLE_ROWS
}

/// Layout configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayoutConfig {
    /// Rows of multi-day bands shown before collapsing into "+N more"
    #[serde(default = "default_max_visible_rows")]
    pub max_visible_rows: usize,

    /// First day of the week
    #[serde(default)]
    pub week_start: WeekStart,

    /// Working hours shown by default in time grids
    #[serde(default)]
    pub working_hours: WorkingHours,

    /// Events file used when none is given on the command line
    #[serde(default)]
    pub events_path: Option<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_visible_rows: default_max_visible_rows(),
            week_start: WeekStart::default(),
            working_hours: WorkingHours::default(),
            events_path: None,
        }
    }
}

/// Raw TOML layout, every field optional
#[derive(Debug, Default, Deserialize)]
struct TomlConfig {
    layout: Option<TomlLayout>,
    events: Option<TomlEvents>,
}

#[derive(Debug, Default, Deserialize)]
struct TomlLayout {
    max_visible_rows: Option<usize>,
    week_start: Option<String>,
    working_hours: Option<WorkingHours>,
}

#[derive(Debug, Default, Deserialize)]
struct TomlEvents {
    path: Option<String>,
}

impl LayoutConfig {
    /// Expand `${VAR_NAME}` from the environment; unknown variables become empty.
    fn expand_env_vars(value: &str) -> String {
        let mut result = String::new();
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' && chars.peek() == Some(&'{') {
                chars.next();

                let mut var_name = String::new();
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                    var_name.push(c);
                }

                if let Ok(env_value) = std::env::var(&var_name) {
                    result.push_str(&env_value);
                }
            } else {
                result.push(c);
            }
        }

        result
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let cfg = Self::parse_toml(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn parse_toml(content: &str) -> crate::Result<Self> {
        let expanded = Self::expand_env_vars(content);
        let toml: TomlConfig = toml::from_str(&expanded)?;
        Self::from_toml_config(toml)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file {}: {}", path.display(), e)))?;

        // Validated after overrides, which may repair file values
        let mut cfg = Self::parse_toml(&content)?;
        cfg.apply_env_overrides();
        cfg.validate()?;

        debug!(path = %path.display(), "Loaded layout configuration");
        Ok(cfg)
    }

    /// Defaults plus environment overrides
    pub fn from_env() -> crate::Result<Self> {
        let mut cfg = Self::default();
        cfg.apply_env_overrides();
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load `eventgrid.toml` from the current directory if present,
    /// otherwise defaults plus environment
    pub fn load() -> crate::Result<Self> {
        if Path::new(CONFIG_FILE_NAME).exists() {
            return Self::from_toml_file(CONFIG_FILE_NAME);
        }
        Self::from_env()
    }

    fn from_toml_config(toml: TomlConfig) -> crate::Result<Self> {
        let layout = toml.layout.unwrap_or_default();
        let events = toml.events.unwrap_or_default();

        let week_start = match layout.week_start {
            Some(value) => value.parse().map_err(Error::Config)?,
            None => WeekStart::default(),
        };

        Ok(LayoutConfig {
            max_visible_rows: layout.max_visible_rows.unwrap_or_else(default_max_visible_rows),
            week_start,
            working_hours: layout.working_hours.unwrap_or_default(),
            events_path: events.path,
        })
    }

    /// Override settings from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Override settings from an arbitrary variable lookup.
    /// Unparseable values are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(rows) = lookup("EVENTGRID_MAX_VISIBLE_ROWS") {
            if let Ok(rows) = rows.trim().parse() {
                self.max_visible_rows = rows;
            }
        }

        if let Some(week_start) = lookup("EVENTGRID_WEEK_START") {
            if let Ok(week_start) = week_start.parse() {
                self.week_start = week_start;
            }
        }

        if let Some(hours) = lookup("EVENTGRID_WORKING_HOURS") {
            if let Some(hours) = WorkingHours::parse(&hours) {
                self.working_hours = hours;
            }
        }

        if let Some(path) = lookup("EVENTGRID_EVENTS_PATH") {
            if !path.is_empty() {
                self.events_path = Some(path);
            }
        }
    }

    /// Reject settings the layout engine cannot honour
    pub fn validate(&self) -> crate::Result<()> {
        if self.max_visible_rows == 0 {
            return Err(Error::Config("max_visible_rows must be at least 1".to_string()));
        }
        let hours = self.working_hours;
        if hours.end > 24 || hours.start >= hours.end {
            return Err(Error::Config(format!(
                "invalid working hours: {}-{}",
                hours.start, hours.end
            )));
        }
        Ok(())
    }
}
