//! Event set loading

use crate::error::{Error, Result};
use crate::models::CalendarEvent;
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Validated, ordered set of events
#[derive(Debug, Clone, Default)]
pub struct EventSet {
    events: Vec<CalendarEvent>,
}

impl EventSet {
    /// Build a set, rejecting inverted ranges and duplicate ids
    pub fn new(events: Vec<CalendarEvent>) -> Result<Self> {
        let mut seen = HashSet::new();
        for event in &events {
            event.validate()?;
            if !seen.insert(event.id.as_str()) {
                return Err(Error::DuplicateId(event.id.clone()));
            }
        }
        Ok(Self { events })
    }

    /// Parse a JSON document: a bare array or `{ "events": [...] }`.
    ///
    /// Errors from individual events (bad timestamps, missing fields) are
    /// reported as-is.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let list = match serde_json::from_str::<Value>(json)? {
            Value::Object(mut map) => map.remove("events").unwrap_or(Value::Null),
            other => other,
        };
        let events: Vec<CalendarEvent> = serde_json::from_value(list)?;
        Self::new(events)
    }

    /// Read and parse a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let set = Self::from_json_str(&content)?;
        debug!(path = %path.display(), count = set.len(), "Loaded events");
        Ok(set)
    }

    /// Events in input order
    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    /// Number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Consume the set
    pub fn into_events(self) -> Vec<CalendarEvent> {
        self.events
    }
}
