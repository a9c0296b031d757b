use chrono::{DateTime, FixedOffset, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Start or end of a calendar event. Timed events carry a full instant
/// with its UTC offset, all-day events only a date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum EventTime {
    DateTime(DateTime<FixedOffset>),
    Date(NaiveDate),
}

impl EventTime {
    /// The timed instant, unless this is an all-day boundary
    pub fn as_datetime(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            EventTime::DateTime(dt) => Some(*dt),
            EventTime::Date(_) => None,
        }
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventTime::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            EventTime::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

/// Calendar event as read from or submitted to the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Event {
    /// Backend-assigned identifier, absent until the event is stored
    pub id: Option<String>,
    pub summary: String,
    pub description: Option<String>,
    /// Browser link to the stored event
    pub html_link: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
}

impl Event {
    /// All-day events have date-only boundaries
    pub fn is_all_day(&self) -> bool {
        matches!(self.start, EventTime::Date(_))
    }
}

/// New event as the caller hands it over, before validation
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EventDraft {
    pub summary: String,
    /// Local datetime in ISO 8601 form, e.g. `2026-02-24T10:00:00`;
    /// seconds may be omitted
    pub start: String,
    /// Local datetime in the same form as `start`
    pub end: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Confirmation handed back after a successful creation
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreationReceipt {
    pub status: String,
    pub id: Option<String>,
    pub link: Option<String>,
    pub summary: String,
}

impl CreationReceipt {
    /// Receipt for a freshly stored event
    pub fn created(event: &Event) -> Self {
        Self {
            status: String::from("created"),
            id: event.id.clone(),
            link: event.html_link.clone(),
            summary: event.summary.clone(),
        }
    }
}
