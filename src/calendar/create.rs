use chrono_tz::Tz;
use tracing::info;

use super::models::{CreationReceipt, Event, EventDraft, EventTime};
use super::time::{localize, parse_datetime};
use crate::backend::CalendarBackend;
use crate::error::{validation_error, CalResult};

/// Write side of the calendar: validates a draft and stores it through an
/// injected backend.
pub struct EventCreator<B: CalendarBackend> {
    backend: B,
    zone: Tz,
}

impl<B: CalendarBackend> EventCreator<B> {
    /// Create an event creator localizing drafts into the given zone
    pub fn new(backend: B, zone: Tz) -> Self {
        Self { backend, zone }
    }

    /// Validate a draft and create the event, returning a receipt with the
    /// backend-assigned id and link.
    ///
    /// Rejected before anything reaches the backend: a blank summary, a
    /// malformed timestamp, and a range whose end precedes its start.
    pub async fn create_event(
        &self,
        draft: &EventDraft,
        calendar_id: &str,
    ) -> CalResult<CreationReceipt> {
        if draft.summary.trim().is_empty() {
            return Err(validation_error("Event summary must not be empty"));
        }

        let start = parse_datetime(&draft.start)?;
        let end = parse_datetime(&draft.end)?;
        if end < start {
            return Err(validation_error(&format!(
                "Event end {} is earlier than start {}",
                end, start
            )));
        }

        let event = Event {
            id: None,
            summary: draft.summary.clone(),
            description: draft.description.clone(),
            html_link: None,
            start: EventTime::DateTime(localize(self.zone, start)?.fixed_offset()),
            end: EventTime::DateTime(localize(self.zone, end)?.fixed_offset()),
        };

        let created = self.backend.insert_event(calendar_id, &event).await?;
        info!("Created event '{}' on calendar {}", created.summary, calendar_id);

        Ok(CreationReceipt::created(&created))
    }
}
