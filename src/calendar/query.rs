use chrono::{Duration, Utc};
use chrono_tz::Tz;
use tracing::debug;

use super::models::Event;
use super::slots::{busy_intervals, find_free_slots, merge_busy_intervals, FreeSlot, Window};
use super::time::parse_date;
use crate::backend::CalendarBackend;
use crate::error::{validation_error, CalResult};

/// Read side of the calendar: upcoming events and free-time computation
/// over an injected backend.
pub struct CalendarQuery<B: CalendarBackend> {
    backend: B,
    zone: Tz,
}

impl<B: CalendarBackend> CalendarQuery<B> {
    /// Create a query facade computing in the given zone
    pub fn new(backend: B, zone: Tz) -> Self {
        Self { backend, zone }
    }

    /// Fetch all events in `[now, now + days)`, ascending by start time.
    ///
    /// A day range with nothing scheduled is a legitimate empty result,
    /// not an error. A day count pushing the window end past the
    /// supported calendar range is rejected.
    pub async fn list_events(&self, days: u32, calendar_id: &str) -> CalResult<Vec<Event>> {
        let time_min = Utc::now();
        let time_max = time_min
            .checked_add_signed(Duration::days(days as i64))
            .ok_or_else(|| validation_error(&format!("Day count {} is out of range", days)))?;

        let events = self
            .backend
            .query_events(calendar_id, time_min, time_max)
            .await?;
        debug!("Fetched {} events for the next {} days", events.len(), days);

        Ok(events)
    }

    /// Compute free slots of at least `minimum_minutes` inside the fixed
    /// 08:00-18:00 working-day window of `date` (YYYY-MM-DD).
    ///
    /// Timed events become busy intervals in the query zone; all-day
    /// events are ignored. A fully booked day yields an empty slot list.
    pub async fn find_free_time(
        &self,
        date: &str,
        minimum_minutes: u32,
        calendar_id: &str,
    ) -> CalResult<Vec<FreeSlot>> {
        let date = parse_date(date)?;
        if minimum_minutes == 0 {
            return Err(validation_error("Minimum duration must be at least one minute"));
        }

        let window = Window::working_day(self.zone, date)?;
        let events = self
            .backend
            .query_events(
                calendar_id,
                window.start.with_timezone(&Utc),
                window.end.with_timezone(&Utc),
            )
            .await?;

        let busy = merge_busy_intervals(busy_intervals(&events, self.zone));
        let slots = find_free_slots(&window, &busy, Duration::minutes(minimum_minutes as i64));
        debug!(
            "Found {} free slots of {}+ minutes on {}",
            slots.len(),
            minimum_minutes,
            date
        );

        Ok(slots)
    }
}
