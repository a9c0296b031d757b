//! Boundary to the external calendar store. The core only ever talks to
//! the [`CalendarBackend`] trait; the Google implementation owns the
//! whole authentication lifecycle.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::calendar::models::Event;
use crate::error::CalResult;

mod google;
mod token;

pub use google::GoogleCalendarBackend;
pub use token::TokenManager;

/// Calendar store the query and create facades operate against.
///
/// Implementations are injected by the caller; nothing in the core
/// constructs one on its own.
#[async_trait]
pub trait CalendarBackend: Send + Sync {
    /// Events overlapping `[time_min, time_max)`, ascending by start time
    async fn query_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> CalResult<Vec<Event>>;

    /// Store a new event. The returned copy carries the backend-assigned
    /// id and browser link.
    async fn insert_event(&self, calendar_id: &str, event: &Event) -> CalResult<Event>;
}
