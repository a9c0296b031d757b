use chrono::{DateTime, Duration, NaiveDate};
use chrono_tz::Tz;
use schemars::JsonSchema;
use serde::Serialize;

use super::models::Event;
use super::time::localize;
use crate::error::{validation_error, CalResult};

/// The working day starts at 08:00 local time. Fixed policy, not configurable.
pub const DAY_START_HOUR: u32 = 8;

/// The working day ends at 18:00 local time. Fixed policy, not configurable.
pub const DAY_END_HOUR: u32 = 18;

/// Half-open `[start, end)` span during which the calendar owner is occupied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusyInterval {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

/// Half-open `[start, end)` gap with no events
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct FreeSlot {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub duration_minutes: i64,
}

impl FreeSlot {
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Self {
        let duration_minutes = (end - start).num_minutes();
        Self {
            start,
            end,
            duration_minutes,
        }
    }
}

/// Half-open day range `[start, end)` that free time is computed against
#[derive(Debug, Clone, Copy)]
pub struct Window {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl Window {
    /// Build the 08:00-18:00 working-day window for a date
    pub fn working_day(zone: Tz, date: NaiveDate) -> CalResult<Self> {
        let start = date
            .and_hms_opt(DAY_START_HOUR, 0, 0)
            .ok_or_else(|| validation_error("Failed to create datetime"))?;
        let end = date
            .and_hms_opt(DAY_END_HOUR, 0, 0)
            .ok_or_else(|| validation_error("Failed to create datetime"))?;
        Ok(Self {
            start: localize(zone, start)?,
            end: localize(zone, end)?,
        })
    }
}

/// Project timed events onto busy intervals in the given zone.
///
/// All-day events carry no time-of-day signal and are skipped, as is any
/// event missing a timed boundary. Instants reported with a foreign UTC
/// offset are converted into `zone` before any comparison happens.
pub fn busy_intervals(events: &[Event], zone: Tz) -> Vec<BusyInterval> {
    events
        .iter()
        .filter_map(|event| {
            let start = event.start.as_datetime()?;
            let end = event.end.as_datetime()?;
            Some(BusyInterval {
                start: start.with_timezone(&zone),
                end: end.with_timezone(&zone),
            })
        })
        .collect()
}

/// Collapse overlapping or touching busy intervals into the minimal
/// disjoint set covering the same spans.
///
/// Zero-length and inverted intervals cannot contribute busy time and are
/// dropped up front. The result is sorted by start and pairwise disjoint,
/// and running the merge again returns it unchanged.
pub fn merge_busy_intervals(mut intervals: Vec<BusyInterval>) -> Vec<BusyInterval> {
    intervals.retain(|interval| interval.start < interval.end);
    intervals.sort_by_key(|interval| (interval.start, interval.end));

    let mut merged: Vec<BusyInterval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        match merged.last_mut() {
            // Touching counts as one continuous busy span
            Some(last) if interval.start <= last.end => {
                if interval.end > last.end {
                    last.end = interval.end;
                }
            }
            _ => merged.push(interval),
        }
    }

    merged
}

/// Sweep the merged busy sequence left to right and collect every gap
/// inside the window lasting at least `minimum`.
///
/// Busy intervals sticking out of the window are clipped to it; intervals
/// entirely outside are ignored. The `busy` slice must already be merged
/// and sorted.
pub fn find_free_slots(window: &Window, busy: &[BusyInterval], minimum: Duration) -> Vec<FreeSlot> {
    let mut slots = Vec::new();
    let mut cursor = window.start;

    for interval in busy {
        if interval.end <= window.start || interval.start >= window.end {
            continue;
        }

        let busy_start = interval.start.max(window.start);
        let busy_end = interval.end.min(window.end);

        if busy_start > cursor && busy_start - cursor >= minimum {
            slots.push(FreeSlot::new(cursor, busy_start));
        }
        if busy_end > cursor {
            cursor = busy_end;
        }
    }

    // Remaining gap between the last busy interval and the end of the day
    if window.end > cursor && window.end - cursor >= minimum {
        slots.push(FreeSlot::new(cursor, window.end));
    }

    slots
}
