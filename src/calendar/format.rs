use super::models::{CreationReceipt, Event};
use super::slots::FreeSlot;
use crate::error::{CalResult, Error};

/// One `- <start> → <end>: <summary>` line per event, or the explicit
/// no-events sentence for an empty range.
pub fn event_list(events: &[Event], days: u32) -> String {
    if events.is_empty() {
        return format!("No events in the next {} days.", days);
    }

    events
        .iter()
        .map(|event| format!("- {} → {}: {}", event.start, event.end, event.summary))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Slot lines under an availability header, or the explicit no-slots
/// sentence. `date` is echoed as the caller gave it.
pub fn free_slots(date: &str, minimum_minutes: u32, slots: &[FreeSlot]) -> String {
    if slots.is_empty() {
        return format!(
            "No free slots of {}+ minutes on {}.",
            minimum_minutes, date
        );
    }

    let mut lines = vec![format!(
        "Available slots on {} ({}+ min):",
        date, minimum_minutes
    )];
    for slot in slots {
        lines.push(format!(
            "  {} → {}",
            slot.start.format("%H:%M"),
            slot.end.format("%H:%M")
        ));
    }

    lines.join("\n")
}

/// The creation receipt as a JSON object
pub fn creation_receipt(receipt: &CreationReceipt) -> CalResult<String> {
    serde_json::to_string(receipt).map_err(Error::from)
}

/// Uniform rendering of a failed operation
pub fn error_text(error: &Error) -> String {
    format!("Error: {}", error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::models::EventTime;
    use crate::error::validation_error;
    use chrono::{DateTime, NaiveDate, TimeZone};
    use chrono_tz::Europe::Helsinki;

    fn event(summary: &str, start: &str, end: &str) -> Event {
        Event {
            id: Some(String::from("evt-1")),
            summary: String::from(summary),
            description: None,
            html_link: None,
            start: EventTime::DateTime(DateTime::parse_from_rfc3339(start).unwrap()),
            end: EventTime::DateTime(DateTime::parse_from_rfc3339(end).unwrap()),
        }
    }

    #[test]
    fn test_event_list_lines() {
        let events = vec![event(
            "Standup",
            "2026-02-24T09:00:00+02:00",
            "2026-02-24T09:30:00+02:00",
        )];
        assert_eq!(
            event_list(&events, 7),
            "- 2026-02-24T09:00:00+02:00 → 2026-02-24T09:30:00+02:00: Standup"
        );
    }

    #[test]
    fn test_event_list_all_day_uses_bare_date() {
        let all_day = Event {
            id: None,
            summary: String::from("Vacation"),
            description: None,
            html_link: None,
            start: EventTime::Date(NaiveDate::from_ymd_opt(2026, 2, 24).unwrap()),
            end: EventTime::Date(NaiveDate::from_ymd_opt(2026, 2, 25).unwrap()),
        };
        assert_eq!(
            event_list(&[all_day], 7),
            "- 2026-02-24 → 2026-02-25: Vacation"
        );
    }

    #[test]
    fn test_event_list_empty_sentence() {
        assert_eq!(event_list(&[], 7), "No events in the next 7 days.");
        assert_eq!(event_list(&[], 1), "No events in the next 1 days.");
    }

    #[test]
    fn test_free_slots_rendering() {
        let slots = vec![
            FreeSlot::new(
                Helsinki.with_ymd_and_hms(2026, 2, 24, 8, 0, 0).unwrap(),
                Helsinki.with_ymd_and_hms(2026, 2, 24, 10, 0, 0).unwrap(),
            ),
            FreeSlot::new(
                Helsinki.with_ymd_and_hms(2026, 2, 24, 11, 0, 0).unwrap(),
                Helsinki.with_ymd_and_hms(2026, 2, 24, 18, 0, 0).unwrap(),
            ),
        ];
        assert_eq!(
            free_slots("2026-02-24", 30, &slots),
            "Available slots on 2026-02-24 (30+ min):\n  08:00 → 10:00\n  11:00 → 18:00"
        );
    }

    #[test]
    fn test_free_slots_empty_sentence() {
        assert_eq!(
            free_slots("2026-02-24", 60, &[]),
            "No free slots of 60+ minutes on 2026-02-24."
        );
    }

    #[test]
    fn test_creation_receipt_shape() {
        let stored = Event {
            html_link: Some(String::from("https://calendar.google.com/event?eid=abc")),
            ..event(
                "Lunch",
                "2026-02-24T12:00:00+02:00",
                "2026-02-24T13:00:00+02:00",
            )
        };
        let receipt = CreationReceipt::created(&stored);
        let json: serde_json::Value =
            serde_json::from_str(&creation_receipt(&receipt).unwrap()).unwrap();
        assert_eq!(json["status"], "created");
        assert_eq!(json["id"], "evt-1");
        assert_eq!(json["link"], "https://calendar.google.com/event?eid=abc");
        assert_eq!(json["summary"], "Lunch");
    }

    #[test]
    fn test_error_text_prefix() {
        let error = validation_error("Invalid date 'tomorrow'");
        assert_eq!(
            error_text(&error),
            "Error: Validation error: Invalid date 'tomorrow'"
        );
    }
}
