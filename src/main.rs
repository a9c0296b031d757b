use std::sync::Arc;

use aikaikkuna::backend::GoogleCalendarBackend;
use aikaikkuna::calendar::{format, CalendarQuery, EventCreator, EventDraft};
use aikaikkuna::error::{validation_error, CalResult};
use aikaikkuna::startup;
use tracing::info;

/// Events are listed this many days ahead unless the caller says otherwise
const DEFAULT_LIST_DAYS: u32 = 7;

/// Free slots must last at least this many minutes unless overridden
const DEFAULT_MINIMUM_MINUTES: u32 = 60;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return Ok(());
    }
    if matches!(args[1].as_str(), "help" | "--help" | "-h") {
        print_usage();
        return Ok(());
    }

    // Load configuration
    let config = startup::load_config()?;
    let (zone, default_calendar) = {
        let config_read = config.read().await;
        (config_read.zone()?, config_read.google_calendar_id.clone())
    };
    let backend = GoogleCalendarBackend::new(Arc::clone(&config));

    info!("Running '{}' against calendar {}", args[1], default_calendar);

    let output = match args[1].as_str() {
        "list-events" => {
            let days = numeric_arg(args.get(2), DEFAULT_LIST_DAYS, "day count");
            let calendar_id = args.get(3).cloned().unwrap_or(default_calendar);

            let query = CalendarQuery::new(backend, zone);
            match days {
                Ok(days) => match query.list_events(days, &calendar_id).await {
                    Ok(events) => format::event_list(&events, days),
                    Err(e) => format::error_text(&e),
                },
                Err(e) => format::error_text(&e),
            }
        }
        "find-free-time" => {
            let Some(date) = args.get(2) else {
                print_usage();
                return Ok(());
            };
            let minimum_minutes = numeric_arg(args.get(3), DEFAULT_MINIMUM_MINUTES, "minute count");
            let calendar_id = args.get(4).cloned().unwrap_or(default_calendar);

            let query = CalendarQuery::new(backend, zone);
            match minimum_minutes {
                Ok(minimum_minutes) => {
                    match query.find_free_time(date, minimum_minutes, &calendar_id).await {
                        Ok(slots) => format::free_slots(date, minimum_minutes, &slots),
                        Err(e) => format::error_text(&e),
                    }
                }
                Err(e) => format::error_text(&e),
            }
        }
        "create-event" => {
            if args.len() < 5 {
                print_usage();
                return Ok(());
            }
            let draft = EventDraft {
                summary: args[2].clone(),
                start: args[3].clone(),
                end: args[4].clone(),
                description: args.get(5).cloned(),
            };
            let calendar_id = args.get(6).cloned().unwrap_or(default_calendar);

            let creator = EventCreator::new(backend, zone);
            match creator.create_event(&draft, &calendar_id).await {
                Ok(receipt) => format::creation_receipt(&receipt)?,
                Err(e) => format::error_text(&e),
            }
        }
        other => {
            eprintln!("Unknown subcommand '{}'", other);
            print_usage();
            return Ok(());
        }
    };

    println!("{}", output);
    Ok(())
}

/// Parse an optional numeric argument. An absent argument falls back to
/// the default; a present but malformed one is a validation failure.
fn numeric_arg(raw: Option<&String>, default: u32, what: &str) -> CalResult<u32> {
    match raw {
        Some(value) => value
            .parse::<u32>()
            .map_err(|_| validation_error(&format!("Invalid {} '{}'", what, value))),
        None => Ok(default),
    }
}

fn print_usage() {
    println!("usage: aikaikkuna <command> [args]");
    println!();
    println!("commands:");
    println!("  list-events [days] [calendar-id]");
    println!("      List events for the coming days (default {})", DEFAULT_LIST_DAYS);
    println!("  find-free-time <date> [minutes] [calendar-id]");
    println!("      Free slots of at least [minutes] (default {}) on <date>, 08:00-18:00", DEFAULT_MINIMUM_MINUTES);
    println!("  create-event <summary> <start> <end> [description] [calendar-id]");
    println!("      Create an event; times are local, e.g. 2026-02-24T10:00:00");
}
