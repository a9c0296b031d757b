use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::RwLock;
use url::Url;

use super::token::TokenManager;
use super::CalendarBackend;
use crate::calendar::models::{Event, EventTime};
use crate::config::Config;
use crate::error::{auth_error, upstream_error, CalResult};

/// Base URL of the Google Calendar v3 API
const API_BASE_URL: &str = "https://www.googleapis.com/calendar/v3";

/// Calendar backend speaking the Google Calendar v3 REST API
#[derive(Clone)]
pub struct GoogleCalendarBackend {
    config: Arc<RwLock<Config>>,
    token_manager: TokenManager,
    client: Client,
    base_url: String,
}

impl GoogleCalendarBackend {
    pub fn new(config: Arc<RwLock<Config>>) -> Self {
        Self {
            token_manager: TokenManager::new(Arc::clone(&config)),
            config,
            client: Client::new(),
            base_url: API_BASE_URL.to_string(),
        }
    }

    /// Point the backend at a different API root (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Route token refresh calls to a different endpoint (used by tests)
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_manager = self.token_manager.with_token_url(token_url);
        self
    }

    fn events_url(&self, calendar_id: &str) -> CalResult<Url> {
        Url::parse(&format!(
            "{}/calendars/{}/events",
            self.base_url, calendar_id
        ))
        .map_err(|e| upstream_error(&format!("Failed to parse URL: {}", e)))
    }
}

#[async_trait]
impl CalendarBackend for GoogleCalendarBackend {
    async fn query_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> CalResult<Vec<Event>> {
        let access_token = self.token_manager.access_token().await?;

        // Expanded recurring events, ordered by start time
        let mut url = self.events_url(calendar_id)?;
        url.query_pairs_mut()
            .append_pair("timeMin", &time_min.to_rfc3339())
            .append_pair("timeMax", &time_max.to_rfc3339())
            .append_pair("singleEvents", "true")
            .append_pair("orderBy", "startTime");

        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await
            .map_err(|e| upstream_error(&format!("Failed to fetch events: {}", e)))?;

        let payload = check_status(response, "fetch events").await?;
        let items = payload
            .get("items")
            .and_then(|i| i.as_array())
            .ok_or_else(|| upstream_error("No items in events response"))?;

        items.iter().map(parse_event).collect()
    }

    async fn insert_event(&self, calendar_id: &str, event: &Event) -> CalResult<Event> {
        let access_token = self.token_manager.access_token().await?;
        let time_zone = {
            let config_read = self.config.read().await;
            config_read.timezone.clone()
        };

        let url = self.events_url(calendar_id)?;
        let body = event_body(event, &time_zone);

        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", access_token))
            .json(&body)
            .send()
            .await
            .map_err(|e| upstream_error(&format!("Failed to insert event: {}", e)))?;

        let payload = check_status(response, "insert event").await?;
        parse_event(&payload)
    }
}

/// Map HTTP failures onto the error taxonomy and decode the payload
async fn check_status(response: reqwest::Response, action: &str) -> CalResult<Value> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Could not read error response".to_string());
        return Err(auth_error(&format!(
            "Failed to {}: HTTP {} - {}",
            action, status, error_body
        )));
    }
    if !status.is_success() {
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Could not read error response".to_string());
        return Err(upstream_error(&format!(
            "Failed to {}: HTTP {} - {}",
            action, status, error_body
        )));
    }

    response
        .json()
        .await
        .map_err(|e| upstream_error(&format!("Failed to parse {} response: {}", action, e)))
}

/// Wire item to event. Strict about the start and end shapes, tolerant
/// about everything else.
fn parse_event(item: &Value) -> CalResult<Event> {
    let id = item
        .get("id")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());
    let summary = item
        .get("summary")
        .and_then(|v| v.as_str())
        .unwrap_or("Untitled")
        .to_string();
    let description = item
        .get("description")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());
    let html_link = item
        .get("htmlLink")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    let start = parse_event_time(item.get("start"), "start")?;
    let end = parse_event_time(item.get("end"), "end")?;

    Ok(Event {
        id,
        summary,
        description,
        html_link,
        start,
        end,
    })
}

fn parse_event_time(value: Option<&Value>, field: &str) -> CalResult<EventTime> {
    let object = value
        .and_then(|v| v.as_object())
        .ok_or_else(|| upstream_error(&format!("Event missing '{}' object", field)))?;

    if let Some(datetime) = object.get("dateTime").and_then(|v| v.as_str()) {
        let parsed = DateTime::parse_from_rfc3339(datetime).map_err(|e| {
            upstream_error(&format!(
                "Failed to parse '{}' datetime '{}': {}",
                field, datetime, e
            ))
        })?;
        return Ok(EventTime::DateTime(parsed));
    }

    if let Some(date) = object.get("date").and_then(|v| v.as_str()) {
        let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| {
            upstream_error(&format!("Failed to parse '{}' date '{}': {}", field, date, e))
        })?;
        return Ok(EventTime::Date(parsed));
    }

    Err(upstream_error(&format!(
        "Event '{}' has neither dateTime nor date",
        field
    )))
}

/// Event to wire body for insertion
fn event_body(event: &Event, time_zone: &str) -> Value {
    let mut body = json!({
        "summary": event.summary,
        "start": event_time_body(&event.start, time_zone),
        "end": event_time_body(&event.end, time_zone),
    });
    if let Some(description) = &event.description {
        body["description"] = json!(description);
    }
    body
}

fn event_time_body(time: &EventTime, time_zone: &str) -> Value {
    match time {
        EventTime::DateTime(dt) => json!({
            "dateTime": dt.to_rfc3339(),
            "timeZone": time_zone,
        }),
        EventTime::Date(date) => json!({
            "date": date.format("%Y-%m-%d").to_string(),
        }),
    }
}
