use crate::error::{config_error, env_error, CalResult};
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use toml;

/// Calendar queried when the caller does not name one
pub const DEFAULT_CALENDAR_ID: &str = "primary";

/// Timezone of the calendar owner
pub const DEFAULT_TIMEZONE: &str = "Europe/Rome";

/// Where the cached OAuth token lives
pub const DEFAULT_TOKEN_FILE: &str = "/tmp/aikaikkuna-token.json";

/// Optional config file for the non-secret settings
const CONFIG_FILE: &str = "config/calendar.toml";

/// Main configuration structure for the calendar toolkit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Google Calendar API client ID
    pub google_client_id: String,
    /// Google Calendar API client secret
    pub google_client_secret: String,
    /// Default Google Calendar ID to operate on
    pub google_calendar_id: String,
    /// Path of the cached OAuth token JSON file
    pub token_file: String,
    /// Timezone the calendar owner lives in
    pub timezone: String,
}

/// Non-secret overrides read from the optional config file
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    google_calendar_id: Option<String>,
    token_file: Option<String>,
    timezone: Option<String>,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> CalResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        // Required environment variables
        let google_client_id =
            env::var("GOOGLE_CLIENT_ID").map_err(|_| env_error("GOOGLE_CLIENT_ID"))?;
        let google_client_secret =
            env::var("GOOGLE_CLIENT_SECRET").map_err(|_| env_error("GOOGLE_CLIENT_SECRET"))?;

        let mut google_calendar_id = String::from(DEFAULT_CALENDAR_ID);
        let mut token_file = String::from(DEFAULT_TOKEN_FILE);
        let mut timezone = String::from(DEFAULT_TIMEZONE);

        // Non-secret settings may come from an optional config file
        if let Ok(content) = fs::read_to_string(CONFIG_FILE) {
            let overrides: FileConfig = toml::from_str(&content)?;
            if let Some(value) = overrides.google_calendar_id {
                google_calendar_id = value;
            }
            if let Some(value) = overrides.token_file {
                token_file = value;
            }
            if let Some(value) = overrides.timezone {
                timezone = value;
            }
        }

        // Environment variables win over the file
        if let Ok(value) = env::var("GOOGLE_CALENDAR_ID") {
            google_calendar_id = value;
        }
        if let Ok(value) = env::var("GOOGLE_TOKEN_FILE") {
            token_file = value;
        }
        if let Ok(value) = env::var("TIMEZONE") {
            timezone = value;
        }

        Ok(Config {
            google_client_id,
            google_client_secret,
            google_calendar_id,
            token_file,
            timezone,
        })
    }

    /// Parse the configured timezone into a chrono-tz zone
    pub fn zone(&self) -> CalResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| config_error(&format!("Invalid timezone: {}", self.timezone)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn config_with_timezone(timezone: &str) -> Config {
        Config {
            google_client_id: String::from("client-id"),
            google_client_secret: String::from("client-secret"),
            google_calendar_id: String::from(DEFAULT_CALENDAR_ID),
            token_file: String::from(DEFAULT_TOKEN_FILE),
            timezone: String::from(timezone),
        }
    }

    #[test]
    fn parses_known_timezone() {
        let config = config_with_timezone("Europe/Helsinki");
        assert_eq!(config.zone().unwrap(), chrono_tz::Europe::Helsinki);
    }

    #[test]
    fn rejects_unknown_timezone() {
        let config = config_with_timezone("Mars/Olympus_Mons");
        assert!(matches!(config.zone(), Err(Error::Config(_))));
    }
}
