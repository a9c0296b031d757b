use crate::error::{validation_error, CalResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

/// Parse a calendar date in YYYY-MM-DD form
pub fn parse_date(date_str: &str) -> CalResult<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|e| validation_error(&format!("Invalid date '{}': {}", date_str, e)))
}

/// Parse a local datetime in ISO 8601 form; seconds are optional
pub fn parse_datetime(datetime_str: &str) -> CalResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%dT%H:%M"))
        .map_err(|e| validation_error(&format!("Invalid datetime '{}': {}", datetime_str, e)))
}

/// Resolve a naive local time in the given zone
pub fn localize(zone: Tz, naive: NaiveDateTime) -> CalResult<DateTime<Tz>> {
    match zone.from_local_datetime(&naive) {
        chrono::LocalResult::Single(dt) => Ok(dt),
        chrono::LocalResult::Ambiguous(_, _) => {
            Err(validation_error(&format!("Ambiguous local time: {}", naive)))
        }
        chrono::LocalResult::None => {
            Err(validation_error(&format!("Invalid local time: {}", naive)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use chrono::Timelike;
    use chrono_tz::Europe::Helsinki;

    #[test]
    fn test_parse_date() {
        // Valid case
        let date = parse_date("2026-02-24").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 2, 24).unwrap());

        // Invalid cases
        assert!(matches!(parse_date("24.2.2026"), Err(Error::Validation(_))));
        assert!(matches!(parse_date("2026-13-01"), Err(Error::Validation(_))));
        assert!(matches!(parse_date("tomorrow"), Err(Error::Validation(_))));
    }

    #[test]
    fn test_parse_datetime() {
        // With seconds
        let dt = parse_datetime("2026-02-24T10:30:00").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2026-02-24 10:30:00");

        // Without seconds
        let dt = parse_datetime("2026-02-24T10:30").unwrap();
        assert_eq!(dt.second(), 0);
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2026-02-24 10:30");

        // Invalid cases
        assert!(matches!(parse_datetime("2026-02-24 10:30"), Err(Error::Validation(_))));
        assert!(matches!(parse_datetime("10:30"), Err(Error::Validation(_))));
    }

    #[test]
    fn test_localize() {
        // Plain winter time resolves uniquely
        let naive = parse_datetime("2026-02-24T10:00:00").unwrap();
        let dt = localize(Helsinki, naive).unwrap();
        assert_eq!(dt.hour(), 10);

        // 03:30 does not exist on the spring-forward night in Finland
        let naive = parse_datetime("2026-03-29T03:30:00").unwrap();
        assert!(matches!(localize(Helsinki, naive), Err(Error::Validation(_))));

        // 03:30 happens twice on the fall-back night
        let naive = parse_datetime("2026-10-25T03:30:00").unwrap();
        assert!(matches!(localize(Helsinki, naive), Err(Error::Validation(_))));
    }
}
