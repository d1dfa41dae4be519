//! Canonical text forms for dates and timestamps
//!
//! Dates are persisted as `DD-MM-YYYY` text and converted back to calendar
//! values on load. The serde adapters here are used with `#[serde(with = ...)]`.

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};

/// Day-month-year format used for input, persistence and CSV export
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Timestamp format used for goal creation times
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Today's date on the local clock
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Current local timestamp, truncated to whole seconds
pub fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Format a date in the canonical `DD-MM-YYYY` form
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Serde adapter for `NaiveDate` as `DD-MM-YYYY`
pub mod date_text {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::DATE_FORMAT;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let text = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&text, DATE_FORMAT).map_err(de::Error::custom)
    }
}

/// Serde adapter for `NaiveDateTime` as `DD-MM-YYYY HH:MM:SS`
pub mod timestamp_text {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S: Serializer>(
        timestamp: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&timestamp.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&text, TIMESTAMP_FORMAT).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Stamped {
        #[serde(with = "date_text")]
        date: NaiveDate,
        #[serde(with = "timestamp_text")]
        at: NaiveDateTime,
    }

    #[test]
    fn test_text_forms() {
        let value = Stamped {
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            at: NaiveDate::from_ymd_opt(2024, 1, 5)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        };

        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"date":"05-01-2024","at":"05-01-2024 09:30:00"}"#);
        assert_eq!(serde_json::from_str::<Stamped>(&json).unwrap(), value);
    }

    #[test]
    fn test_rejects_iso_dates() {
        let json = r#"{"date":"2024-01-05","at":"05-01-2024 09:30:00"}"#;
        assert!(serde_json::from_str::<Stamped>(json).is_err());
    }

    #[test]
    fn test_now_has_no_subseconds() {
        assert_eq!(now().nanosecond(), 0);
    }
}
