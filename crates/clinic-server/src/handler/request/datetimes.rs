//! Lenient timestamp parsing for request bodies.
//!
//! Accepts RFC 3339 timestamps (`2024-01-01T09:00:00Z`) as well as civil
//! date-times without an offset (`2024-01-01 09:00:00`), which are read as
//! UTC.

use jiff::Timestamp;
use jiff::civil::DateTime;
use jiff::tz::TimeZone;
use serde::{Deserialize, Deserializer};

/// Parses a timestamp with or without an offset.
pub(crate) fn parse_timestamp(value: &str) -> Option<Timestamp> {
    let value = value.trim();
    if let Ok(timestamp) = value.parse::<Timestamp>() {
        return Some(timestamp);
    }

    let datetime = value.parse::<DateTime>().ok()?;
    datetime
        .to_zoned(TimeZone::UTC)
        .ok()
        .map(|zoned| zoned.timestamp())
}

/// Deserializes a required timestamp with [`parse_timestamp`].
pub(crate) fn timestamp<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_timestamp(&value).ok_or_else(|| {
        serde::de::Error::custom(format!("'{value}' is not a valid date and time"))
    })
}

/// Deserializes an optional timestamp with [`parse_timestamp`].
pub(crate) fn option_timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(value) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };

    parse_timestamp(&value).map(Some).ok_or_else(|| {
        serde::de::Error::custom(format!("'{value}' is not a valid date and time"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_respected() {
        let timestamp = parse_timestamp("2024-01-01T11:00:00+02:00").unwrap();
        assert_eq!(timestamp, "2024-01-01T09:00:00Z".parse().unwrap());
    }

    #[test]
    fn civil_datetimes_are_utc() {
        let expected: Timestamp = "2024-01-01T09:00:00Z".parse().unwrap();
        assert_eq!(parse_timestamp("2024-01-01 09:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01T09:00"), Some(expected));
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(parse_timestamp("next tuesday"), None);
        assert_eq!(parse_timestamp(""), None);
    }
}
