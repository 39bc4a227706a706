//! Fixed text formats for durations and timestamps.

use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::{ReportError, Result};

const NANOS_PER_MICRO: u32 = 1_000;

/// Formats a duration as `H:MM:SS.ffffff`.
///
/// Hours are not wrapped into days, so a 30 hour duration renders as
/// `30:00:00.000000`. Sub-microsecond precision is truncated.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    let micros = duration.subsec_nanos() / NANOS_PER_MICRO;

    format!("{hours}:{minutes:02}:{seconds:02}.{micros:06}")
}

/// Parses a duration written as `H:MM:SS` or `H:MM:SS.f` (up to nine
/// fractional digits).
///
/// # Errors
///
/// Returns [`ReportError::InvalidDuration`] if the string is malformed or
/// minutes/seconds are out of range.
pub fn parse_duration(s: &str) -> Result<Duration> {
    let invalid = || ReportError::InvalidDuration(s.to_string());

    let mut parts = s.trim().splitn(3, ':');
    let (Some(hours), Some(minutes), Some(seconds)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    let hours: u64 = parse_digits(hours).ok_or_else(invalid)?;
    let minutes: u64 = parse_digits(minutes).ok_or_else(invalid)?;
    let (whole, fraction) = seconds.split_once('.').unwrap_or((seconds, ""));
    let seconds: u64 = parse_digits(whole).ok_or_else(invalid)?;

    if minutes >= 60 || seconds >= 60 {
        return Err(invalid());
    }

    let nanos = if fraction.is_empty() {
        0
    } else {
        if fraction.len() > 9 {
            return Err(invalid());
        }
        let digits: u32 = parse_digits(fraction).ok_or_else(invalid)?;
        digits * 10u32.pow(9 - fraction.len() as u32)
    };

    let secs = hours
        .checked_mul(3600)
        .and_then(|h| h.checked_add(minutes * 60 + seconds))
        .ok_or_else(invalid)?;

    Ok(Duration::new(secs, nanos))
}

/// Parses a run of ASCII digits, rejecting signs and whitespace that
/// `str::parse` would otherwise accept or ignore.
fn parse_digits<T: std::str::FromStr>(s: &str) -> Option<T> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Formats a timestamp as RFC 3339 in UTC with microseconds,
/// e.g. `2024-01-15T12:30:45.000000Z`.
#[must_use]
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Serde adapters that route durations and timestamps through the fixed
/// text formats above.
pub(crate) mod serde_text {
    use std::time::Duration;

    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    pub(crate) mod timestamp {
        use super::*;

        pub(crate) fn serialize<S: Serializer>(
            value: &DateTime<Utc>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&crate::format_timestamp(*value))
        }

        pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<DateTime<Utc>, D::Error> {
            let s = String::deserialize(deserializer)?;
            DateTime::parse_from_rfc3339(&s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(D::Error::custom)
        }
    }

    pub(crate) mod opt_timestamp {
        use super::*;

        pub(crate) fn serialize<S: Serializer>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(ts) => serializer.serialize_some(&crate::format_timestamp(*ts)),
                None => serializer.serialize_none(),
            }
        }

        pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|s| {
                    DateTime::parse_from_rfc3339(&s)
                        .map(|dt| dt.with_timezone(&Utc))
                        .map_err(D::Error::custom)
                })
                .transpose()
        }
    }

    pub(crate) mod opt_duration {
        use super::*;

        pub(crate) fn serialize<S: Serializer>(
            value: &Option<Duration>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(d) => serializer.serialize_some(&crate::format_duration(*d)),
                None => serializer.serialize_none(),
            }
        }

        pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Duration>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|s| crate::parse_duration(&s).map_err(D::Error::custom))
                .transpose()
        }
    }
}
