//! Date-time attached to an expense.
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, de};

/// Epoch values whose magnitude exceeds this are read as milliseconds.
const MILLIS_THRESHOLD: f64 = 2e10;

/// Point in time of an expense, as supplied by the client.
///
/// Accepted inputs:
///
/// - a local date-time without offset (`2024-01-01T00:00:00`),
/// - an RFC 3339 value with an offset, like the one produced by a browser
///   `Date` (`2024-01-01T10:30:00.000Z`),
/// - a bare date (`2024-01-01`), read as midnight without offset,
/// - a number of seconds since the Unix epoch (milliseconds once the value
///   exceeds `2e10` in magnitude), read as UTC.
///
/// Naive values serialize back without offset, everything else with one.
///
/// `Display` writes the date and the time separated by a space, microseconds
/// only when non-zero, then the offset if any. This is the form used by the
/// CSV export:
///
/// ```rust
/// use engine::Timestamp;
///
/// let ts: Timestamp = serde_json::from_str("\"2024-01-01T10:30:00.5Z\"").unwrap();
/// assert_eq!(ts.to_string(), "2024-01-01 10:30:00.500000+00:00");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Timestamp {
    Naive(NaiveDateTime),
    Offset(DateTime<FixedOffset>),
}

/// Every shape a client may send for a [`Timestamp`].
#[derive(Deserialize)]
#[serde(untagged)]
enum TimestampInput {
    Naive(NaiveDateTime),
    Offset(DateTime<FixedOffset>),
    Date(NaiveDate),
    Epoch(f64),
}

impl Timestamp {
    fn from_epoch(value: f64) -> Option<Self> {
        let seconds = if value.abs() > MILLIS_THRESHOLD {
            value / 1_000.0
        } else {
            value
        };
        let whole = seconds.floor();
        let micros = ((seconds - whole) * 1e6).round() as u32;
        let (whole, micros) = if micros == 1_000_000 {
            (whole + 1.0, 0)
        } else {
            (whole, micros)
        };

        DateTime::from_timestamp(whole as i64, micros * 1_000)
            .map(|utc| Self::Offset(utc.fixed_offset()))
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match TimestampInput::deserialize(deserializer)? {
            TimestampInput::Naive(value) => Ok(Self::Naive(value)),
            TimestampInput::Offset(value) => Ok(Self::Offset(value)),
            TimestampInput::Date(value) => Ok(Self::Naive(value.and_time(Default::default()))),
            TimestampInput::Epoch(value) => Self::from_epoch(value)
                .ok_or_else(|| de::Error::custom(format!("timestamp {value} out of range"))),
        }
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(value: NaiveDateTime) -> Self {
        Self::Naive(value)
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::Offset(value)
    }
}

fn write_local(f: &mut fmt::Formatter<'_>, value: &NaiveDateTime) -> fmt::Result {
    write!(f, "{}", value.format("%Y-%m-%d %H:%M:%S"))?;
    let micros = value.nanosecond() / 1_000;
    if micros != 0 {
        write!(f, ".{micros:06}")?;
    }
    Ok(())
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Naive(value) => write_local(f, value),
            Self::Offset(value) => {
                write_local(f, &value.naive_local())?;
                write!(f, "{}", value.format("%:z"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_year() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap()
    }

    #[test]
    fn naive_input_stays_naive() {
        let ts: Timestamp = serde_json::from_str("\"2024-01-01T00:00:00\"").unwrap();
        assert_eq!(ts, Timestamp::Naive(new_year()));
        assert_eq!(
            serde_json::to_string(&ts).unwrap(),
            "\"2024-01-01T00:00:00\""
        );
    }

    #[test]
    fn browser_dates_keep_their_offset() {
        let ts: Timestamp = serde_json::from_str("\"2024-01-01T10:30:00.000Z\"").unwrap();
        let Timestamp::Offset(value) = ts else {
            panic!("expected an offset timestamp, got {ts:?}");
        };
        assert_eq!(value.offset().local_minus_utc(), 0);
        assert_eq!(ts.to_string(), "2024-01-01 10:30:00+00:00");
    }

    #[test]
    fn display_separates_date_and_time_with_space() {
        assert_eq!(Timestamp::from(new_year()).to_string(), "2024-01-01 00:00:00");
    }

    #[test]
    fn display_pads_fractions_to_microseconds() {
        let ts: Timestamp = serde_json::from_str("\"2024-01-01T00:00:00.5\"").unwrap();
        assert_eq!(ts.to_string(), "2024-01-01 00:00:00.500000");

        let ts: Timestamp = serde_json::from_str("\"2024-01-01T08:00:00.25+02:00\"").unwrap();
        assert_eq!(ts.to_string(), "2024-01-01 08:00:00.250000+02:00");
    }

    #[test]
    fn bare_date_is_midnight() {
        let ts: Timestamp = serde_json::from_str("\"2024-01-01\"").unwrap();
        assert_eq!(ts, Timestamp::Naive(new_year()));
    }

    #[test]
    fn epoch_seconds_are_utc() {
        let ts: Timestamp = serde_json::from_str("1704067200").unwrap();
        assert_eq!(ts.to_string(), "2024-01-01 00:00:00+00:00");

        let ts: Timestamp = serde_json::from_str("1704067200.25").unwrap();
        assert_eq!(ts.to_string(), "2024-01-01 00:00:00.250000+00:00");
    }

    #[test]
    fn large_epoch_values_are_milliseconds() {
        let ts: Timestamp = serde_json::from_str("1704067200000").unwrap();
        assert_eq!(ts.to_string(), "2024-01-01 00:00:00+00:00");
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(serde_json::from_str::<Timestamp>("\"yesterday\"").is_err());
        assert!(serde_json::from_str::<Timestamp>("true").is_err());
        assert!(serde_json::from_str::<Timestamp>("1e300").is_err());
    }
}
