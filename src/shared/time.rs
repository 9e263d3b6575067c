use std::fmt::Display;

use chrono::{NaiveDateTime, ParseError, TimeDelta};
use thiserror::Error;

/// Format used by the fare-collection device for every timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Error, Debug)]
pub enum TimestampError {
    #[error("expected zero-padded YYYY-MM-DD HH:MM:SS")]
    Layout,
    #[error("{0}")]
    Value(#[from] ParseError),
}

/// Strict `YYYY-MM-DD HH:MM:SS`, every field zero padded.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, TimestampError> {
    let value = value.trim();
    if !is_fixed_width(value) {
        return Err(TimestampError::Layout);
    }
    Ok(NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)?)
}

fn is_fixed_width(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 19
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            10 => *b == b' ',
            13 | 16 => *b == b':',
            _ => b.is_ascii_digit(),
        })
}

/// Whole seconds, never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration(u32);

impl From<u32> for Duration {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl Duration {
    pub const ZERO: Duration = Duration(0);

    pub const fn from_seconds(secs: u32) -> Self {
        Self(secs)
    }

    pub const fn from_minutes(minutes: u32) -> Self {
        Self(minutes * 60)
    }

    /// Rounded to the nearest second, negative or non finite input gives zero.
    pub fn from_hours(hours: f64) -> Self {
        if !hours.is_finite() || hours <= 0.0 {
            return Self::ZERO;
        }
        let secs = (hours * 3600.0).round();
        Self(secs.min(u32::MAX as f64) as u32)
    }

    /// `None` when the delta is negative.
    pub fn from_delta(delta: TimeDelta) -> Option<Self> {
        let secs = delta.num_seconds();
        if secs < 0 {
            return None;
        }
        Some(Self(u32::try_from(secs).unwrap_or(u32::MAX)))
    }

    pub const fn as_seconds(&self) -> u32 {
        self.0
    }

    pub fn as_hours(&self) -> f64 {
        self.0 as f64 / 3600.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Hours are a flat count, a 26 hour span prints as `26:00:00`.
    pub fn to_hms_string(&self) -> String {
        let (hours, rest) = (self.0 / 3600, self.0 % 3600);
        format!("{hours:02}:{:02}:{:02}", rest / 60, rest % 60)
    }
}

impl Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hms_string())
    }
}

#[test]
fn hms_test_1() {
    assert_eq!(Duration::from_seconds(0).to_hms_string(), "00:00:00");
}

#[test]
fn hms_test_2() {
    assert_eq!(Duration::from_minutes(90).to_hms_string(), "01:30:00");
}

#[test]
fn hms_test_3() {
    assert_eq!(Duration::from_seconds(3690).to_hms_string(), "01:01:30");
}

#[test]
fn hms_does_not_wrap_test() {
    let duration = Duration::from_seconds(26 * 3600 + 5);
    assert_eq!(duration.to_hms_string(), "26:00:05");
}

#[test]
fn from_hours_test() {
    assert_eq!(Duration::from_hours(70.0 / 45.0).as_seconds(), 5600);
    assert_eq!(Duration::from_hours(-1.0), Duration::ZERO);
}

#[test]
fn parse_timestamp_test() {
    assert!(parse_timestamp("2024-01-15 08:00:00").is_ok());
    assert!(parse_timestamp("15/01/2024 08:00").is_err());
    assert!(parse_timestamp("").is_err());
}

#[test]
fn parse_timestamp_requires_padding_test() {
    assert!(parse_timestamp("2024-1-5 8:0:0").is_err());
    assert!(parse_timestamp("2024-01-05 08:00:0").is_err());
    assert!(parse_timestamp("2024-01-05T08:00:00").is_err());
    assert!(parse_timestamp(" 2024-01-05 08:00:00 ").is_ok());
    assert!(matches!(
        parse_timestamp("2024-02-30 08:00:00"),
        Err(TimestampError::Value(_))
    ));
}
