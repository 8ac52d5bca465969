//! Time source abstraction and date-time input parsing.
//!
//! Recording a lock is the only operation that reads the wall clock, so the
//! clock sits behind a small trait. The binary uses [`RealTimeSource`]; tests
//! pin the moment with [`FixedTimeSource`] or a mock.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Timelike};

/// Trait for abstracting the wall clock.
#[cfg_attr(any(test, feature = "testing-support"), mockall::automock)]
pub trait TimeSource: Send + Sync {
    /// Get the current local time
    fn now(&self) -> DateTime<Local>;
}

/// Real-time implementation that uses actual system time
pub struct RealTimeSource;

impl TimeSource for RealTimeSource {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock frozen at one moment.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource {
    moment: DateTime<Local>,
}

impl FixedTimeSource {
    pub fn new(moment: DateTime<Local>) -> Self {
        Self { moment }
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> DateTime<Local> {
        self.moment
    }
}

/// Error returned when edit input is not a valid date-time.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidDateTime {
    /// The rejected input, verbatim
    pub input: String,
}

impl std::fmt::Display for InvalidDateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid date-time: '{}'", self.input)
    }
}

impl std::error::Error for InvalidDateTime {}

/// Layouts accepted by the edit form, most specific first.
const EDIT_INPUT_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse edit form input into a local moment at minute precision.
///
/// Accepts the form's own `YYYY-MM-DDTHH:MM` layout, the same with seconds,
/// space-separated variants, and full RFC 3339 strings carrying an offset.
/// Seconds and sub-seconds are always dropped because the form edits minutes.
pub fn parse_edit_input(input: &str) -> Result<DateTime<Local>, InvalidDateTime> {
    let invalid = || InvalidDateTime {
        input: input.to_string(),
    };
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
        let truncated = truncate_to_minute(with_offset).ok_or_else(invalid)?;
        return Ok(truncated.with_timezone(&Local));
    }

    let naive = EDIT_INPUT_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(trimmed, layout).ok())
        .and_then(truncate_to_minute)
        .ok_or_else(invalid)?;

    // A wall-clock time skipped by a DST jump has no local instant
    localize(naive).ok_or_else(invalid)
}

/// Interpret a naive wall-clock time in the local zone.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant.
pub fn localize(naive: NaiveDateTime) -> Option<DateTime<Local>> {
    Local.from_local_datetime(&naive).earliest()
}

/// Drop seconds and sub-seconds.
///
/// Only safe on naive or fixed-offset values: on `DateTime<Local>` chrono
/// re-resolves the wall time and yields `None` inside a repeated hour.
pub fn truncate_to_minute<T: Timelike>(value: T) -> Option<T> {
    value.with_second(0)?.with_nanosecond(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, FixedOffset, NaiveDate};

    fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Local> {
        let naive = NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap();
        localize(naive).unwrap()
    }

    #[test]
    fn test_parse_form_layout() {
        let parsed = parse_edit_input("2024-03-06T10:00").unwrap();
        assert_eq!(parsed, local(2024, 3, 6, 10, 0, 0));
    }

    #[test]
    fn test_parse_drops_seconds() {
        let parsed = parse_edit_input("2024-03-06T10:00:45").unwrap();
        assert_eq!(parsed, local(2024, 3, 6, 10, 0, 0));
        assert_eq!(parsed.second(), 0);
    }

    #[test]
    fn test_parse_space_separator_and_whitespace() {
        let parsed = parse_edit_input("  2024-12-31 23:59 ").unwrap();
        assert_eq!(parsed, local(2024, 12, 31, 23, 59, 0));
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let parsed = parse_edit_input("2024-03-06T01:00:30Z").unwrap();
        assert_eq!(parsed.naive_utc().to_string(), "2024-03-06 01:00:00");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", "   ", "not-a-date", "2024-13-01T10:00", "2024-02-30T10:00", "10:00"] {
            let err = parse_edit_input(input).unwrap_err();
            assert_eq!(err.input, input);
        }
    }

    #[test]
    fn test_invalid_datetime_display() {
        let err = InvalidDateTime {
            input: "nope".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid date-time: 'nope'");
    }

    #[test]
    fn test_fixed_time_source() {
        let moment = local(2024, 3, 5, 9, 7, 22);
        let clock = FixedTimeSource::new(moment);
        assert_eq!(clock.now(), moment);
        assert_eq!(clock.now().year(), 2024);
    }

    #[test]
    fn test_truncate_to_minute() {
        let naive = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_milli_opt(9, 7, 22, 481)
            .unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(9, 7, 0)
            .unwrap();
        assert_eq!(truncate_to_minute(naive), Some(expected));
    }

    #[test]
    fn test_truncate_to_minute_in_repeated_hour() {
        // 02:30 on 2024-10-27 occurs twice in Central Europe
        let naive = NaiveDate::from_ymd_opt(2024, 10, 27)
            .unwrap()
            .and_hms_opt(2, 30, 15)
            .unwrap();
        for hours in [2, 1] {
            let offset = FixedOffset::east_opt(hours * 3600).unwrap();
            let moment = offset.from_local_datetime(&naive).unwrap();
            let truncated = truncate_to_minute(moment).unwrap();
            assert_eq!(truncated.offset(), &offset);
            assert_eq!((truncated.hour(), truncated.minute(), truncated.second()), (2, 30, 0));
        }
    }

    #[test]
    fn test_parse_resolves_to_earliest_local_instant() {
        // DST transitions in Europe and North America; whichever zone the
        // host uses, a time that exists must parse to its earliest instant
        for input in [
            "2024-10-27T02:30",
            "2024-10-27T02:30:15",
            "2024-11-03T01:30",
            "2024-03-31T02:30",
            "2024-03-10T02:30",
        ] {
            let naive = NaiveDateTime::parse_from_str(&input[..16], "%Y-%m-%dT%H:%M").unwrap();
            match Local.from_local_datetime(&naive).earliest() {
                Some(expected) => assert_eq!(parse_edit_input(input), Ok(expected)),
                None => assert!(parse_edit_input(input).is_err()),
            }
        }
    }

    #[test]
    fn test_parse_rfc3339_in_repeated_hour() {
        let parsed = parse_edit_input("2024-10-27T02:30:45+01:00").unwrap();
        let expected = DateTime::parse_from_rfc3339("2024-10-27T02:30:00+01:00").unwrap();
        assert_eq!(parsed, expected);
    }
}
