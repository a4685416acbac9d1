use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of simulation time units (minutes).
pub type Minutes = u32;

const MINUTES_PER_HOUR: Minutes = 60;
const HOURS_PER_DAY: Minutes = 24;

/// Error returned when a timestamp cannot be parsed from its `HH:MM` form.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TimestampError {
    /// The input is not of the form `HH:MM`.
    #[error("invalid timestamp `{0}`: expected HH:MM")]
    Format(String),
    /// Hours or minutes are out of range.
    #[error("invalid timestamp `{0}`: hours must be below 24 and minutes below 60")]
    OutOfRange(String),
}

/// A point in simulation time, with minute resolution.
///
/// Internally, this is the number of minutes since `00:00` of the first day. It never wraps
/// around; only the `HH:MM` rendering is taken modulo 24 hours.
#[derive(
    Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone, Serialize, Deserialize,
)]
#[serde(into = "String", try_from = "String")]
pub struct Timestamp(Minutes);

impl Timestamp {
    /// Midnight of the first simulated day.
    pub const MIDNIGHT: Self = Self(0);

    /// Constructs a timestamp from hours and minutes of the first day.
    ///
    /// # Panics
    ///
    /// Panics if `hours >= 24` or `minutes >= 60`.
    #[must_use]
    pub fn hm(hours: Minutes, minutes: Minutes) -> Self {
        assert!(
            hours < HOURS_PER_DAY && minutes < MINUTES_PER_HOUR,
            "invalid time of day {}:{}",
            hours,
            minutes
        );
        Self(hours * MINUTES_PER_HOUR + minutes)
    }

    /// Minutes since midnight of the first day.
    #[must_use]
    pub fn minutes(self) -> Minutes {
        self.0
    }

    /// Returns the timestamp `minutes` later.
    #[must_use]
    pub fn plus(self, minutes: Minutes) -> Self {
        Self(self.0 + minutes)
    }

    /// Returns the number of minutes elapsed since `earlier`, or `None` if `earlier` is in
    /// the future.
    #[must_use]
    pub fn since(self, earlier: Self) -> Option<Minutes> {
        self.0.checked_sub(earlier.0)
    }
}

impl From<Minutes> for Timestamp {
    fn from(minutes: Minutes) -> Self {
        Self(minutes)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}",
            (self.0 / MINUTES_PER_HOUR) % HOURS_PER_DAY,
            self.0 % MINUTES_PER_HOUR
        )
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let format_error = || TimestampError::Format(input.to_string());
        let (hours, minutes) = match input.split_once(':') {
            Some((h, m)) if h.len() == 2 && m.len() == 2 => (h, m),
            _ => return Err(format_error()),
        };
        let parse = |part: &str| {
            if part.bytes().all(|b| b.is_ascii_digit()) {
                part.parse::<Minutes>().map_err(|_| format_error())
            } else {
                Err(format_error())
            }
        };
        let (hours, minutes) = (parse(hours)?, parse(minutes)?);
        if hours >= HOURS_PER_DAY || minutes >= MINUTES_PER_HOUR {
            return Err(TimestampError::OutOfRange(input.to_string()));
        }
        Ok(Self(hours * MINUTES_PER_HOUR + minutes))
    }
}

impl From<Timestamp> for String {
    fn from(timestamp: Timestamp) -> Self {
        timestamp.to_string()
    }
}

impl std::convert::TryFrom<String> for Timestamp {
    type Error = TimestampError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Formats a duration in minutes as `H:MM`, e.g., `1:05` for 65 minutes.
#[must_use]
pub fn format_duration(minutes: u64) -> String {
    format!("{}:{:02}", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[rstest(
        input,
        expected,
        case("08:00", Timestamp::hm(8, 0)),
        case("00:00", Timestamp::MIDNIGHT),
        case("23:59", Timestamp::hm(23, 59)),
        case(" 12:30\n", Timestamp::hm(12, 30))
    )]
    fn test_parse(input: &str, expected: Timestamp) {
        assert_eq!(input.parse::<Timestamp>(), Ok(expected));
    }

    #[rstest(input, case("8:00"), case("08-00"), case("ab:cd"), case("08:+1"), case(""))]
    fn test_parse_malformed(input: &str) {
        assert_eq!(
            input.parse::<Timestamp>(),
            Err(TimestampError::Format(input.trim().to_string()))
        );
    }

    #[rstest(input, case("24:00"), case("10:60"))]
    fn test_parse_out_of_range(input: &str) {
        assert_eq!(
            input.parse::<Timestamp>(),
            Err(TimestampError::OutOfRange(input.to_string()))
        );
    }

    #[test]
    fn test_display_wraps_at_midnight() {
        assert_eq!(Timestamp::hm(8, 5).to_string(), "08:05");
        assert_eq!(Timestamp::hm(23, 50).plus(15).to_string(), "00:05");
        assert_eq!(Timestamp::hm(23, 50).plus(15).minutes(), 24 * 60 + 5);
    }

    #[test]
    fn test_since() {
        let eight = Timestamp::hm(8, 0);
        assert_eq!(eight.plus(45).since(eight), Some(45));
        assert_eq!(eight.since(eight), Some(0));
        assert_eq!(eight.since(eight.plus(1)), None);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(45), "0:45");
        assert_eq!(format_duration(125), "2:05");
    }

    #[test]
    fn test_serialize() {
        assert_eq!(
            serde_json::to_string(&Timestamp::hm(8, 3)).unwrap(),
            r#""08:03""#
        );
        assert_eq!(
            serde_json::from_str::<Timestamp>(r#""17:45""#).unwrap(),
            Timestamp::hm(17, 45)
        );
    }
}
