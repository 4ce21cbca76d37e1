//! Time-of-day value object (minutes since midnight).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// A wall-clock time of day, stored as whole minutes since midnight.
///
/// Valid range is 0 ("00:00") through 1439 ("23:59"). Availability window
/// edges are parsed into this type once, at the persistence or API boundary,
/// so the slot generator never touches "HH:MM" strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Midnight ("00:00").
    pub const MIDNIGHT: Self = Self(0);

    /// The last representable minute of a day ("23:59").
    pub const END_OF_DAY: Self = Self(1439);

    /// Creates a TimeOfDay, returning error if past the end of the day.
    pub fn try_new(minutes: u16) -> Result<Self, ValidationError> {
        if minutes > 1439 {
            return Err(ValidationError::out_of_range(
                "time_of_day",
                0,
                1439,
                minutes as i32,
            ));
        }
        Ok(Self(minutes))
    }

    /// Creates a TimeOfDay from hour and minute components.
    pub fn from_hm(hour: u16, minute: u16) -> Result<Self, ValidationError> {
        if hour > 23 {
            return Err(ValidationError::out_of_range("hour", 0, 23, hour as i32));
        }
        if minute > 59 {
            return Err(ValidationError::out_of_range(
                "minute",
                0,
                59,
                minute as i32,
            ));
        }
        Ok(Self(hour * 60 + minute))
    }

    /// Returns the value as minutes since midnight.
    pub fn minutes(&self) -> u16 {
        self.0
    }

    /// Returns the hour component (0-23).
    pub fn hour(&self) -> u16 {
        self.0 / 60
    }

    /// Returns the minute component (0-59).
    pub fn minute(&self) -> u16 {
        self.0 % 60
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = ValidationError;

    /// Parses the "HH:MM" form used by the persisted availability shape.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (h, m) = s
            .split_once(':')
            .ok_or_else(|| ValidationError::invalid_format("time_of_day", "expected HH:MM"))?;
        let hour: u16 = h
            .parse()
            .map_err(|_| ValidationError::invalid_format("time_of_day", "non-numeric hour"))?;
        let minute: u16 = m
            .parse()
            .map_err(|_| ValidationError::invalid_format("time_of_day", "non-numeric minute"))?;
        Self::from_hm(hour, minute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_of_day_try_new_accepts_valid_values() {
        assert_eq!(TimeOfDay::try_new(0).unwrap().minutes(), 0);
        assert_eq!(TimeOfDay::try_new(540).unwrap().minutes(), 540);
        assert_eq!(TimeOfDay::try_new(1439).unwrap().minutes(), 1439);
    }

    #[test]
    fn time_of_day_try_new_rejects_past_end_of_day() {
        let result = TimeOfDay::try_new(1440);
        match result {
            Err(ValidationError::OutOfRange { field, min, max, actual }) => {
                assert_eq!(field, "time_of_day");
                assert_eq!(min, 0);
                assert_eq!(max, 1439);
                assert_eq!(actual, 1440);
            }
            _ => panic!("Expected OutOfRange error"),
        }
    }

    #[test]
    fn time_of_day_from_hm_computes_minutes() {
        let t = TimeOfDay::from_hm(9, 30).unwrap();
        assert_eq!(t.minutes(), 570);
        assert_eq!(t.hour(), 9);
        assert_eq!(t.minute(), 30);
    }

    #[test]
    fn time_of_day_from_hm_rejects_bad_components() {
        assert!(TimeOfDay::from_hm(24, 0).is_err());
        assert!(TimeOfDay::from_hm(12, 60).is_err());
    }

    #[test]
    fn time_of_day_parses_from_hh_mm_string() {
        let t: TimeOfDay = "09:00".parse().unwrap();
        assert_eq!(t.minutes(), 540);

        let t: TimeOfDay = "17:45".parse().unwrap();
        assert_eq!(t.minutes(), 1065);
    }

    #[test]
    fn time_of_day_rejects_malformed_strings() {
        assert!("0900".parse::<TimeOfDay>().is_err());
        assert!("9:ab".parse::<TimeOfDay>().is_err());
        assert!("25:00".parse::<TimeOfDay>().is_err());
        assert!("".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn time_of_day_displays_zero_padded() {
        assert_eq!(format!("{}", TimeOfDay::from_hm(9, 5).unwrap()), "09:05");
        assert_eq!(format!("{}", TimeOfDay::MIDNIGHT), "00:00");
        assert_eq!(format!("{}", TimeOfDay::END_OF_DAY), "23:59");
    }

    #[test]
    fn time_of_day_ordering_follows_clock() {
        let morning: TimeOfDay = "09:00".parse().unwrap();
        let evening: TimeOfDay = "17:00".parse().unwrap();
        assert!(morning < evening);
    }

    #[test]
    fn time_of_day_serializes_as_plain_minutes() {
        let t = TimeOfDay::from_hm(9, 0).unwrap();
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "540");
    }
}
