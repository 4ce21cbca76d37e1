//! DayOfWeek enum matching the persisted 0-6 weekday contract.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Day of the week, numbered 0 (Sunday) through 6 (Saturday).
///
/// The numbering matches the persisted availability shape; conversions from
/// calendar dates go through [`DayOfWeek::from`] on `chrono::Weekday`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    /// Returns all days in persisted order (Sunday first).
    pub fn all() -> &'static [DayOfWeek] {
        &[
            DayOfWeek::Sunday,
            DayOfWeek::Monday,
            DayOfWeek::Tuesday,
            DayOfWeek::Wednesday,
            DayOfWeek::Thursday,
            DayOfWeek::Friday,
            DayOfWeek::Saturday,
        ]
    }

    /// Returns the persisted 0-6 index.
    pub fn as_index(&self) -> u8 {
        match self {
            DayOfWeek::Sunday => 0,
            DayOfWeek::Monday => 1,
            DayOfWeek::Tuesday => 2,
            DayOfWeek::Wednesday => 3,
            DayOfWeek::Thursday => 4,
            DayOfWeek::Friday => 5,
            DayOfWeek::Saturday => 6,
        }
    }

    /// Creates a DayOfWeek from the persisted 0-6 index.
    pub fn from_index(index: u8) -> Result<Self, ValidationError> {
        Self::all()
            .get(index as usize)
            .copied()
            .ok_or_else(|| ValidationError::out_of_range("day_of_week", 0, 6, index as i32))
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            DayOfWeek::Sunday => "Sunday",
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
        }
    }
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(weekday: chrono::Weekday) -> Self {
        // num_days_from_sunday is 0 for Sunday, matching the persisted index.
        Self::from_index(weekday.num_days_from_sunday() as u8)
            .expect("chrono weekday is always 0-6 from Sunday")
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
