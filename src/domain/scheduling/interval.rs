//! Half-open time interval arithmetic.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Timestamp, ValidationError};

/// A half-open interval of instants, `[start, end)`.
///
/// Bookings, external busy events, and materialized availability windows all
/// reduce to this shape before any overlap reasoning happens. Two intervals
/// that merely touch (`a.end == b.start`) do not overlap.
///
/// Deserialization runs through [`Interval::new`], so a stored or cached
/// payload with `start >= end` fails to decode instead of producing an
/// interval the overlap arithmetic cannot handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct Interval {
    start: Timestamp,
    end: Timestamp,
}

/// Unvalidated wire shape of an interval.
#[derive(Debug, Deserialize)]
struct RawInterval {
    start: Timestamp,
    end: Timestamp,
}

impl TryFrom<RawInterval> for Interval {
    type Error = ValidationError;

    fn try_from(raw: RawInterval) -> Result<Self, Self::Error> {
        Interval::new(raw.start, raw.end)
    }
}

impl Interval {
    /// Creates an interval, returning error unless `start < end`.
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, ValidationError> {
        if !start.is_before(&end) {
            return Err(ValidationError::invalid_format(
                "interval",
                "start must be strictly before end",
            ));
        }
        Ok(Self { start, end })
    }

    /// Returns the inclusive start instant.
    pub fn start(&self) -> Timestamp {
        self.start
    }

    /// Returns the exclusive end instant.
    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Checks whether two half-open intervals share any instant.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start.is_before(&other.end) && other.start.is_before(&self.end)
    }

    /// Checks whether `other` lies entirely within this interval.
    pub fn contains(&self, other: &Interval) -> bool {
        !other.start.is_before(&self.start) && !self.end.is_before(&other.end)
    }

    /// Widens the interval by whole minutes on each side.
    pub fn expand(&self, before_minutes: u32, after_minutes: u32) -> Self {
        Self {
            start: self.start.minus_minutes(before_minutes as i64),
            end: self.end.plus_minutes(after_minutes as i64),
        }
    }

    /// Merges a set of intervals into the minimal disjoint covering set.
    ///
    /// Overlapping and touching intervals collapse into one; the result is
    /// sorted ascending by start. Used both to union split-shift availability
    /// windows and to consolidate expanded busy spans.
    pub fn coalesce(mut intervals: Vec<Interval>) -> Vec<Interval> {
        if intervals.len() < 2 {
            return intervals;
        }
        intervals.sort_by_key(|i| i.start);

        let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
        for interval in intervals {
            match merged.last_mut() {
                Some(last) if !last.end.is_before(&interval.start) => {
                    if last.end.is_before(&interval.end) {
                        last.end = interval.end;
                    }
                }
                _ => merged.push(interval),
            }
        }
        merged
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
