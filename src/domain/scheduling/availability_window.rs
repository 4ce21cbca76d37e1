//! Weekly recurring availability windows.

use chrono::{Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    AvailabilityWindowId, DayOfWeek, ProviderId, TimeOfDay, Timestamp, ValidationError,
};

use super::Interval;

/// One recurring open window in a provider's weekly schedule.
///
/// A provider may carry several windows on the same weekday (split shifts);
/// upstream data makes no ordering or disjointness promises, so consumers
/// union the windows before using them. Only active windows participate in
/// slot computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    pub id: AvailabilityWindowId,
    pub provider_id: ProviderId,
    pub day_of_week: DayOfWeek,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub is_active: bool,
}

impl AvailabilityWindow {
    /// Creates a window, returning error unless the span is non-empty.
    pub fn new(
        id: AvailabilityWindowId,
        provider_id: ProviderId,
        day_of_week: DayOfWeek,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
        is_active: bool,
    ) -> Result<Self, ValidationError> {
        if start_time >= end_time {
            return Err(ValidationError::invalid_format(
                "availability_window",
                "start_time must be before end_time",
            ));
        }
        Ok(Self {
            id,
            provider_id,
            day_of_week,
            start_time,
            end_time,
            is_active,
        })
    }

    /// Converts the wall-clock window into an instant interval on `date`.
    ///
    /// Both edges are interpreted in the organization timezone. Returns
    /// `None` when the materialized span collapses (a window swallowed by a
    /// daylight-saving gap).
    pub fn materialize(&self, date: NaiveDate, timezone: Tz) -> Option<Interval> {
        let start = resolve_local(date.and_time(to_naive_time(self.start_time)), timezone);
        let end = resolve_local(date.and_time(to_naive_time(self.end_time)), timezone);
        Interval::new(
            Timestamp::from_datetime(start),
            Timestamp::from_datetime(end),
        )
        .ok()
    }
}

/// Instant range to scan for occupying intervals when computing slots for
/// `date`.
///
/// Covers the local day plus one day on each side so bookings whose buffer
/// expansion crosses midnight are still seen.
pub fn occupancy_fetch_range(date: NaiveDate, timezone: Tz) -> Interval {
    let from = resolve_local((date - Duration::days(1)).and_time(NaiveTime::MIN), timezone);
    let to = resolve_local((date + Duration::days(2)).and_time(NaiveTime::MIN), timezone);
    Interval::new(Timestamp::from_datetime(from), Timestamp::from_datetime(to))
        .expect("a three-day span never collapses")
}

fn to_naive_time(t: TimeOfDay) -> NaiveTime {
    NaiveTime::from_hms_opt(t.hour() as u32, t.minute() as u32, 0)
        .expect("TimeOfDay is always a valid wall-clock time")
}

/// Resolves a wall-clock time to a UTC instant in the given timezone.
///
/// Ambiguous times (fall-back) take the earlier instant; nonexistent times
/// (spring-forward) roll forward to the first instant after the gap.
fn resolve_local(naive: NaiveDateTime, timezone: Tz) -> chrono::DateTime<chrono::Utc> {
    let mut probe = naive;
    // Gaps are minutes to hours wide; one day of probing covers even
    // offset-jump outliers.
    for _ in 0..96 {
        match timezone.from_local_datetime(&probe) {
            LocalResult::Single(dt) => return dt.with_timezone(&chrono::Utc),
            LocalResult::Ambiguous(early, _) => return early.with_timezone(&chrono::Utc),
            LocalResult::None => probe += Duration::minutes(15),
        }
    }
    timezone
        .from_utc_datetime(&naive)
        .with_timezone(&chrono::Utc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn window(start: &str, end: &str) -> AvailabilityWindow {
        AvailabilityWindow::new(
            AvailabilityWindowId::new(),
            ProviderId::new(),
            DayOfWeek::Monday,
            start.parse().unwrap(),
            end.parse().unwrap(),
            true,
        )
        .unwrap()
    }

    #[test]
    fn new_rejects_empty_and_reversed_spans() {
        let result = AvailabilityWindow::new(
            AvailabilityWindowId::new(),
            ProviderId::new(),
            DayOfWeek::Monday,
            "17:00".parse().unwrap(),
            "09:00".parse().unwrap(),
            true,
        );
        assert!(result.is_err());

        let result = AvailabilityWindow::new(
            AvailabilityWindowId::new(),
            ProviderId::new(),
            DayOfWeek::Monday,
            "09:00".parse().unwrap(),
            "09:00".parse().unwrap(),
            true,
        );
        assert!(result.is_err());
    }

    #[test]
    fn materialize_maps_wall_clock_to_utc() {
        let w = window("09:00", "17:00");
        // 2026-03-02 is a Monday; New York is on EST (UTC-5).
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let interval = w.materialize(date, chrono_tz::America::New_York).unwrap();

        assert_eq!(interval.start().as_datetime().hour(), 14);
        assert_eq!(interval.end().as_datetime().hour(), 22);
    }

    #[test]
    fn materialize_in_utc_is_identity_on_wall_clock() {
        let w = window("09:00", "17:00");
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let interval = w.materialize(date, chrono_tz::UTC).unwrap();

        assert_eq!(interval.start().as_datetime().hour(), 9);
        assert_eq!(interval.end().as_datetime().hour(), 17);
    }

    #[test]
    fn materialize_rolls_forward_out_of_dst_gap() {
        // US spring-forward on 2026-03-08: 02:00-02:59 local does not exist.
        let w = window("02:30", "05:00");
        let date = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
        let interval = w.materialize(date, chrono_tz::America::New_York).unwrap();

        // 02:30 rolls to 03:00 EDT = 07:00 UTC; 05:00 EDT = 09:00 UTC.
        assert_eq!(interval.start().as_datetime().hour(), 7);
        assert_eq!(interval.end().as_datetime().hour(), 9);
    }

    #[test]
    fn materialize_collapses_window_swallowed_by_dst_gap() {
        let w = window("02:00", "03:00");
        let date = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
        assert!(w.materialize(date, chrono_tz::America::New_York).is_none());
    }

    #[test]
    fn occupancy_fetch_range_spans_surrounding_days() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let range = occupancy_fetch_range(date, chrono_tz::UTC);

        assert_eq!(
            range.start().as_datetime().to_rfc3339(),
            "2026-03-01T00:00:00+00:00"
        );
        assert_eq!(
            range.end().as_datetime().to_rfc3339(),
            "2026-03-04T00:00:00+00:00"
        );
    }

    #[test]
    fn materialize_takes_earlier_instant_when_ambiguous() {
        // US fall-back on 2026-11-01: 01:30 local occurs twice.
        let w = window("01:30", "06:00");
        let date = NaiveDate::from_ymd_opt(2026, 11, 1).unwrap();
        let interval = w.materialize(date, chrono_tz::America::New_York).unwrap();

        // Earlier occurrence is EDT (UTC-4): 01:30 EDT = 05:30 UTC.
        assert_eq!(interval.start().as_datetime().hour(), 5);
        assert_eq!(interval.start().as_datetime().minute(), 30);
    }
}
