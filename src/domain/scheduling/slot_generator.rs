//! Pure slot enumeration for a provider/service/date combination.
//!
//! The generator works entirely on UTC instants: availability windows are
//! materialized onto the target date by the caller (in the organization
//! timezone) before they arrive here, and occupying intervals come straight
//! from the booking ledger and the external busy feed. No I/O happens in
//! this module.
//!
//! # Algorithm
//!
//! 1. Coalesce the materialized windows into disjoint intervals (split
//!    shifts may overlap or touch; upstream promises neither order nor
//!    disjointness).
//! 2. Expand every occupying interval by the candidate service's
//!    buffer-before on the left and buffer-after on the right, then coalesce
//!    the expansions into a sorted blocked list.
//! 3. Walk each window with a cursor starting at
//!    `window start + buffer_before`, stepping by the service duration so
//!    slots pack back-to-back. A candidate survives when its buffered span
//!    fits inside the window and its raw span misses every blocked interval.
//!    On a collision the cursor jumps to the end of the blocking interval,
//!    so slots re-pack after a busy block instead of staying on the
//!    original grid.
//! 4. Drop candidates violating minimum notice or the maximum advance
//!    window.
//!
//! # Edge Cases
//!
//! - No windows, or a duration (plus buffers) longer than every window,
//!   yields an empty list — never an error.
//! - Candidates are ascending and unique by construction: coalesced windows
//!   are disjoint and the cursor only moves forward.

use crate::domain::foundation::Timestamp;

use super::Interval;

/// Booking parameters of the service being scheduled.
///
/// All values come from the service definition current at computation time;
/// nothing here is cached across requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotParameters {
    /// Appointment length in minutes (always > 0).
    pub duration_minutes: u32,

    /// Dead time required immediately before the appointment.
    pub buffer_before_minutes: u32,

    /// Dead time required immediately after the appointment.
    pub buffer_after_minutes: u32,

    /// Shortest allowed lead time between now and a bookable start.
    pub min_notice_minutes: u32,

    /// Furthest allowed lead time into the future, in days. `None` means
    /// unbounded.
    pub max_advance_days: Option<u32>,
}

impl SlotParameters {
    /// Earliest bookable instant given the minimum-notice policy.
    pub fn earliest_start(&self, now: Timestamp) -> Timestamp {
        now.plus_minutes(self.min_notice_minutes as i64)
    }

    /// Latest bookable instant given the advance-window policy, if bounded.
    pub fn latest_start(&self, now: Timestamp) -> Option<Timestamp> {
        self.max_advance_days
            .map(|days| now.plus_minutes(days as i64 * 1440))
    }
}

/// Why a single proposed start time was rejected.
///
/// Produced by [`SlotGenerator::check_candidate`] on the commit path, where
/// each cause maps to a distinct caller-facing error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateRejection {
    /// The buffered span does not fit inside any availability window.
    OutsideAvailability,

    /// The raw span collides with an occupying interval (after buffer
    /// expansion).
    Occupied,

    /// The start is earlier than now + minimum notice.
    NoticeViolation,

    /// The start is later than now + maximum advance window.
    AdvanceWindowViolation,
}

/// Stateless slot computation service.
///
/// Both entry points are pure functions: calling them twice with the same
/// inputs returns identical results, and neither mutates anything.
pub struct SlotGenerator;

impl SlotGenerator {
    /// Enumerates the valid start times within `windows`, ascending.
    ///
    /// `windows` are the availability windows materialized onto the target
    /// date; `occupying` are the raw busy spans (ledger bookings plus
    /// external busy events) fetched for the surrounding days.
    pub fn generate(
        windows: &[Interval],
        occupying: &[Interval],
        params: &SlotParameters,
        now: Timestamp,
    ) -> Vec<Timestamp> {
        let windows = Interval::coalesce(windows.to_vec());
        let blocked = Self::expand_occupying(occupying, params);

        let earliest = params.earliest_start(now);
        let latest = params.latest_start(now);

        let mut slots = Vec::new();
        'windows: for window in &windows {
            let mut cursor = window
                .start()
                .plus_minutes(params.buffer_before_minutes as i64);

            loop {
                let raw_end = cursor.plus_minutes(params.duration_minutes as i64);
                let buffered_end = raw_end.plus_minutes(params.buffer_after_minutes as i64);

                // Containment: once the buffered span spills past the window
                // end, no later cursor in this window can fit either.
                if window.end().is_before(&buffered_end) {
                    break;
                }

                if let Some(latest) = &latest {
                    // Windows are sorted, so everything from here on is too
                    // far out.
                    if latest.is_before(&cursor) {
                        break 'windows;
                    }
                }

                match Self::first_collision(&blocked, cursor, raw_end) {
                    Some(block) => {
                        // Re-pack after the busy block.
                        cursor = block.end();
                    }
                    None => {
                        if !cursor.is_before(&earliest) {
                            slots.push(cursor);
                        }
                        cursor = raw_end;
                    }
                }
            }
        }
        slots
    }

    /// Validates a single proposed start against the same rules as
    /// [`generate`](Self::generate).
    ///
    /// Used by the commit path to re-check the chosen candidate against
    /// current truth.
    pub fn check_candidate(
        start: Timestamp,
        windows: &[Interval],
        occupying: &[Interval],
        params: &SlotParameters,
        now: Timestamp,
    ) -> Result<(), CandidateRejection> {
        if start.is_before(&params.earliest_start(now)) {
            return Err(CandidateRejection::NoticeViolation);
        }
        if let Some(latest) = params.latest_start(now) {
            if latest.is_before(&start) {
                return Err(CandidateRejection::AdvanceWindowViolation);
            }
        }

        let raw_end = start.plus_minutes(params.duration_minutes as i64);
        let buffered_start = start.minus_minutes(params.buffer_before_minutes as i64);
        let buffered_end = raw_end.plus_minutes(params.buffer_after_minutes as i64);
        let buffered = Interval::new(buffered_start, buffered_end)
            .map_err(|_| CandidateRejection::OutsideAvailability)?;

        let windows = Interval::coalesce(windows.to_vec());
        if !windows.iter().any(|w| w.contains(&buffered)) {
            return Err(CandidateRejection::OutsideAvailability);
        }

        let blocked = Self::expand_occupying(occupying, params);
        if Self::first_collision(&blocked, start, raw_end).is_some() {
            return Err(CandidateRejection::Occupied);
        }

        Ok(())
    }

    /// Expands raw occupying intervals by the candidate service's buffers
    /// and coalesces the result into a sorted disjoint list.
    fn expand_occupying(occupying: &[Interval], params: &SlotParameters) -> Vec<Interval> {
        Interval::coalesce(
            occupying
                .iter()
                .map(|i| {
                    i.expand(
                        params.buffer_before_minutes,
                        params.buffer_after_minutes,
                    )
                })
                .collect(),
        )
    }

    /// Finds the first blocked interval intersecting the raw span
    /// `[start, end)`, if any.
    fn first_collision(
        blocked: &[Interval],
        start: Timestamp,
        end: Timestamp,
    ) -> Option<Interval> {
        blocked
            .iter()
            .find(|b| b.start().is_before(&end) && start.is_before(&b.end()))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn ts(rfc3339: &str) -> Timestamp {
        Timestamp::from_datetime(
            DateTime::parse_from_rfc3339(rfc3339)
                .unwrap()
                .with_timezone(&Utc),
        )
    }

    fn iv(start: &str, end: &str) -> Interval {
        Interval::new(ts(start), ts(end)).unwrap()
    }

    fn params(duration: u32, before: u32, after: u32) -> SlotParameters {
        SlotParameters {
            duration_minutes: duration,
            buffer_before_minutes: before,
            buffer_after_minutes: after,
            min_notice_minutes: 0,
            max_advance_days: None,
        }
    }

    // An instant far enough in the past that notice never interferes unless
    // a test sets it explicitly.
    fn long_ago() -> Timestamp {
        ts("2026-01-01T00:00:00Z")
    }

    #[test]
    fn empty_windows_yield_no_slots() {
        let slots = SlotGenerator::generate(&[], &[], &params(60, 0, 0), long_ago());
        assert!(slots.is_empty());
    }

    #[test]
    fn open_window_packs_slots_back_to_back() {
        let windows = [iv("2026-03-02T09:00:00Z", "2026-03-02T12:00:00Z")];
        let slots = SlotGenerator::generate(&windows, &[], &params(60, 0, 0), long_ago());
        assert_eq!(
            slots,
            vec![
                ts("2026-03-02T09:00:00Z"),
                ts("2026-03-02T10:00:00Z"),
                ts("2026-03-02T11:00:00Z"),
            ]
        );
    }

    #[test]
    fn monday_scenario_with_trailing_buffer() {
        // Window 09:00-17:00, duration 60, buffers 0/15, confirmed booking
        // 10:00-11:00. Expected: 09:00, then re-pack at 11:15 and hourly
        // plus buffer from there; nothing starting in [10:00, 11:15).
        let windows = [iv("2026-03-02T09:00:00Z", "2026-03-02T17:00:00Z")];
        let busy = [iv("2026-03-02T10:00:00Z", "2026-03-02T11:00:00Z")];
        let slots = SlotGenerator::generate(&windows, &busy, &params(60, 0, 15), long_ago());
        assert_eq!(
            slots,
            vec![
                ts("2026-03-02T09:00:00Z"),
                ts("2026-03-02T11:15:00Z"),
                ts("2026-03-02T12:15:00Z"),
                ts("2026-03-02T13:15:00Z"),
                ts("2026-03-02T14:15:00Z"),
                ts("2026-03-02T15:15:00Z"),
            ]
        );
    }

    #[test]
    fn leading_buffer_shifts_first_slot_into_window() {
        let windows = [iv("2026-03-02T09:00:00Z", "2026-03-02T12:00:00Z")];
        let slots = SlotGenerator::generate(&windows, &[], &params(60, 30, 0), long_ago());
        // First buffered span is [09:00, 10:30) with the slot at 09:30.
        assert_eq!(
            slots,
            vec![ts("2026-03-02T09:30:00Z"), ts("2026-03-02T10:30:00Z")]
        );
    }

    #[test]
    fn trailing_buffer_may_end_exactly_at_window_edge() {
        let windows = [iv("2026-03-02T09:00:00Z", "2026-03-02T10:15:00Z")];
        let slots = SlotGenerator::generate(&windows, &[], &params(60, 0, 15), long_ago());
        assert_eq!(slots, vec![ts("2026-03-02T09:00:00Z")]);
    }

    #[test]
    fn duration_longer_than_every_window_yields_no_slots() {
        let windows = [
            iv("2026-03-02T09:00:00Z", "2026-03-02T09:45:00Z"),
            iv("2026-03-02T13:00:00Z", "2026-03-02T13:30:00Z"),
        ];
        let slots = SlotGenerator::generate(&windows, &[], &params(60, 0, 0), long_ago());
        assert!(slots.is_empty());
    }

    #[test]
    fn overlapping_windows_are_unioned_before_scanning() {
        // Two overlapping shifts behave exactly like one 09:00-13:00 window:
        // no duplicate or seam-straddling slots.
        let windows = [
            iv("2026-03-02T09:00:00Z", "2026-03-02T11:30:00Z"),
            iv("2026-03-02T11:00:00Z", "2026-03-02T13:00:00Z"),
        ];
        let slots = SlotGenerator::generate(&windows, &[], &params(60, 0, 0), long_ago());
        assert_eq!(
            slots,
            vec![
                ts("2026-03-02T09:00:00Z"),
                ts("2026-03-02T10:00:00Z"),
                ts("2026-03-02T11:00:00Z"),
                ts("2026-03-02T12:00:00Z"),
            ]
        );
    }

    #[test]
    fn split_shifts_scan_independently() {
        let windows = [
            iv("2026-03-02T09:00:00Z", "2026-03-02T11:00:00Z"),
            iv("2026-03-02T14:00:00Z", "2026-03-02T16:00:00Z"),
        ];
        let slots = SlotGenerator::generate(&windows, &[], &params(60, 0, 0), long_ago());
        assert_eq!(
            slots,
            vec![
                ts("2026-03-02T09:00:00Z"),
                ts("2026-03-02T10:00:00Z"),
                ts("2026-03-02T14:00:00Z"),
                ts("2026-03-02T15:00:00Z"),
            ]
        );
    }

    #[test]
    fn busy_interval_spanning_midnight_blocks_morning_slots() {
        // A booking from the previous day whose span reaches into the
        // target date must block the opening slots.
        let windows = [iv("2026-03-02T09:00:00Z", "2026-03-02T12:00:00Z")];
        let busy = [iv("2026-03-01T23:00:00Z", "2026-03-02T09:30:00Z")];
        let slots = SlotGenerator::generate(&windows, &busy, &params(60, 0, 0), long_ago());
        assert_eq!(
            slots,
            vec![ts("2026-03-02T09:30:00Z"), ts("2026-03-02T10:30:00Z")]
        );
    }

    #[test]
    fn min_notice_excludes_near_term_slots() {
        // Now is 14:00 with 120 minutes notice: nothing before 16:00.
        let windows = [iv("2026-03-02T09:00:00Z", "2026-03-02T18:00:00Z")];
        let mut p = params(60, 0, 0);
        p.min_notice_minutes = 120;
        let slots =
            SlotGenerator::generate(&windows, &[], &p, ts("2026-03-02T14:00:00Z"));
        assert_eq!(
            slots,
            vec![
                ts("2026-03-02T16:00:00Z"),
                ts("2026-03-02T17:00:00Z"),
            ]
        );
    }

    #[test]
    fn advance_window_excludes_far_future_dates() {
        // 31 days out with a 30-day advance window: empty regardless of
        // availability.
        let windows = [iv("2026-04-02T09:00:00Z", "2026-04-02T17:00:00Z")];
        let mut p = params(60, 0, 0);
        p.max_advance_days = Some(30);
        let slots =
            SlotGenerator::generate(&windows, &[], &p, ts("2026-03-02T00:00:00Z"));
        assert!(slots.is_empty());
    }

    #[test]
    fn advance_window_boundary_is_inclusive() {
        let windows = [iv("2026-03-09T09:00:00Z", "2026-03-09T11:00:00Z")];
        let mut p = params(60, 0, 0);
        p.max_advance_days = Some(7);
        // now + 7 days = 2026-03-09T09:00:00Z exactly.
        let slots =
            SlotGenerator::generate(&windows, &[], &p, ts("2026-03-02T09:00:00Z"));
        assert_eq!(slots, vec![ts("2026-03-09T09:00:00Z")]);
    }

    #[test]
    fn touching_busy_interval_does_not_block_adjacent_slot() {
        // Busy 10:00-11:00 with no buffers: 09:00 and 11:00 both fine.
        let windows = [iv("2026-03-02T09:00:00Z", "2026-03-02T13:00:00Z")];
        let busy = [iv("2026-03-02T10:00:00Z", "2026-03-02T11:00:00Z")];
        let slots = SlotGenerator::generate(&windows, &busy, &params(60, 0, 0), long_ago());
        assert_eq!(
            slots,
            vec![
                ts("2026-03-02T09:00:00Z"),
                ts("2026-03-02T11:00:00Z"),
                ts("2026-03-02T12:00:00Z"),
            ]
        );
    }

    #[test]
    fn generate_is_idempotent() {
        let windows = [iv("2026-03-02T09:00:00Z", "2026-03-02T17:00:00Z")];
        let busy = [iv("2026-03-02T10:00:00Z", "2026-03-02T11:00:00Z")];
        let p = params(45, 10, 5);
        let first = SlotGenerator::generate(&windows, &busy, &p, long_ago());
        let second = SlotGenerator::generate(&windows, &busy, &p, long_ago());
        assert_eq!(first, second);
    }

    #[test]
    fn check_candidate_accepts_a_generated_slot() {
        let windows = [iv("2026-03-02T09:00:00Z", "2026-03-02T17:00:00Z")];
        let busy = [iv("2026-03-02T10:00:00Z", "2026-03-02T11:00:00Z")];
        let p = params(60, 0, 15);
        let slots = SlotGenerator::generate(&windows, &busy, &p, long_ago());
        for slot in slots {
            assert_eq!(
                SlotGenerator::check_candidate(slot, &windows, &busy, &p, long_ago()),
                Ok(())
            );
        }
    }

    #[test]
    fn check_candidate_rejects_occupied_start() {
        let windows = [iv("2026-03-02T09:00:00Z", "2026-03-02T17:00:00Z")];
        let busy = [iv("2026-03-02T10:00:00Z", "2026-03-02T11:00:00Z")];
        let p = params(60, 0, 15);
        // 10:30 sits inside the busy block; 11:00 collides with its
        // trailing buffer expansion.
        assert_eq!(
            SlotGenerator::check_candidate(
                ts("2026-03-02T10:30:00Z"),
                &windows,
                &busy,
                &p,
                long_ago()
            ),
            Err(CandidateRejection::Occupied)
        );
        assert_eq!(
            SlotGenerator::check_candidate(
                ts("2026-03-02T11:00:00Z"),
                &windows,
                &busy,
                &p,
                long_ago()
            ),
            Err(CandidateRejection::Occupied)
        );
    }

    #[test]
    fn check_candidate_rejects_start_outside_windows() {
        let windows = [iv("2026-03-02T09:00:00Z", "2026-03-02T12:00:00Z")];
        let p = params(60, 0, 0);
        assert_eq!(
            SlotGenerator::check_candidate(
                ts("2026-03-02T11:30:00Z"),
                &windows,
                &[],
                &p,
                long_ago()
            ),
            Err(CandidateRejection::OutsideAvailability)
        );
        assert_eq!(
            SlotGenerator::check_candidate(
                ts("2026-03-02T18:00:00Z"),
                &windows,
                &[],
                &p,
                long_ago()
            ),
            Err(CandidateRejection::OutsideAvailability)
        );
    }

    #[test]
    fn check_candidate_rejects_notice_and_advance_violations() {
        let windows = [iv("2026-03-02T09:00:00Z", "2026-03-02T17:00:00Z")];
        let mut p = params(60, 0, 0);
        p.min_notice_minutes = 120;
        p.max_advance_days = Some(30);

        assert_eq!(
            SlotGenerator::check_candidate(
                ts("2026-03-02T09:00:00Z"),
                &windows,
                &[],
                &p,
                ts("2026-03-02T08:00:00Z")
            ),
            Err(CandidateRejection::NoticeViolation)
        );
        assert_eq!(
            SlotGenerator::check_candidate(
                ts("2026-03-02T09:00:00Z"),
                &windows,
                &[],
                &p,
                ts("2026-01-01T00:00:00Z")
            ),
            Err(CandidateRejection::AdvanceWindowViolation)
        );
    }
}

#[cfg(test)]
mod properties {
    use super::*;
    use proptest::prelude::*;

    fn base() -> Timestamp {
        Timestamp::from_unix_secs(1_772_409_600) // 2026-03-02T00:00:00Z
    }

    fn at(minutes: i64) -> Timestamp {
        base().plus_minutes(minutes)
    }

    fn iv(start_min: i64, end_min: i64) -> Interval {
        Interval::new(at(start_min), at(end_min)).unwrap()
    }

    prop_compose! {
        fn arb_window()(start in 0i64..1200, len in 30i64..480) -> Interval {
            iv(start, start + len)
        }
    }

    prop_compose! {
        fn arb_busy()(start in 0i64..1400, len in 5i64..180) -> Interval {
            iv(start, start + len)
        }
    }

    prop_compose! {
        fn arb_params()(
            duration in 15u32..120,
            before in 0u32..30,
            after in 0u32..30,
            notice in 0u32..240,
            advance in prop::option::of(1u32..3),
        ) -> SlotParameters {
            SlotParameters {
                duration_minutes: duration,
                buffer_before_minutes: before,
                buffer_after_minutes: after,
                min_notice_minutes: notice,
                max_advance_days: advance,
            }
        }
    }

    proptest! {
        #[test]
        fn slots_respect_notice_and_advance(
            windows in prop::collection::vec(arb_window(), 0..4),
            busy in prop::collection::vec(arb_busy(), 0..4),
            params in arb_params(),
        ) {
            let now = base();
            let slots = SlotGenerator::generate(&windows, &busy, &params, now);
            for s in &slots {
                prop_assert!(!s.is_before(&params.earliest_start(now)));
                if let Some(latest) = params.latest_start(now) {
                    prop_assert!(!latest.is_before(s));
                }
            }
        }

        #[test]
        fn buffered_spans_are_contained_in_window_union(
            windows in prop::collection::vec(arb_window(), 1..4),
            busy in prop::collection::vec(arb_busy(), 0..4),
            params in arb_params(),
        ) {
            let slots = SlotGenerator::generate(&windows, &busy, &params, base());
            let union = Interval::coalesce(windows.clone());
            for s in &slots {
                let buffered = Interval::new(
                    s.minus_minutes(params.buffer_before_minutes as i64),
                    s.plus_minutes(
                        (params.duration_minutes + params.buffer_after_minutes) as i64,
                    ),
                )
                .unwrap();
                prop_assert!(union.iter().any(|w| w.contains(&buffered)));
            }
        }

        #[test]
        fn raw_spans_never_touch_expanded_busy_intervals(
            windows in prop::collection::vec(arb_window(), 1..4),
            busy in prop::collection::vec(arb_busy(), 0..4),
            params in arb_params(),
        ) {
            let slots = SlotGenerator::generate(&windows, &busy, &params, base());
            for s in &slots {
                let raw = Interval::new(
                    *s,
                    s.plus_minutes(params.duration_minutes as i64),
                )
                .unwrap();
                for b in &busy {
                    let expanded = b.expand(
                        params.buffer_before_minutes,
                        params.buffer_after_minutes,
                    );
                    prop_assert!(!raw.overlaps(&expanded));
                }
            }
        }

        #[test]
        fn slots_are_ascending_and_pairwise_disjoint(
            windows in prop::collection::vec(arb_window(), 1..4),
            busy in prop::collection::vec(arb_busy(), 0..4),
            params in arb_params(),
        ) {
            let slots = SlotGenerator::generate(&windows, &busy, &params, base());
            for pair in slots.windows(2) {
                prop_assert!(pair[0].is_before(&pair[1]));
                // Back-to-back packing: the next slot starts no earlier
                // than this one ends.
                prop_assert!(
                    !pair[1].is_before(&pair[0].plus_minutes(params.duration_minutes as i64))
                );
            }
        }

        #[test]
        fn every_generated_slot_passes_check_candidate(
            windows in prop::collection::vec(arb_window(), 1..4),
            busy in prop::collection::vec(arb_busy(), 0..4),
            params in arb_params(),
        ) {
            let now = base();
            let slots = SlotGenerator::generate(&windows, &busy, &params, now);
            for s in &slots {
                prop_assert_eq!(
                    SlotGenerator::check_candidate(*s, &windows, &busy, &params, now),
                    Ok(())
                );
            }
        }
    }
}
