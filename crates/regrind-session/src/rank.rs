//! Per-mode skill-rating state and session delta reporting.

use std::fmt;

use regrind_protocol::GameMode;
use tracing::{debug, info};

// ---------------------------------------------------------------------------
// Nearly-equal
// ---------------------------------------------------------------------------

/// Compares two floats within 2 units-in-the-last-place of `a`.
///
/// Rating deltas pass through enough float arithmetic to pick up
/// representation noise; an ULP tolerance absorbs that noise while still
/// surfacing any real change, which a fixed epsilon can't do across the
/// rating scale.
pub fn nearly_equal(a: f32, b: f32) -> bool {
    const FACTOR: f32 = 2.0;
    let min_a = a - (a - a.next_down()) * FACTOR;
    let max_a = a + (a.next_up() - a) * FACTOR;
    min_a <= b && max_a >= b
}

// ---------------------------------------------------------------------------
// RankSnapshot
// ---------------------------------------------------------------------------

/// One rating per targetable mode, captured at a single point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankSnapshot {
    pub duel: f32,
    pub doubles: f32,
    pub standard: f32,
}

impl RankSnapshot {
    /// The rating for one mode.
    pub fn get(&self, mode: GameMode) -> f32 {
        match mode {
            GameMode::RankedDuel => self.duel,
            GameMode::RankedDoubles => self.doubles,
            GameMode::RankedStandard => self.standard,
        }
    }

    /// Builds a snapshot from a per-mode lookup, requiring every mode to
    /// be available — a partially-delivered rating set is treated as not
    /// delivered at all.
    pub fn from_lookup(
        mut lookup: impl FnMut(GameMode) -> Option<f32>,
    ) -> Option<Self> {
        Some(Self {
            duel: lookup(GameMode::RankedDuel)?,
            doubles: lookup(GameMode::RankedDoubles)?,
            standard: lookup(GameMode::RankedStandard)?,
        })
    }

    /// Per-mode deltas of `self` against `baseline`.
    pub fn diff(&self, baseline: &RankSnapshot) -> RankDiff {
        RankDiff {
            duel: self.duel - baseline.duel,
            doubles: self.doubles - baseline.doubles,
            standard: self.standard - baseline.standard,
        }
    }
}

impl fmt::Display for RankSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "duel={:.1}, doubles={:.1}, standard={:.1}",
            self.duel, self.doubles, self.standard
        )
    }
}

// ---------------------------------------------------------------------------
// RankDiff
// ---------------------------------------------------------------------------

/// Per-mode rating deltas between two snapshots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankDiff {
    pub duel: f32,
    pub doubles: f32,
    pub standard: f32,
}

impl RankDiff {
    /// The delta for one mode.
    pub fn get(&self, mode: GameMode) -> f32 {
        match mode {
            GameMode::RankedDuel => self.duel,
            GameMode::RankedDoubles => self.doubles,
            GameMode::RankedStandard => self.standard,
        }
    }

    /// One report line per mode whose delta is not noise, in mode order:
    /// `"1v1 +12.3"`, `"2v2 -4.0"`, …
    pub fn report_lines(&self) -> Vec<String> {
        GameMode::ALL
            .into_iter()
            .filter(|mode| !nearly_equal(self.get(*mode), 0.0))
            .map(|mode| format!("{} {:+.1}", mode.label(), self.get(mode)))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// RankTracker
// ---------------------------------------------------------------------------

/// Tracks the player's current ratings and the session-start baseline.
///
/// `current` stays `None` until the host delivers a first rating — a
/// zero-valued default would later masquerade as a real baseline and
/// produce a bogus “you gained 800 points” diff.
#[derive(Debug, Default)]
pub struct RankTracker {
    current: Option<RankSnapshot>,
    session_start: Option<RankSnapshot>,
}

impl RankTracker {
    /// Creates a tracker with no observed ratings.
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently observed ratings, if any.
    pub fn current(&self) -> Option<&RankSnapshot> {
        self.current.as_ref()
    }

    /// Records a rating delivery, logging the change when any mode moved.
    pub fn observe(&mut self, new: RankSnapshot) {
        match self.current {
            None => {
                debug!(ranks = %new, "first rating observation");
                self.current = Some(new);
            }
            Some(old) if old != new => {
                info!(old = %old, new = %new, "rating changed");
                self.current = Some(new);
            }
            Some(_) => {}
        }
    }

    /// Captures the session baseline from the current ratings.
    ///
    /// With no rating observed yet the baseline is absent and the eventual
    /// completion report carries no delta lines.
    pub fn capture_session_start(&mut self) {
        self.session_start = self.current;
        match &self.session_start {
            Some(start) => info!(ranks = %start, "session baseline captured"),
            None => debug!("no rating known yet, session baseline unknown"),
        }
    }

    /// Drops the baseline without reporting (session stopped before any
    /// match completed, or aborted).
    pub fn discard_session_start(&mut self) {
        self.session_start = None;
    }

    /// Consumes the baseline and returns the deltas against the current
    /// ratings. `None` when either side is unknown.
    pub fn take_session_diff(&mut self) -> Option<RankDiff> {
        let start = self.session_start.take()?;
        let current = self.current?;
        Some(current.diff(&start))
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ranks(duel: f32, doubles: f32, standard: f32) -> RankSnapshot {
        RankSnapshot {
            duel,
            doubles,
            standard,
        }
    }

    // =====================================================================
    // nearly_equal()
    // =====================================================================

    #[test]
    fn test_nearly_equal_exact_zero_is_noise() {
        assert!(nearly_equal(0.0, 0.0));
    }

    #[test]
    fn test_nearly_equal_real_delta_is_not_noise() {
        assert!(!nearly_equal(1000.0, 0.0));
        assert!(!nearly_equal(-0.1, 0.0));
        assert!(!nearly_equal(0.1, 0.0));
    }

    #[test]
    fn test_nearly_equal_subnormal_noise_around_zero() {
        // One ULP away from zero is within the 2-ULP band.
        assert!(nearly_equal(0.0_f32.next_up(), 0.0));
        assert!(nearly_equal(0.0_f32.next_down(), 0.0));
    }

    #[test]
    fn test_nearly_equal_is_scale_relative() {
        // At magnitude 1000 a few ULP of drift is still "equal"…
        let a = 1000.0_f32;
        assert!(nearly_equal(a, a.next_up()));
        // …but a tenth of a rating point is not.
        assert!(!nearly_equal(a, a + 0.1));
    }

    // =====================================================================
    // RankSnapshot / RankDiff
    // =====================================================================

    #[test]
    fn test_from_lookup_all_modes_present() {
        let snapshot = RankSnapshot::from_lookup(|mode| {
            Some(match mode {
                GameMode::RankedDuel => 700.0,
                GameMode::RankedDoubles => 800.0,
                GameMode::RankedStandard => 900.0,
            })
        })
        .unwrap();
        assert_eq!(snapshot, ranks(700.0, 800.0, 900.0));
    }

    #[test]
    fn test_from_lookup_partial_delivery_is_none() {
        let snapshot = RankSnapshot::from_lookup(|mode| match mode {
            GameMode::RankedDoubles => None,
            _ => Some(500.0),
        });
        assert!(snapshot.is_none());
    }

    #[test]
    fn test_diff_is_new_minus_baseline() {
        let diff = ranks(710.0, 795.0, 900.0).diff(&ranks(700.0, 800.0, 900.0));
        assert_eq!(diff.duel, 10.0);
        assert_eq!(diff.doubles, -5.0);
        assert_eq!(diff.standard, 0.0);
    }

    #[test]
    fn test_report_lines_skips_noise_modes() {
        let diff = ranks(712.3, 800.0, 900.0).diff(&ranks(700.0, 800.0, 900.0));
        assert_eq!(diff.report_lines(), vec!["1v1 +12.3".to_string()]);
    }

    #[test]
    fn test_report_lines_signed_one_decimal() {
        let diff = ranks(690.0, 808.5, 900.0).diff(&ranks(700.0, 800.0, 900.0));
        assert_eq!(
            diff.report_lines(),
            vec!["1v1 -10.0".to_string(), "2v2 +8.5".to_string()]
        );
    }

    #[test]
    fn test_report_lines_all_noise_is_empty() {
        let same = ranks(700.0, 800.0, 900.0);
        assert!(same.diff(&same).report_lines().is_empty());
    }

    // =====================================================================
    // RankTracker
    // =====================================================================

    #[test]
    fn test_observe_first_delivery_becomes_current() {
        let mut tracker = RankTracker::new();
        assert!(tracker.current().is_none());

        tracker.observe(ranks(700.0, 800.0, 900.0));
        assert_eq!(tracker.current(), Some(&ranks(700.0, 800.0, 900.0)));
    }

    #[test]
    fn test_observe_change_replaces_current() {
        let mut tracker = RankTracker::new();
        tracker.observe(ranks(700.0, 800.0, 900.0));
        tracker.observe(ranks(705.0, 800.0, 900.0));
        assert_eq!(tracker.current(), Some(&ranks(705.0, 800.0, 900.0)));
    }

    #[test]
    fn test_take_session_diff_happy_path() {
        let mut tracker = RankTracker::new();
        tracker.observe(ranks(700.0, 800.0, 900.0));
        tracker.capture_session_start();
        tracker.observe(ranks(712.0, 800.0, 890.0));

        let diff = tracker.take_session_diff().unwrap();
        assert_eq!(diff.duel, 12.0);
        assert_eq!(diff.standard, -10.0);
    }

    #[test]
    fn test_take_session_diff_consumes_baseline() {
        let mut tracker = RankTracker::new();
        tracker.observe(ranks(700.0, 800.0, 900.0));
        tracker.capture_session_start();

        assert!(tracker.take_session_diff().is_some());
        assert!(tracker.take_session_diff().is_none());
    }

    #[test]
    fn test_take_session_diff_without_baseline_is_none() {
        let mut tracker = RankTracker::new();
        tracker.capture_session_start(); // nothing observed yet
        tracker.observe(ranks(700.0, 800.0, 900.0));
        assert!(tracker.take_session_diff().is_none());
    }

    #[test]
    fn test_discard_session_start_prevents_diff() {
        let mut tracker = RankTracker::new();
        tracker.observe(ranks(700.0, 800.0, 900.0));
        tracker.capture_session_start();
        tracker.discard_session_start();
        assert!(tracker.take_session_diff().is_none());
    }
}
