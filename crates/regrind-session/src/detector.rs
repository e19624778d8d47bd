//! Match-end detection from two independent, racy signals.
//!
//! The host delivers an authoritative match-ended event and, separately, a
//! "leave penalty lifted" notification. The penalty signal clears both when
//! a match legitimately ends and when someone abandons mid-match, and it can
//! beat the authoritative event to the punch — so ends inferred from it go
//! through score/clock heuristics first, and *both* paths share one dedup
//! guard keyed by match id. Whichever signal arrives second for the same
//! match is a no-op.

use regrind_protocol::{MatchId, ServerSnapshot};
use tracing::{debug, trace};

/// What the penalty-lifted heuristics concluded about a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndVerdict {
    /// The match is genuinely over; advance the session.
    MatchOver,
    /// Not provably over (abandon, tied overtime, clock still running) —
    /// wait for a later signal.
    StillPlaying,
}

/// Tracks which match was last counted, making match-end processing
/// idempotent per match id.
///
/// The guard is monotonic: ids are never cleared, and fresh matches always
/// carry fresh ids, so remembering only the most recent one suffices.
#[derive(Debug, Default)]
pub struct MatchEndDetector {
    last_match_id: Option<MatchId>,
}

impl MatchEndDetector {
    /// Creates a detector that has seen no matches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a match end. Returns `true` the first time an id is seen
    /// and `false` for every repeat — the caller only advances the
    /// session on `true`.
    pub fn observe(&mut self, match_id: &MatchId) -> bool {
        if self.last_match_id.as_ref() == Some(match_id) {
            debug!(%match_id, "match end already processed, ignoring");
            return false;
        }
        self.last_match_id = Some(match_id.clone());
        true
    }

    /// The most recently counted match, if any.
    pub fn last_match_id(&self) -> Option<&MatchId> {
        self.last_match_id.as_ref()
    }

    /// Classifies a penalty-changed snapshot: did the penalty lift because
    /// the match ended, or because a player abandoned?
    ///
    /// Decision ladder:
    /// 1. Penalty still active → not an end signal at all.
    /// 2. Forfeit → over.
    /// 3. Not exactly two teams → cannot score it, wait.
    /// 4. Overtime → over only once the scores differ (sudden death
    ///    resolved); tied overtime is still running.
    /// 5. Regulation → over only if the clock is out *and* the scores
    ///    differ; anything else is an abandon or a tie still playing out.
    pub fn assess_penalty_lifted(server: &ServerSnapshot) -> EndVerdict {
        if server.leave_penalty {
            return EndVerdict::StillPlaying;
        }

        if server.forfeit {
            debug!(match_id = %server.match_id, "forfeit, match is over");
            return EndVerdict::MatchOver;
        }

        if !server.has_two_teams() {
            trace!(
                teams = server.team_scores.len(),
                "non-standard team count, cannot score"
            );
            return EndVerdict::StillPlaying;
        }

        if server.overtime {
            if server.scores_differ() {
                debug!(match_id = %server.match_id, "overtime resolved, match is over");
                return EndVerdict::MatchOver;
            }
            return EndVerdict::StillPlaying;
        }

        if server.time_remaining > 0.0 {
            trace!(
                time_remaining = server.time_remaining,
                "clock still running, someone abandoned"
            );
            return EndVerdict::StillPlaying;
        }

        if server.scores_differ() {
            debug!(match_id = %server.match_id, "regulation decided, match is over");
            return EndVerdict::MatchOver;
        }
        EndVerdict::StillPlaying
    }
}

// =========================================================================
// Tests
// =========================================================================
