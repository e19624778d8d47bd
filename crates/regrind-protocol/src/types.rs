//! Identity types and the server snapshot delivered with host events.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Playlist;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a player, as assigned by the host runtime.
///
/// Newtype over the host's numeric id so a player id can't be confused
/// with a score or a playlist id in a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// A unique identifier for one match.
///
/// The host generates a fresh GUID per match, so two distinct matches never
/// share an id. The match-end detector relies on that: its dedup guard is
/// keyed by `MatchId` and never cleared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub String);

impl MatchId {
    /// Creates a match id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// ServerSnapshot
// ---------------------------------------------------------------------------

/// A read-only snapshot of the current match, passed with each host event.
///
/// The host owns the live server object; the plugin only ever sees this
/// copied view, so event handlers can't observe state changing under them
/// mid-callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSnapshot {
    /// Identifier of the match this snapshot belongs to.
    pub match_id: MatchId,

    /// One entry per team, in host order. Standard modes have exactly two;
    /// anything else is an abnormal mode the heuristics refuse to score.
    pub team_scores: Vec<i32>,

    /// `true` while sudden-death overtime is running.
    pub overtime: bool,

    /// Regulation seconds left on the clock. Can go negative after the
    /// final whistle while the server winds down.
    pub time_remaining: f32,

    /// `true` while leaving the match would be penalized.
    pub leave_penalty: bool,

    /// `true` once a team has forfeited.
    pub forfeit: bool,

    /// The playlist this match was found in, when the host knows it.
    pub playlist: Option<Playlist>,
}

impl ServerSnapshot {
    /// `true` if the snapshot has the two-team shape the scoring
    /// heuristics understand.
    pub fn has_two_teams(&self) -> bool {
        self.team_scores.len() == 2
    }

    /// `true` if the two teams' scores differ.
    ///
    /// Only meaningful for two-team snapshots; any other shape reports
    /// `false` so callers fall through to "cannot score this".
    pub fn scores_differ(&self) -> bool {
        match self.team_scores.as_slice() {
            [a, b] => a != b,
            _ => false,
        }
    }
}
