//! Session state: the counters and flags that define one grind session.

use regrind_protocol::GameMode;

// ---------------------------------------------------------------------------
// SessionPhase
// ---------------------------------------------------------------------------

/// Where a session is in its lifecycle.
///
/// ```text
///   Idle ──(start)──→ Running ──(last match / manual stop)──→ AwaitingFinalRating
///     ↑                  │                                          │
///     │                  └──(stop before any match / abort)─────────┤
///     └───────────────────(final rating update reported)────────────┘
/// ```
///
/// - **Idle**: no session. Match-end events are spurious and ignored.
/// - **Running**: counting matches; `games_remaining > 0`.
/// - **AwaitingFinalRating**: the session is over but the rating update
///   reflecting the last match hasn't arrived yet. The completion report
///   is emitted when it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Running,
    AwaitingFinalRating,
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Running => write!(f, "Running"),
            Self::AwaitingFinalRating => write!(f, "AwaitingFinalRating"),
        }
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// The counters and flags for the current session.
///
/// Owned exclusively by the [`SessionController`](crate::SessionController);
/// nothing else mutates it. Invariants:
///
/// - `games_remaining > 0` implies the session is running.
/// - `games_remaining == 0 && !awaiting_final_rating` implies idle.
/// - `games_played + games_remaining` stays equal to the starting game
///   count for the whole life of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// The mode this session queues for. Immutable while running.
    pub target_mode: GameMode,

    /// Matches left to play. `0` means no active session.
    pub games_remaining: u32,

    /// Matches completed this session. Reset at session start.
    pub games_played: u32,

    /// `true` between session end and the rating update that reflects
    /// the last match.
    pub awaiting_final_rating: bool,
}

impl SessionState {
    /// An idle state with no session history.
    pub fn new() -> Self {
        Self {
            target_mode: GameMode::RankedDuel,
            games_remaining: 0,
            games_played: 0,
            awaiting_final_rating: false,
        }
    }

    /// The current lifecycle phase, derived from the counters.
    pub fn phase(&self) -> SessionPhase {
        if self.games_remaining > 0 {
            SessionPhase::Running
        } else if self.awaiting_final_rating {
            SessionPhase::AwaitingFinalRating
        } else {
            SessionPhase::Idle
        }
    }

    /// `true` while matches are still being counted.
    pub fn is_running(&self) -> bool {
        self.phase() == SessionPhase::Running
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
