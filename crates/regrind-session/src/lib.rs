//! The grind-session core: everything that decides, nothing that does.
//!
//! This crate owns the match-end session state machine:
//!
//! 1. **Match-End Detector** ([`MatchEndDetector`]) — decides, exactly once
//!    per match, that a match has concluded, from two racy signals.
//! 2. **Session Controller** ([`SessionController`]) — session lifecycle,
//!    games-played/remaining counters, continue/stop decisions.
//! 3. **Action planning** ([`plan_post_match`]) — which post-match side
//!    effects run, and after what delay.
//! 4. **Rank Tracker** ([`RankTracker`]) — per-mode rating state and the
//!    session-start vs. session-end delta report.
//!
//! Every entry point is synchronous and returns [`Effect`] values instead
//! of touching the host — the facade crate interprets effects against the
//! host capability traits. That split keeps this crate's state machine
//! testable without a runtime.

mod actions;
mod controller;
mod detector;
mod effect;
mod error;
mod rank;
mod session;

pub use actions::{plan_post_match, PlannedAction};
pub use controller::{HostContext, SessionController};
pub use detector::{EndVerdict, MatchEndDetector};
pub use effect::Effect;
pub use error::SessionError;
pub use rank::{nearly_equal, RankDiff, RankSnapshot, RankTracker};
pub use session::{SessionPhase, SessionState};
