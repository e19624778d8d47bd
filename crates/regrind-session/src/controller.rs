//! The session controller: lifecycle, counters, and continue/stop
//! decisions.
//!
//! All mutable session state lives here, behind synchronous methods that
//! take host-supplied facts in and hand [`Effect`]s back. The facade calls
//! one method per host event; callbacks fully complete before the next
//! fires, so there is no locking and no re-entrancy to guard against.

use regrind_protocol::{
    GameMode, PlayerId, PluginSettings, ServerSnapshot,
};
use tracing::{debug, info, warn};

use crate::{
    plan_post_match, Effect, EndVerdict, MatchEndDetector, RankSnapshot,
    RankTracker, SessionError, SessionPhase, SessionState,
};

// ---------------------------------------------------------------------------
// HostContext
// ---------------------------------------------------------------------------

/// Host facts a decision depends on, gathered fresh by the facade at each
/// entry point so settings edits apply at the very next decision.
#[derive(Debug, Clone)]
pub struct HostContext {
    /// Current persisted settings.
    pub settings: PluginSettings,

    /// `true` while the player is in freeplay / a replay / custom
    /// training.
    pub in_practice: bool,

    /// Extra delay from the host's own auto-leave feature, if active.
    pub auto_leave_delay: Option<f32>,
}

// ---------------------------------------------------------------------------
// SessionController
// ---------------------------------------------------------------------------

/// Owns one player's grind-session state machine.
///
/// ```text
///   Idle ──start()──→ Running ──last match──→ AwaitingFinalRating
///                        │                          │
///                        ├─ stop() before a match ──┼──→ Idle
///                        └─ playlist mismatch ──────┘ (abort, no report)
/// ```
pub struct SessionController {
    local_player: PlayerId,
    state: SessionState,
    detector: MatchEndDetector,
    ranks: RankTracker,
}

impl SessionController {
    /// Creates an idle controller for the local player.
    pub fn new(local_player: PlayerId) -> Self {
        Self {
            local_player,
            state: SessionState::new(),
            detector: MatchEndDetector::new(),
            ranks: RankTracker::new(),
        }
    }

    /// The current session counters and flags.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    /// The most recently observed ratings.
    pub fn ranks(&self) -> Option<&RankSnapshot> {
        self.ranks.current()
    }

    /// Starts a session of `games` matches targeting `mode`.
    ///
    /// A session already running is stopped first. Captures the rating
    /// baseline, asks for matchmaking, and loads the practice map right
    /// away unless the player is already in a practice context (a manual
    /// start ignores the per-action delay and bypass filters).
    ///
    /// # Errors
    /// [`SessionError::InvalidGameCount`] when `games == 0`.
    pub fn start_session(
        &mut self,
        mode: GameMode,
        games: u32,
        ctx: &HostContext,
    ) -> Result<Vec<Effect>, SessionError> {
        if games == 0 {
            return Err(SessionError::InvalidGameCount);
        }

        let mut effects = Vec::new();
        if self.state.is_running() {
            debug!("session already running, stopping it first");
            effects.extend(self.stop_session());
        }

        self.state.target_mode = mode;
        self.state.games_remaining = games;
        self.state.games_played = 0;
        self.state.awaiting_final_rating = false;
        self.ranks.capture_session_start();

        info!(%mode, games, "session started");

        effects.push(Effect::BeginQueue);
        if !ctx.in_practice {
            effects.push(Effect::LoadTrainingMap);
        }
        Ok(effects)
    }

    /// Stops the session.
    ///
    /// With at least one match played, arms the final-rating report; the
    /// actual diff happens when the next rating update arrives. Stopping
    /// before any match completed reports nothing. Idempotent.
    pub fn stop_session(&mut self) -> Vec<Effect> {
        info!(
            games_played = self.state.games_played,
            games_remaining = self.state.games_remaining,
            "session stopped"
        );

        self.state.games_remaining = 0;
        if self.state.games_played == 0 {
            // No match finished: a rating comparison would be meaningless.
            self.ranks.discard_session_start();
            self.state.awaiting_final_rating = false;
        } else {
            self.state.awaiting_final_rating = true;
        }

        vec![Effect::CancelQueue]
    }

    /// Handles the authoritative match-ended event.
    ///
    /// Also the convergence point for heuristic ends detected from
    /// [`on_penalty_changed`](Self::on_penalty_changed): both paths pass
    /// through the same dedup guard, so double signals for one match
    /// count once.
    pub fn on_match_ended(
        &mut self,
        server: &ServerSnapshot,
        ctx: &HostContext,
    ) -> Vec<Effect> {
        if !self.detector.observe(&server.match_id) {
            return Vec::new();
        }

        if self.state.games_remaining == 0 {
            debug!(match_id = %server.match_id, "no active session, ignoring match end");
            return Vec::new();
        }

        self.state.games_played += 1;
        self.state.games_remaining -= 1;
        info!(
            match_id = %server.match_id,
            games_played = self.state.games_played,
            games_remaining = self.state.games_remaining,
            "match counted"
        );

        if self.state.games_remaining == 0 {
            return self.stop_session();
        }

        if let Some(playlist) = server.playlist {
            if playlist.as_game_mode() != Some(self.state.target_mode) {
                warn!(
                    %playlist,
                    target = %self.state.target_mode,
                    "match was not in the target playlist, aborting session"
                );
                self.abort_session();
                return Vec::new();
            }
        }

        plan_post_match(
            &ctx.settings,
            server.playlist.map(|p| p.category()),
            ctx.auto_leave_delay,
        )
        .into_iter()
        .map(Effect::Schedule)
        .collect()
    }

    /// Handles the penalty-changed event, the best-effort "match truly
    /// over" heuristic.
    pub fn on_penalty_changed(
        &mut self,
        server: &ServerSnapshot,
        ctx: &HostContext,
    ) -> Vec<Effect> {
        match MatchEndDetector::assess_penalty_lifted(server) {
            EndVerdict::MatchOver => self.on_match_ended(server, ctx),
            EndVerdict::StillPlaying => Vec::new(),
        }
    }

    /// Handles a rating-update notification.
    ///
    /// `ratings` is the freshly looked-up per-mode snapshot, or `None`
    /// when the host couldn't provide one. Updates for other players are
    /// logged and change nothing.
    pub fn on_rating_update(
        &mut self,
        player: PlayerId,
        ratings: Option<RankSnapshot>,
    ) -> Vec<Effect> {
        if player != self.local_player {
            warn!(%player, "rating update for unrecognized player");
            return Vec::new();
        }

        let Some(new) = ratings else {
            debug!("rating update without readable ratings");
            return Vec::new();
        };
        self.ranks.observe(new);

        if !self.state.awaiting_final_rating {
            return Vec::new();
        }
        self.state.awaiting_final_rating = false;
        info!("final rating update for the session arrived");

        let mut body = format!("Completed {} games", self.state.games_played);
        if let Some(diff) = self.ranks.take_session_diff() {
            for line in diff.report_lines() {
                body.push('\n');
                body.push_str(&line);
            }
        }

        vec![
            Effect::LoadTrainingMap,
            Effect::Notify {
                title: "Session Complete".to_string(),
                body,
            },
        ]
    }

    /// Zeroes the counters and forgets any pending report so the machine
    /// lands in a clean idle state.
    fn abort_session(&mut self) {
        self.state.games_remaining = 0;
        self.state.awaiting_final_rating = false;
        self.ranks.discard_session_start();
    }
}

// =========================================================================
// Tests
// =========================================================================
