//! The plugin actor: one task that owns every piece of mutable state.
//!
//! Host callbacks, UI commands, and due timers all arrive as messages on
//! one channel-driven loop and are processed to completion, one at a time,
//! in arrival order. That is the whole concurrency model — no locks, no
//! re-entrancy, and a timer can never fire in the middle of another
//! callback.

use std::time::Duration;

use regrind_host::{
    GameClient, Host, HostError, HostEvent, Matchmaking, Notifier,
    RatingProvider, SettingsStore,
};
use regrind_protocol::{
    ActionKind, GameMode, Playlist, PlaylistCategory, PluginSettings,
};
use regrind_session::{
    Effect, HostContext, RankSnapshot, SessionController, SessionError,
    SessionPhase,
};
use regrind_timer::DelayQueue;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::training::{freeplay_command, resolve_training_map};
use crate::RegrindError;

/// Attempts before a queue request gives up on the host.
const QUEUE_ATTEMPTS: u32 = 10;
/// Fixed wait between queue attempts.
const QUEUE_RETRY_WAIT: Duration = Duration::from_millis(100);
/// Jitter added per retry so attempts don't land on an exact cadence.
const QUEUE_RETRY_JITTER: Duration = Duration::from_millis(25);

// ---------------------------------------------------------------------------
// Commands and status
// ---------------------------------------------------------------------------

/// Messages sent to the plugin actor through its channel.
enum PluginCommand {
    /// Begin a grind session.
    StartSession {
        mode: GameMode,
        games: u32,
        reply: oneshot::Sender<Result<(), SessionError>>,
    },

    /// End the current session (manual stop).
    StopSession,

    /// A forwarded host callback.
    Event(HostEvent),

    /// Request the current session status.
    GetStatus {
        reply: oneshot::Sender<SessionStatus>,
    },

    /// Stop the actor. Idempotent; dropping every handle does the same.
    Shutdown,
}

/// A snapshot of session progress for the settings UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStatus {
    pub phase: SessionPhase,
    pub target_mode: GameMode,
    pub games_played: u32,
    pub games_remaining: u32,
}

// ---------------------------------------------------------------------------
// PluginHandle
// ---------------------------------------------------------------------------

/// Handle to a running plugin actor. Cheap to clone.
///
/// Host glue keeps one to forward events; the settings UI keeps another
/// for start/stop/status.
#[derive(Clone)]
pub struct PluginHandle {
    sender: mpsc::Sender<PluginCommand>,
}

impl PluginHandle {
    /// Starts a session of `games` matches targeting `mode`.
    ///
    /// # Errors
    /// [`RegrindError::Session`] for a zero game count, or
    /// [`RegrindError::PluginStopped`] if the actor is gone.
    pub async fn start_session(
        &self,
        mode: GameMode,
        games: u32,
    ) -> Result<(), RegrindError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(PluginCommand::StartSession {
                mode,
                games,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RegrindError::PluginStopped)?;
        reply_rx
            .await
            .map_err(|_| RegrindError::PluginStopped)?
            .map_err(RegrindError::from)
    }

    /// Ends the current session. A session with no completed matches
    /// stops silently; otherwise the completion report follows the next
    /// rating update.
    pub async fn stop_session(&self) -> Result<(), RegrindError> {
        self.sender
            .send(PluginCommand::StopSession)
            .await
            .map_err(|_| RegrindError::PluginStopped)
    }

    /// Forwards a host callback into the actor.
    pub async fn host_event(
        &self,
        event: HostEvent,
    ) -> Result<(), RegrindError> {
        self.sender
            .send(PluginCommand::Event(event))
            .await
            .map_err(|_| RegrindError::PluginStopped)
    }

    /// The current session status.
    pub async fn status(&self) -> Result<SessionStatus, RegrindError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(PluginCommand::GetStatus { reply: reply_tx })
            .await
            .map_err(|_| RegrindError::PluginStopped)?;
        reply_rx.await.map_err(|_| RegrindError::PluginStopped)
    }

    /// Stops the actor. Safe to call repeatedly, or never.
    pub async fn shutdown(&self) {
        let _ = self.sender.send(PluginCommand::Shutdown).await;
    }
}

/// Spawns the plugin actor for `host` and returns a handle to it.
pub fn spawn_plugin<H: Host>(host: H) -> PluginHandle {
    let (tx, rx) = mpsc::channel(64);

    let controller = SessionController::new(host.local_player());
    let actor = PluginActor {
        host,
        controller,
        timers: DelayQueue::new(),
        receiver: rx,
    };
    tokio::spawn(actor.run());

    PluginHandle { sender: tx }
}

// ---------------------------------------------------------------------------
// PluginActor
// ---------------------------------------------------------------------------

/// A post-match action whose delay elapsed, or a pending queue retry.
#[derive(Debug, Clone, Copy)]
enum PendingTask {
    /// Execute a delayed post-match action (guard-checked at fire time).
    Action(ActionKind),
    /// Retry a queue request that found the host not ready.
    QueueRetry { attempts_left: u32 },
}

/// What the select loop picked up this iteration.
enum Step {
    Command(Option<PluginCommand>),
    Due(PendingTask),
}

struct PluginActor<H: Host> {
    host: H,
    controller: SessionController,
    timers: DelayQueue<PendingTask>,
    receiver: mpsc::Receiver<PluginCommand>,
}

impl<H: Host> PluginActor<H> {
    async fn run(mut self) {
        info!("plugin actor started");
        self.prime_ratings();

        loop {
            let step = tokio::select! {
                maybe = self.receiver.recv() => Step::Command(maybe),
                task = self.timers.next_due() => Step::Due(task),
            };

            match step {
                // Channel closed (all handles dropped) or explicit stop:
                // either way, unhook and wind down.
                Step::Command(None) | Step::Command(Some(PluginCommand::Shutdown)) => {
                    break;
                }
                Step::Command(Some(cmd)) => self.handle_command(cmd),
                Step::Due(task) => self.handle_due(task),
            }
        }

        self.timers.clear();
        info!("plugin actor stopped");
    }

    /// Seeds the rank tracker with whatever ratings the host already has.
    /// A host that hasn't delivered ratings yet leaves the tracker empty;
    /// the first rating-update notification fills it in.
    fn prime_ratings(&mut self) {
        let local = self.host.local_player();
        let provider = self.host.rating();
        let ratings =
            RankSnapshot::from_lookup(|mode| provider.rating(local, mode));
        let effects = self.controller.on_rating_update(local, ratings);
        self.apply(effects);
    }

    fn handle_command(&mut self, cmd: PluginCommand) {
        match cmd {
            PluginCommand::StartSession { mode, games, reply } => {
                let result = self.start_session(mode, games);
                let _ = reply.send(result);
            }
            PluginCommand::StopSession => {
                let effects = self.controller.stop_session();
                self.apply(effects);
            }
            PluginCommand::Event(event) => self.handle_event(event),
            PluginCommand::GetStatus { reply } => {
                let _ = reply.send(self.status());
            }
            // Handled by the run loop.
            PluginCommand::Shutdown => {}
        }
    }

    fn start_session(
        &mut self,
        mode: GameMode,
        games: u32,
    ) -> Result<(), SessionError> {
        let ctx = self.host_context();
        let effects = self.controller.start_session(mode, games, &ctx)?;
        self.apply(effects);
        Ok(())
    }

    fn status(&self) -> SessionStatus {
        let state = self.controller.state();
        SessionStatus {
            phase: state.phase(),
            target_mode: state.target_mode,
            games_played: state.games_played,
            games_remaining: state.games_remaining,
        }
    }

    /// Gathers the host facts a decision needs. Called fresh per event so
    /// settings edits apply immediately.
    fn host_context(&mut self) -> HostContext {
        let settings = read_settings(self.host.settings());
        HostContext {
            settings,
            in_practice: self.host.client().in_practice_context(),
            auto_leave_delay: self.host.client().auto_leave_delay(),
        }
    }

    fn handle_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::MatchEnded { server } => {
                if !self.host.settings().plugin_enabled() {
                    debug!("plugin disabled, ignoring match end");
                    return;
                }
                let ctx = self.host_context();
                let effects = self.controller.on_match_ended(&server, &ctx);
                self.apply(effects);
            }
            HostEvent::PenaltyChanged { server } => {
                if !self.host.settings().plugin_enabled() {
                    return;
                }
                let ctx = self.host_context();
                let effects =
                    self.controller.on_penalty_changed(&server, &ctx);
                self.apply(effects);
            }
            HostEvent::RatingUpdated { player } => {
                let local = self.host.local_player();
                let ratings = if player == local {
                    let provider = self.host.rating();
                    RankSnapshot::from_lookup(|mode| {
                        provider.rating(local, mode)
                    })
                } else {
                    None
                };
                let effects =
                    self.controller.on_rating_update(player, ratings);
                self.apply(effects);
            }
        }
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::BeginQueue => self.try_queue(QUEUE_ATTEMPTS),
                Effect::CancelQueue => self.cancel_queue(),
                Effect::Schedule(planned) => {
                    debug!(
                        action = %planned.kind,
                        delay_ms = planned.delay.as_millis() as u64,
                        "post-match action scheduled"
                    );
                    self.timers.schedule(
                        planned.delay,
                        PendingTask::Action(planned.kind),
                    );
                }
                Effect::LoadTrainingMap => self.load_training_map(),
                Effect::Notify { title, body } => {
                    self.host.notifier().notify(&title, &body);
                }
            }
        }
    }

    fn handle_due(&mut self, task: PendingTask) {
        match task {
            PendingTask::QueueRetry { attempts_left } => {
                if self.controller.state().is_running() {
                    self.try_queue(attempts_left);
                } else {
                    debug!("queue retry is stale, session no longer running");
                }
            }
            PendingTask::Action(kind) => self.execute_action(kind),
        }
    }

    /// Runs a delayed post-match action, re-validating its precondition:
    /// the state the action was scheduled under may be gone by now.
    fn execute_action(&mut self, kind: ActionKind) {
        if self.host.client().has_leave_penalty() {
            debug!(action = %kind, "leave penalty active, dropping stale action");
            return;
        }

        match kind {
            ActionKind::Requeue => {
                if self.controller.state().is_running() {
                    self.try_queue(QUEUE_ATTEMPTS);
                } else {
                    debug!("requeue is stale, session no longer running");
                }
            }
            ActionKind::Training => self.load_training_map(),
            ActionKind::Exit => {
                info!("exiting to main menu");
                self.host.client().disconnect();
            }
        }
    }

    /// One queue request against the host's matchmaking service.
    fn queue_once(&mut self) -> Result<(), HostError> {
        let target = self.controller.state().target_mode;

        let Some(mm) = self.host.matchmaking() else {
            return Err(HostError::MatchmakingUnavailable);
        };

        // Selection is mutually exclusive per search: clear everything,
        // then pick the session's playlist.
        for playlist in Playlist::ALL {
            mm.set_playlist_selection(playlist, false);
        }
        mm.set_playlist_selection(target.playlist(), true);
        mm.start_matchmaking(PlaylistCategory::Ranked);

        if !mm.is_searching() {
            return Err(HostError::NotSearching);
        }
        info!(%target, "queued into matchmaking");
        Ok(())
    }

    fn try_queue(&mut self, attempts_left: u32) {
        if attempts_left == 0 {
            warn!("queue attempts exhausted, giving up");
            self.host
                .notifier()
                .notify("Regrind", "Failed to start matchmaking");
            return;
        }

        if let Err(error) = self.queue_once() {
            debug!(%error, attempts_left, "queue attempt failed, retrying");
            self.timers.schedule_jittered(
                QUEUE_RETRY_WAIT,
                QUEUE_RETRY_JITTER,
                PendingTask::QueueRetry {
                    attempts_left: attempts_left - 1,
                },
            );
        }
    }

    fn cancel_queue(&mut self) {
        if let Some(mm) = self.host.matchmaking() {
            if mm.is_searching() {
                info!("canceling matchmaking");
                mm.cancel_matchmaking();
            }
        }
    }

    fn load_training_map(&mut self) {
        if self.host.client().has_leave_penalty() {
            debug!("leave penalty active, skipping training load");
            return;
        }

        let configured = self.host.settings().training_map();
        let map = resolve_training_map(&configured);
        let command = freeplay_command(&map);
        info!(%map, "loading training map");
        self.host.client().load_map(&command);
    }
}

/// Reads the full settings surface through the store trait.
///
/// The result feeds a single decision and is thrown away; nothing caches
/// it across events.
fn read_settings(store: &impl SettingsStore) -> PluginSettings {
    PluginSettings {
        enabled: store.plugin_enabled(),
        requeue: store.action(ActionKind::Requeue),
        training: store.action(ActionKind::Training),
        exit: store.action(ActionKind::Exit),
        training_map: store.training_map(),
    }
}
