//! # Regrind
//!
//! Automated ranked grind sessions for plugin-hosted game runtimes.
//!
//! Regrind counts matches in a bounded session, requeues into matchmaking,
//! loads a practice map between games, optionally exits to the menu, and
//! reports the session's MMR movement when it ends. The host runtime
//! provides everything else through the capability traits in
//! [`regrind_host`]; implement [`Host`] once in your glue layer, then:
//!
//! ```rust,no_run
//! # async fn demo(host: impl regrind::Host) {
//! use regrind::{spawn_plugin, GameMode};
//!
//! let plugin = spawn_plugin(host);
//! plugin.start_session(GameMode::RankedDoubles, 10).await.unwrap();
//! # }
//! ```
//!
//! Host glue forwards each game callback as a [`HostEvent`] through
//! [`PluginHandle::host_event`]; everything else happens inside the plugin
//! actor task.

mod error;
mod plugin;
mod training;

pub use error::RegrindError;
pub use plugin::{spawn_plugin, PluginHandle, SessionStatus};
pub use training::{freeplay_command, resolve_training_map};

// The vocabulary a host glue layer needs, re-exported for convenience.
pub use regrind_host::{
    GameClient, Host, HostEvent, Matchmaking, MemorySettings, Notifier,
    RatingProvider, SettingsStore,
};
pub use regrind_protocol::{
    ActionKind, ActionSettings, GameMode, MatchId, PlayerId, Playlist,
    PlaylistCategory, PluginSettings, ServerSnapshot, RANDOM_MAP,
};
pub use regrind_session::{SessionPhase, SessionState};
