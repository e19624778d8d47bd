//! Capability interfaces the plugin host provides to Regrind.
//!
//! Regrind never talks to the game directly — everything it can observe or
//! do goes through the traits in this crate. Host glue (the actual
//! game-modification runtime binding) implements them once; demos and tests
//! implement them with scripted fakes.
//!
//! # How it fits in the stack
//!
//! ```text
//! regrind (facade)          ← drives these traits from the plugin actor
//!     ↕
//! Host layer (this crate)   ← capability traits + the host event stream
//!     ↕
//! regrind-protocol (below)  ← ids, playlists, snapshots, settings types
//! ```

mod error;
mod events;
mod settings;

pub use error::HostError;
pub use events::HostEvent;
pub use settings::MemorySettings;

use regrind_protocol::{
    ActionKind, ActionSettings, GameMode, PlayerId, Playlist,
    PlaylistCategory,
};

// ---------------------------------------------------------------------------
// Capability traits
// ---------------------------------------------------------------------------

/// The host's matchmaking service.
///
/// Selection is mutually exclusive per search: the host only honors one
/// active playlist category, so callers clear every selection before
/// picking the one they want.
pub trait Matchmaking {
    /// Marks a playlist as selected (or not) for the next search.
    fn set_playlist_selection(&mut self, playlist: Playlist, selected: bool);

    /// Starts searching within the given category.
    fn start_matchmaking(&mut self, category: PlaylistCategory);

    /// Cancels an in-progress search. Safe to call when not searching.
    fn cancel_matchmaking(&mut self);

    /// `true` while a search is running.
    fn is_searching(&self) -> bool;
}

/// Read access to the matchmaking service's per-mode skill ratings.
pub trait RatingProvider {
    /// The current rating for a player in one mode, or `None` if the host
    /// has not delivered a rating yet.
    fn rating(&self, player: PlayerId, mode: GameMode) -> Option<f32>;
}

/// Commands against the local game client.
pub trait GameClient {
    /// Executes a map-load command (the host's command grammar).
    fn load_map(&mut self, command: &str);

    /// Disconnects from the current server, back to the main menu.
    fn disconnect(&mut self);

    /// `true` while the player is in freeplay, a replay, or custom
    /// training — contexts where loading a practice map is redundant.
    fn in_practice_context(&self) -> bool;

    /// `true` while leaving the current match would be penalized.
    /// Reports `false` when there is no current match.
    fn has_leave_penalty(&self) -> bool;

    /// Extra seconds the host's own auto-leave feature will wait before
    /// disconnecting, if that feature is active. Plugin actions add this
    /// on top of their own delay so they never race the host.
    fn auto_leave_delay(&self) -> Option<f32>;
}

/// User-visible notifications (toasts).
pub trait Notifier {
    /// Shows a toast with a title and a multi-line body.
    fn notify(&mut self, title: &str, body: &str);
}

/// Read access to the persisted plugin settings.
///
/// Implementations return the *current* value on every call; the core never
/// caches, so settings edits apply at the next decision point.
pub trait SettingsStore {
    /// Master toggle.
    fn plugin_enabled(&self) -> bool;

    /// Configuration for one post-match action.
    fn action(&self, kind: ActionKind) -> ActionSettings;

    /// The configured training map (possibly the `"random"` sentinel).
    fn training_map(&self) -> String;
}

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

/// Everything the plugin needs from its host, in one place.
///
/// Associated types keep each capability independently mockable while the
/// plugin stays generic over a single parameter.
pub trait Host: Send + 'static {
    type Matchmaking: Matchmaking;
    type Rating: RatingProvider;
    type Client: GameClient;
    type Notifier: Notifier;
    type Settings: SettingsStore;

    /// The matchmaking service, or `None` while the host hasn't created
    /// its handle yet (transient — worth retrying shortly).
    fn matchmaking(&mut self) -> Option<&mut Self::Matchmaking>;

    /// Rating lookups.
    fn rating(&self) -> &Self::Rating;

    /// The local game client.
    fn client(&mut self) -> &mut Self::Client;

    /// Toast notifications.
    fn notifier(&mut self) -> &mut Self::Notifier;

    /// Persisted settings.
    fn settings(&self) -> &Self::Settings;

    /// The local player's id, for filtering rating-update events.
    fn local_player(&self) -> PlayerId;
}
