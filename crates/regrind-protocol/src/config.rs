//! The persisted settings surface.
//!
//! Host glue owns persistence (cvar files, key/value stores); these types
//! only define the shape. The core reads them fresh at every decision point
//! through `SettingsStore`, so an edit in the settings UI takes effect on
//! the very next match end.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel training-map name meaning "pick one for me".
pub const RANDOM_MAP: &str = "random";

// ---------------------------------------------------------------------------
// ActionKind
// ---------------------------------------------------------------------------

/// The three post-match side effects a session can schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Queue back into matchmaking for the session's target mode.
    Requeue,
    /// Load the configured practice map.
    Training,
    /// Disconnect to the main menu.
    Exit,
}

impl ActionKind {
    /// All actions, in dispatch order.
    pub const ALL: [ActionKind; 3] =
        [ActionKind::Requeue, ActionKind::Training, ActionKind::Exit];
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Requeue => write!(f, "requeue"),
            Self::Training => write!(f, "training"),
            Self::Exit => write!(f, "exit"),
        }
    }
}

// ---------------------------------------------------------------------------
// ActionSettings
// ---------------------------------------------------------------------------

/// Per-action configuration: whether it runs, how long after the match it
/// runs, and which lobby categories it skips.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionSettings {
    /// Whether this action runs at all.
    pub enabled: bool,

    /// Seconds to wait after the match end before executing.
    pub delay_secs: f32,

    /// Skip this action when the finished match was in a casual playlist.
    pub bypass_casual: bool,

    /// Skip this action when the finished match was in a private or
    /// tournament lobby.
    pub bypass_private: bool,
}

impl ActionSettings {
    /// An enabled action with no delay and no bypass filters.
    pub fn immediate() -> Self {
        Self {
            enabled: true,
            delay_secs: 0.0,
            ..Self::default()
        }
    }
}

impl Default for ActionSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            delay_secs: 0.0,
            bypass_casual: false,
            bypass_private: false,
        }
    }
}

// ---------------------------------------------------------------------------
// PluginSettings
// ---------------------------------------------------------------------------

/// The full persisted configuration.
///
/// Defaults mirror a fresh install: the plugin is on, requeue and training
/// fire immediately after each match, exit-to-menu is off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginSettings {
    /// Master toggle. When off, match-end and penalty events are ignored.
    pub enabled: bool,

    /// Requeue-into-matchmaking action.
    pub requeue: ActionSettings,

    /// Load-practice-map action.
    pub training: ActionSettings,

    /// Exit-to-main-menu action.
    pub exit: ActionSettings,

    /// Map to load for training, or [`RANDOM_MAP`].
    pub training_map: String,
}

impl PluginSettings {
    /// The settings for one action kind.
    pub fn action(&self, kind: ActionKind) -> ActionSettings {
        match kind {
            ActionKind::Requeue => self.requeue,
            ActionKind::Training => self.training,
            ActionKind::Exit => self.exit,
        }
    }
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            requeue: ActionSettings::immediate(),
            training: ActionSettings::immediate(),
            exit: ActionSettings::default(),
            training_map: "EuroStadium_Night_P".to_string(),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
