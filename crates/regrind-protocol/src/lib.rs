//! Shared vocabulary for Regrind.
//!
//! This crate defines every type that crosses a component boundary: player
//! and match identities, the playlist/game-mode taxonomy (including the one
//! reviewed mapping table to host-numeric playlist ids), the read-only
//! server snapshot delivered with host events, and the persisted settings
//! surface.
//!
//! Nothing in here has behavior beyond classification — the session state
//! machine lives in `regrind-session`, and host access lives in
//! `regrind-host`.

mod config;
mod error;
mod playlist;
mod types;

pub use config::{ActionKind, ActionSettings, PluginSettings, RANDOM_MAP};
pub use error::ProtocolError;
pub use playlist::{GameMode, Playlist, PlaylistCategory};
pub use types::{MatchId, PlayerId, ServerSnapshot};
