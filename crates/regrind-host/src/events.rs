//! The host event stream.
//!
//! The host's subscribe/unsubscribe API is reframed as a message enum: glue
//! code registers closures with the host that forward each callback as one
//! `HostEvent` into the plugin's channel. Unsubscribing is dropping the
//! sender — safe even if no event was ever forwarded.

use regrind_protocol::{PlayerId, ServerSnapshot};

/// One host callback, as delivered to the plugin actor.
#[derive(Debug, Clone)]
pub enum HostEvent {
    /// Authoritative match-end: the engine declared the match over.
    /// Fires once per match (but the detector dedups regardless).
    MatchEnded { server: ServerSnapshot },

    /// The "leaving is penalized" flag changed. Fires after the host
    /// updated its state, for both legitimate match ends and mid-match
    /// abandons — the detector's heuristics tell the two apart.
    PenaltyChanged { server: ServerSnapshot },

    /// The matchmaking service delivered new ratings for a player.
    RatingUpdated { player: PlayerId },
}
