//! Error types for the host capability layer.

/// Errors surfaced when a host capability refuses or is unavailable.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// The host has not created its matchmaking handle yet.
    /// Transient — retried with a bounded budget before giving up.
    #[error("matchmaking service is not available")]
    MatchmakingUnavailable,

    /// Matchmaking accepted the request but never entered the searching
    /// state. Also transient.
    #[error("matchmaking did not start searching")]
    NotSearching,
}
