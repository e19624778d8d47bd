//! Error types for the session core.

/// Errors a session operation can report to its caller.
///
/// Deliberately small: duplicate events, stale timers and playlist
/// mismatches are handled internally (ignored or aborted with a log),
/// because nothing useful can propagate out of an event callback.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// `start` was called with a zero game count.
    #[error("a session needs at least one game")]
    InvalidGameCount,
}
