//! Unified error type for the Regrind facade.

use regrind_host::HostError;
use regrind_protocol::ProtocolError;
use regrind_session::SessionError;

/// Top-level error wrapping the crate-specific errors, so facade users
/// deal with one type and `?` converts automatically.
#[derive(Debug, thiserror::Error)]
pub enum RegrindError {
    /// A protocol-level error (unknown playlist id).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A host capability was unavailable or refused.
    #[error(transparent)]
    Host(#[from] HostError),

    /// A session operation was invalid.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The plugin actor task has stopped (shutdown or handle dropped).
    #[error("plugin task is not running")]
    PluginStopped,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_session_error() {
        let err: RegrindError = SessionError::InvalidGameCount.into();
        assert!(matches!(err, RegrindError::Session(_)));
        assert!(err.to_string().contains("at least one game"));
    }

    #[test]
    fn test_from_host_error() {
        let err: RegrindError = HostError::MatchmakingUnavailable.into();
        assert!(matches!(err, RegrindError::Host(_)));
    }

    #[test]
    fn test_from_protocol_error() {
        let err: RegrindError = ProtocolError::UnknownPlaylist(99).into();
        assert!(matches!(err, RegrindError::Protocol(_)));
        assert!(err.to_string().contains("99"));
    }
}
