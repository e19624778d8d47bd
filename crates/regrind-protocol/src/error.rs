//! Error types for the protocol layer.

/// Errors produced while classifying host-supplied data.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The host reported a playlist id outside the mapping table.
    /// Happens when the game ships a new playlist before the table is
    /// updated; callers treat the playlist as unknown and log a warning.
    #[error("unknown host playlist id {0}")]
    UnknownPlaylist(i32),
}
