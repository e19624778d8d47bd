//! Playlist taxonomy and the single mapping boundary to host-numeric ids.
//!
//! The host identifies playlists by bare integers. Those integers cross into
//! the plugin exactly once, here, through [`Playlist::from_host_id`] — core
//! logic only ever sees the closed enum.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Playlist
// ---------------------------------------------------------------------------

/// Every playlist the host can report a match for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Playlist {
    CasualDuel,
    CasualDoubles,
    CasualStandard,
    CasualChaos,
    Private,
    RankedDuel,
    RankedDoubles,
    RankedSoloStandard,
    RankedStandard,
    MutatorMashup,
    Tournament,
    RankedHoops,
    RankedRumble,
    RankedDropshot,
    RankedSnowday,
    GodBall,
    GodBallDoubles,
}

/// The reviewed mapping table: `(host id, playlist)` pairs, one per variant.
///
/// Kept as a single table so an id change in the host is a one-line edit
/// reviewed in one place.
const HOST_ID_TABLE: &[(i32, Playlist)] = &[
    (1, Playlist::CasualDuel),
    (2, Playlist::CasualDoubles),
    (3, Playlist::CasualStandard),
    (4, Playlist::CasualChaos),
    (6, Playlist::Private),
    (10, Playlist::RankedDuel),
    (11, Playlist::RankedDoubles),
    (12, Playlist::RankedSoloStandard),
    (13, Playlist::RankedStandard),
    (14, Playlist::MutatorMashup),
    (22, Playlist::Tournament),
    (27, Playlist::RankedHoops),
    (28, Playlist::RankedRumble),
    (29, Playlist::RankedDropshot),
    (30, Playlist::RankedSnowday),
    (38, Playlist::GodBall),
    (43, Playlist::GodBallDoubles),
];

impl Playlist {
    /// All playlists, in host-id order. Used when clearing every
    /// matchmaking selection before queueing.
    pub const ALL: [Playlist; 17] = [
        Playlist::CasualDuel,
        Playlist::CasualDoubles,
        Playlist::CasualStandard,
        Playlist::CasualChaos,
        Playlist::Private,
        Playlist::RankedDuel,
        Playlist::RankedDoubles,
        Playlist::RankedSoloStandard,
        Playlist::RankedStandard,
        Playlist::MutatorMashup,
        Playlist::Tournament,
        Playlist::RankedHoops,
        Playlist::RankedRumble,
        Playlist::RankedDropshot,
        Playlist::RankedSnowday,
        Playlist::GodBall,
        Playlist::GodBallDoubles,
    ];

    /// Resolves a host-numeric playlist id.
    ///
    /// # Errors
    /// Returns [`ProtocolError::UnknownPlaylist`] for ids outside the
    /// mapping table (new or experimental host playlists).
    pub fn from_host_id(id: i32) -> Result<Self, ProtocolError> {
        HOST_ID_TABLE
            .iter()
            .find(|(host_id, _)| *host_id == id)
            .map(|(_, playlist)| *playlist)
            .ok_or(ProtocolError::UnknownPlaylist(id))
    }

    /// The host-numeric id for this playlist.
    pub fn host_id(self) -> i32 {
        // The table covers every variant, so the lookup cannot miss.
        HOST_ID_TABLE
            .iter()
            .find(|(_, playlist)| *playlist == self)
            .map(|(host_id, _)| *host_id)
            .expect("every playlist variant is in HOST_ID_TABLE")
    }

    /// The broad category used by matchmaking and the per-action
    /// bypass filters.
    pub fn category(self) -> PlaylistCategory {
        match self {
            Playlist::CasualDuel
            | Playlist::CasualDoubles
            | Playlist::CasualStandard
            | Playlist::CasualChaos => PlaylistCategory::Casual,
            Playlist::Private | Playlist::Tournament => {
                PlaylistCategory::PrivateTournament
            }
            Playlist::RankedDuel
            | Playlist::RankedDoubles
            | Playlist::RankedSoloStandard
            | Playlist::RankedStandard
            | Playlist::RankedHoops
            | Playlist::RankedRumble
            | Playlist::RankedDropshot
            | Playlist::RankedSnowday => PlaylistCategory::Ranked,
            Playlist::MutatorMashup
            | Playlist::GodBall
            | Playlist::GodBallDoubles => PlaylistCategory::Other,
        }
    }

    /// The grind mode this playlist corresponds to, if it is one of the
    /// three modes a session can target.
    pub fn as_game_mode(self) -> Option<GameMode> {
        match self {
            Playlist::RankedDuel => Some(GameMode::RankedDuel),
            Playlist::RankedDoubles => Some(GameMode::RankedDoubles),
            Playlist::RankedStandard => Some(GameMode::RankedStandard),
            _ => None,
        }
    }
}

impl fmt::Display for Playlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

// ---------------------------------------------------------------------------
// PlaylistCategory
// ---------------------------------------------------------------------------

/// Coarse playlist grouping.
///
/// Matchmaking searches within one category; the post-match action filters
/// distinguish casual and private/tournament lobbies from everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaylistCategory {
    Casual,
    Ranked,
    PrivateTournament,
    Other,
}

impl fmt::Display for PlaylistCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Casual => write!(f, "casual"),
            Self::Ranked => write!(f, "ranked"),
            Self::PrivateTournament => write!(f, "private/tournament"),
            Self::Other => write!(f, "other"),
        }
    }
}

// ---------------------------------------------------------------------------
// GameMode
// ---------------------------------------------------------------------------

/// The three modes a grind session can target.
///
/// A session locks onto one of these at start and never changes it until
/// the session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    RankedDuel,
    RankedDoubles,
    RankedStandard,
}

impl GameMode {
    /// All targetable modes, for settings UIs and rank iteration.
    pub const ALL: [GameMode; 3] = [
        GameMode::RankedDuel,
        GameMode::RankedDoubles,
        GameMode::RankedStandard,
    ];

    /// The playlist matchmaking should search when targeting this mode.
    pub fn playlist(self) -> Playlist {
        match self {
            GameMode::RankedDuel => Playlist::RankedDuel,
            GameMode::RankedDoubles => Playlist::RankedDoubles,
            GameMode::RankedStandard => Playlist::RankedStandard,
        }
    }

    /// Short label used in completion reports.
    pub fn label(self) -> &'static str {
        match self {
            GameMode::RankedDuel => "1v1",
            GameMode::RankedDoubles => "2v2",
            GameMode::RankedStandard => "3v3",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::RankedDuel => write!(f, "Ranked Duel"),
            GameMode::RankedDoubles => write!(f, "Ranked Doubles"),
            GameMode::RankedStandard => write!(f, "Ranked Standard"),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
