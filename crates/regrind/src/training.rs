//! Training-map resolution and the freeplay load command.

use rand::prelude::IndexedRandom;
use regrind_protocol::RANDOM_MAP;

/// Freeplay-capable maps used when the configured map is the `"random"`
/// sentinel. The host has no random-map endpoint, so the pick happens here.
const FREEPLAY_MAP_POOL: &[&str] = &[
    "EuroStadium_Night_P",
    "Stadium_P",
    "Park_Night_P",
    "UtopiaStadium_Dusk_P",
    "NeoTokyo_Standard_P",
    "Wasteland_Night_S_P",
    "TrainStation_Night_P",
    "beach_night_p",
];

/// Resolves the configured training map name to a concrete map code.
pub fn resolve_training_map(configured: &str) -> String {
    if configured == RANDOM_MAP {
        FREEPLAY_MAP_POOL
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(FREEPLAY_MAP_POOL[0])
            .to_string()
    } else {
        configured.to_string()
    }
}

/// The host command that loads `map` as a freeplay session.
pub fn freeplay_command(map: &str) -> String {
    format!("start {map}?Game=TAGame.GameInfo_Tutorial_TA?GameTags=Freeplay")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_named_map_passes_through() {
        assert_eq!(resolve_training_map("Stadium_P"), "Stadium_P");
    }

    #[test]
    fn test_resolve_random_picks_from_pool() {
        for _ in 0..32 {
            let map = resolve_training_map(RANDOM_MAP);
            assert!(
                FREEPLAY_MAP_POOL.contains(&map.as_str()),
                "{map} not in pool"
            );
        }
    }

    #[test]
    fn test_freeplay_command_shape() {
        assert_eq!(
            freeplay_command("Stadium_P"),
            "start Stadium_P?Game=TAGame.GameInfo_Tutorial_TA?GameTags=Freeplay"
        );
    }
}
