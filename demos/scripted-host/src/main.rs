//! A scripted fake host driving Regrind through a full grind session.
//!
//! Run with `cargo run -p scripted-host` (set `RUST_LOG=debug` for the
//! full decision trace). The script plays a two-game Ranked Doubles
//! session: queue, two match ends (one authoritative, one detected from
//! the penalty heuristic), a rating update, and the completion toast.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use regrind::{
    spawn_plugin, GameClient, GameMode, Host, HostEvent, Matchmaking,
    MatchId, MemorySettings, Notifier, PlayerId, Playlist,
    PlaylistCategory, PluginSettings, RatingProvider, ServerSnapshot,
};
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// Scripted host
// ---------------------------------------------------------------------------

/// Mutable world state shared between the script and the capability impls.
#[derive(Default)]
struct World {
    searching: bool,
    ratings: Option<(f32, f32, f32)>,
}

type SharedWorld = Arc<Mutex<World>>;

struct ScriptedMatchmaking(SharedWorld);

impl Matchmaking for ScriptedMatchmaking {
    fn set_playlist_selection(&mut self, playlist: Playlist, selected: bool) {
        if selected {
            info!(%playlist, "host: playlist selected");
        }
    }

    fn start_matchmaking(&mut self, category: PlaylistCategory) {
        info!(%category, "host: matchmaking started");
        self.0.lock().unwrap().searching = true;
    }

    fn cancel_matchmaking(&mut self) {
        info!("host: matchmaking canceled");
        self.0.lock().unwrap().searching = false;
    }

    fn is_searching(&self) -> bool {
        self.0.lock().unwrap().searching
    }
}

struct ScriptedRatings(SharedWorld);

impl RatingProvider for ScriptedRatings {
    fn rating(&self, _player: PlayerId, mode: GameMode) -> Option<f32> {
        self.0.lock().unwrap().ratings.map(|(duel, doubles, standard)| {
            match mode {
                GameMode::RankedDuel => duel,
                GameMode::RankedDoubles => doubles,
                GameMode::RankedStandard => standard,
            }
        })
    }
}

struct ScriptedClient;

impl GameClient for ScriptedClient {
    fn load_map(&mut self, command: &str) {
        info!(command, "host: loading map");
    }

    fn disconnect(&mut self) {
        info!("host: disconnecting to main menu");
    }

    fn in_practice_context(&self) -> bool {
        false
    }

    fn has_leave_penalty(&self) -> bool {
        false
    }

    fn auto_leave_delay(&self) -> Option<f32> {
        None
    }
}

struct ScriptedNotifier;

impl Notifier for ScriptedNotifier {
    fn notify(&mut self, title: &str, body: &str) {
        println!("┌─ {title}");
        for line in body.lines() {
            println!("│  {line}");
        }
        println!("└─");
    }
}

struct ScriptedHost {
    matchmaking: ScriptedMatchmaking,
    ratings: ScriptedRatings,
    client: ScriptedClient,
    notifier: ScriptedNotifier,
    settings: MemorySettings,
}

impl Host for ScriptedHost {
    type Matchmaking = ScriptedMatchmaking;
    type Rating = ScriptedRatings;
    type Client = ScriptedClient;
    type Notifier = ScriptedNotifier;
    type Settings = MemorySettings;

    fn matchmaking(&mut self) -> Option<&mut ScriptedMatchmaking> {
        Some(&mut self.matchmaking)
    }

    fn rating(&self) -> &ScriptedRatings {
        &self.ratings
    }

    fn client(&mut self) -> &mut ScriptedClient {
        &mut self.client
    }

    fn notifier(&mut self) -> &mut ScriptedNotifier {
        &mut self.notifier
    }

    fn settings(&self) -> &MemorySettings {
        &self.settings
    }

    fn local_player(&self) -> PlayerId {
        PlayerId(1)
    }
}

// ---------------------------------------------------------------------------
// Script
// ---------------------------------------------------------------------------

/// Builds a snapshot the way host glue would: from raw host values,
/// including the numeric playlist id.
fn snapshot(
    match_id: &str,
    raw_playlist_id: i32,
    scores: [i32; 2],
    overtime: bool,
) -> ServerSnapshot {
    let playlist = match Playlist::from_host_id(raw_playlist_id) {
        Ok(playlist) => Some(playlist),
        Err(error) => {
            warn!(%error, "host reported an unmapped playlist");
            None
        }
    };
    ServerSnapshot {
        match_id: MatchId::new(match_id),
        team_scores: scores.to_vec(),
        overtime,
        time_remaining: 0.0,
        leave_penalty: false,
        forfeit: false,
        playlist,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let world: SharedWorld = Arc::new(Mutex::new(World {
        searching: false,
        ratings: Some((655.0, 820.0, 741.0)),
    }));

    let host = ScriptedHost {
        matchmaking: ScriptedMatchmaking(world.clone()),
        ratings: ScriptedRatings(world.clone()),
        client: ScriptedClient,
        notifier: ScriptedNotifier,
        settings: MemorySettings::new(PluginSettings::default()),
    };
    let plugin = spawn_plugin(host);

    // Kick off a two-game Ranked Doubles session.
    plugin
        .start_session(GameMode::RankedDoubles, 2)
        .await
        .expect("session should start");

    // Game 1 ends via the authoritative event (playlist id 11 = doubles).
    world.lock().unwrap().searching = false;
    plugin
        .host_event(HostEvent::MatchEnded {
            server: snapshot("demo-match-1", 11, [3, 2], false),
        })
        .await
        .expect("plugin running");

    // Game 2 resolves in overtime; the penalty heuristic catches it first
    // and the late authoritative event is deduplicated.
    world.lock().unwrap().searching = false;
    let game2 = snapshot("demo-match-2", 11, [4, 3], true);
    plugin
        .host_event(HostEvent::PenaltyChanged {
            server: game2.clone(),
        })
        .await
        .expect("plugin running");
    plugin
        .host_event(HostEvent::MatchEnded { server: game2 })
        .await
        .expect("plugin running");

    let status = plugin.status().await.expect("plugin running");
    info!(
        phase = %status.phase,
        games_played = status.games_played,
        "session over, waiting for the final rating update"
    );

    // The matchmaking service reports the post-match ratings.
    world.lock().unwrap().ratings = Some((655.0, 838.4, 741.0));
    plugin
        .host_event(HostEvent::RatingUpdated { player: PlayerId(1) })
        .await
        .expect("plugin running");

    // Give the actor a moment to finish the toast, then wind down.
    tokio::time::sleep(Duration::from_millis(100)).await;
    plugin.shutdown().await;
}
