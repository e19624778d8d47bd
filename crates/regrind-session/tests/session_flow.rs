//! End-to-end scenarios for the session core, driven exactly like the
//! facade drives it: one controller, a stream of host events, effects out.

use regrind_protocol::{
    GameMode, MatchId, PlayerId, Playlist, PluginSettings, ServerSnapshot,
};
use regrind_session::{
    Effect, HostContext, RankSnapshot, SessionController, SessionPhase,
};

// =========================================================================
// Helpers
// =========================================================================

fn pid(id: u64) -> PlayerId {
    PlayerId(id)
}

fn ctx() -> HostContext {
    HostContext {
        settings: PluginSettings::default(),
        in_practice: false,
        auto_leave_delay: None,
    }
}

fn ranks(duel: f32, doubles: f32, standard: f32) -> RankSnapshot {
    RankSnapshot {
        duel,
        doubles,
        standard,
    }
}

fn match_over(id: &str, playlist: Playlist) -> ServerSnapshot {
    ServerSnapshot {
        match_id: MatchId::new(id),
        team_scores: vec![3, 2],
        overtime: false,
        time_remaining: 0.0,
        leave_penalty: false,
        forfeit: false,
        playlist: Some(playlist),
    }
}

// =========================================================================
// Scenarios
// =========================================================================

#[test]
fn test_normal_grind_three_duels() {
    let mut c = SessionController::new(pid(7));
    c.on_rating_update(pid(7), Some(ranks(612.0, 700.0, 655.0)));

    c.start_session(GameMode::RankedDuel, 3, &ctx()).unwrap();
    assert_eq!(c.state().games_remaining, 3);
    assert_eq!(c.state().games_played, 0);

    c.on_match_ended(&match_over("g1", Playlist::RankedDuel), &ctx());
    c.on_match_ended(&match_over("g2", Playlist::RankedDuel), &ctx());
    assert_eq!(c.phase(), SessionPhase::Running);

    c.on_match_ended(&match_over("g3", Playlist::RankedDuel), &ctx());
    assert_eq!(c.phase(), SessionPhase::AwaitingFinalRating);
    assert!(c.state().awaiting_final_rating);

    let effects = c.on_rating_update(pid(7), Some(ranks(630.5, 700.0, 655.0)));
    let Some(Effect::Notify { body, .. }) = effects.last() else {
        panic!("expected a completion toast, got {effects:?}");
    };
    assert_eq!(body, "Completed 3 games\n1v1 +18.5");
    assert_eq!(c.phase(), SessionPhase::Idle);
}

#[test]
fn test_games_remaining_is_monotonic_under_event_noise() {
    let mut c = SessionController::new(pid(7));
    c.start_session(GameMode::RankedDuel, 5, &ctx()).unwrap();

    let mut last_remaining = c.state().games_remaining;
    let events = [
        match_over("a", Playlist::RankedDuel),
        match_over("a", Playlist::RankedDuel), // duplicate
        match_over("b", Playlist::RankedDuel),
        match_over("b", Playlist::RankedDuel), // duplicate
        match_over("c", Playlist::RankedDuel),
    ];
    for server in &events {
        c.on_match_ended(server, &ctx());
        // Penalty signal for the same match races in right after.
        c.on_penalty_changed(server, &ctx());

        let remaining = c.state().games_remaining;
        assert!(remaining <= last_remaining, "remaining never increases");
        last_remaining = remaining;
    }

    assert_eq!(c.state().games_played, 3, "three distinct matches");
    assert_eq!(c.state().games_remaining, 2);
    assert_eq!(
        c.state().games_played + c.state().games_remaining,
        5,
        "count is conserved"
    );
}

#[test]
fn test_overtime_heuristic_waits_for_the_deciding_goal() {
    let mut c = SessionController::new(pid(7));
    c.start_session(GameMode::RankedDuel, 3, &ctx()).unwrap();

    let tied = ServerSnapshot {
        overtime: true,
        team_scores: vec![2, 2],
        ..match_over("ot", Playlist::RankedDuel)
    };
    assert!(c.on_penalty_changed(&tied, &ctx()).is_empty());
    assert_eq!(c.state().games_played, 0);

    let decided = ServerSnapshot {
        overtime: true,
        team_scores: vec![3, 2],
        ..match_over("ot", Playlist::RankedDuel)
    };
    c.on_penalty_changed(&decided, &ctx());
    assert_eq!(c.state().games_played, 1);

    // The late authoritative event for the same match is a no-op.
    c.on_match_ended(&decided, &ctx());
    assert_eq!(c.state().games_played, 1);
}

#[test]
fn test_mid_session_mode_mismatch_aborts() {
    let mut c = SessionController::new(pid(7));
    c.on_rating_update(pid(7), Some(ranks(612.0, 700.0, 655.0)));
    c.start_session(GameMode::RankedDuel, 3, &ctx()).unwrap();

    let effects =
        c.on_match_ended(&match_over("g1", Playlist::RankedStandard), &ctx());

    assert!(effects.is_empty());
    assert_eq!(c.state().games_remaining, 0);
    assert_eq!(c.phase(), SessionPhase::Idle);

    // No completion toast ever comes out of an aborted session.
    let effects = c.on_rating_update(pid(7), Some(ranks(650.0, 700.0, 655.0)));
    assert!(effects.is_empty());
}

#[test]
fn test_manual_stop_before_first_match_never_reports() {
    let mut c = SessionController::new(pid(7));
    c.on_rating_update(pid(7), Some(ranks(612.0, 700.0, 655.0)));

    c.start_session(GameMode::RankedDoubles, 10, &ctx()).unwrap();
    c.stop_session();
    assert_eq!(c.phase(), SessionPhase::Idle);

    for snapshot in [
        ranks(612.0, 700.0, 655.0),
        ranks(900.0, 700.0, 655.0),
    ] {
        let effects = c.on_rating_update(pid(7), Some(snapshot));
        assert!(effects.is_empty(), "no report after an empty session");
    }
}

#[test]
fn test_back_to_back_sessions_use_fresh_baselines() {
    let mut c = SessionController::new(pid(7));
    c.on_rating_update(pid(7), Some(ranks(600.0, 700.0, 800.0)));

    // First session: +10 in duels.
    c.start_session(GameMode::RankedDuel, 1, &ctx()).unwrap();
    c.on_match_ended(&match_over("s1", Playlist::RankedDuel), &ctx());
    let effects = c.on_rating_update(pid(7), Some(ranks(610.0, 700.0, 800.0)));
    let Some(Effect::Notify { body, .. }) = effects.last() else {
        panic!("expected a toast");
    };
    assert_eq!(body, "Completed 1 games\n1v1 +10.0");

    // Second session baselines at 610, not 600.
    c.start_session(GameMode::RankedDuel, 1, &ctx()).unwrap();
    c.on_match_ended(&match_over("s2", Playlist::RankedDuel), &ctx());
    let effects = c.on_rating_update(pid(7), Some(ranks(605.0, 700.0, 800.0)));
    let Some(Effect::Notify { body, .. }) = effects.last() else {
        panic!("expected a toast");
    };
    assert_eq!(body, "Completed 1 games\n1v1 -5.0");
}
