//! Integration tests for the match lifecycle: start, events, finish, tie-break.

mod common;

use chess_brawl::{EventType, MatchStatus, TournamentError};
use common::*;

#[test]
fn start_requires_pending() {
    let mut s = started(4, &[]);
    let m = s.round.match_ids[0];

    let game = s.engine.start_match(m).unwrap();
    assert_eq!(game.status, MatchStatus::InProgress);
    assert!(game.started_at.is_some());

    assert!(matches!(
        s.engine.start_match(m),
        Err(TournamentError::InvalidState { .. })
    ));
}

#[test]
fn events_need_an_in_progress_match() {
    let mut s = started(4, &[]);
    let m = s.round.match_ids[0];
    let p0 = s.players[0];

    assert!(matches!(
        s.engine.register_event(m, p0, EventType::OriginalMove),
        Err(TournamentError::InvalidState { .. })
    ));
    assert!(matches!(
        s.engine.finish_match(m),
        Err(TournamentError::InvalidState { .. })
    ));
}

#[test]
fn events_only_for_participants() {
    let mut s = started(4, &[]);
    let m = s.round.match_ids[0]; // p0 vs p1
    let outsider = s.players[2];
    s.engine.start_match(m).unwrap();

    assert!(matches!(
        s.engine.register_event(m, outsider, EventType::Blunder),
        Err(TournamentError::NotParticipant { player_id, .. }) if player_id == outsider
    ));
    assert!(s.engine.events_for_match(m).unwrap().is_empty());
}

#[test]
fn second_blunder_for_same_player_is_rejected() {
    let mut s = started(4, &[]);
    let m = s.round.match_ids[0];
    let p0 = s.players[0];
    let p1 = s.players[1];
    s.engine.start_match(m).unwrap();

    s.engine.register_event(m, p0, EventType::Blunder).unwrap();
    assert!(matches!(
        s.engine.register_event(m, p0, EventType::Blunder),
        Err(TournamentError::DuplicateEvent {
            event_type: EventType::Blunder,
            ..
        })
    ));
    // the opponent may still blunder once
    s.engine.register_event(m, p1, EventType::Blunder).unwrap();

    let events = s.engine.events_for_match(m).unwrap();
    let p0_blunders = events
        .iter()
        .filter(|e| e.player_id == p0 && e.event_type == EventType::Blunder)
        .count();
    assert_eq!(p0_blunders, 1);
    assert_eq!(events.len(), 2);
}

#[test]
fn registering_events_leaves_player_stats_alone() {
    let mut s = started(4, &[]);
    let m = s.round.match_ids[0];
    let p0 = s.players[0];
    play(
        &mut s.engine,
        m,
        &[(p0, EventType::OriginalMove), (p0, EventType::RageAttack)],
    );

    let player = s.engine.player(p0).unwrap();
    assert_eq!(player.tournament_points, 70);
    assert_eq!(player.stats.original_moves, 0);
    assert_eq!(player.stats.rage_attacks, 0);
}

#[test]
fn higher_score_wins_outright() {
    let mut s = started(4, &[false]);
    let m = s.round.match_ids[0];
    let (p0, p1) = (s.players[0], s.players[1]);
    play(
        &mut s.engine,
        m,
        &[(p1, EventType::AdvantageousPosition), (p0, EventType::Blunder)],
    );

    let report = s.engine.finish_match(m).unwrap();
    assert_eq!(report.game.status, MatchStatus::Finished);
    assert_eq!(report.game.winner, Some(p1));
    assert!(!report.game.blitz);
    assert_eq!(report.outcome.winner_score, 2);
    assert_eq!(report.outcome.loser_score, -3);

    assert_eq!(s.engine.player(p1).unwrap().tournament_points, 70 + 2 + 30);
    assert_eq!(s.engine.player(p0).unwrap().tournament_points, 70 - 3);
}

#[test]
fn level_scores_go_to_blitz() {
    // false: the coin picks the second player
    let mut s = started(4, &[false]);
    let m = s.round.match_ids[0];
    let (p0, p1) = (s.players[0], s.players[1]);
    play(
        &mut s.engine,
        m,
        &[(p0, EventType::OriginalMove), (p1, EventType::OriginalMove)],
    );

    let report = s.engine.finish_match(m).unwrap();
    assert!(report.game.blitz);
    assert!(report.outcome.blitz);
    assert_eq!(report.game.winner, Some(p1));
    assert_eq!(report.outcome.winner_score - report.outcome.loser_score, 2);
    assert_eq!(report.outcome.loser_score, 5);

    // the blitz bonus is for comparison only; points get event score + win bonus
    assert_eq!(s.engine.player(p1).unwrap().tournament_points, 70 + 5 + 30);
    assert_eq!(s.engine.player(p0).unwrap().tournament_points, 70 + 5);
}

#[test]
fn scoreless_match_is_a_tie_too() {
    let mut s = started(4, &[true]);
    let m = s.round.match_ids[0];
    play(&mut s.engine, m, &[]);

    let report = s.engine.finish_match(m).unwrap();
    assert!(report.game.blitz);
    assert_eq!(report.game.winner, Some(s.players[0]));
    assert_eq!(report.outcome.winner_score, 2);
    assert_eq!(report.outcome.loser_score, 0);
}

#[test]
fn finish_only_once() {
    let mut s = started(4, &[]);
    let m = s.round.match_ids[0];
    let p0 = s.players[0];
    play(&mut s.engine, m, &[(p0, EventType::OriginalMove)]);
    s.engine.finish_match(m).unwrap();

    let before_match = s.engine.game_match(m).unwrap();
    let before_player = s.engine.player(p0).unwrap();

    assert!(matches!(
        s.engine.finish_match(m),
        Err(TournamentError::InvalidState { .. })
    ));
    assert!(matches!(
        s.engine.register_event(m, p0, EventType::Blunder),
        Err(TournamentError::InvalidState { .. })
    ));
    assert_eq!(s.engine.game_match(m).unwrap(), before_match);
    assert_eq!(s.engine.player(p0).unwrap(), before_player);
}

#[test]
fn all_five_events_then_finish_moves_points_by_minus_eight() {
    let mut s = started(4, &[]);
    let m = s.round.match_ids[0];
    let (p0, p1) = (s.players[0], s.players[1]);
    let events: Vec<_> = EventType::ALL.iter().map(|&t| (p0, t)).collect();
    play(&mut s.engine, m, &events);

    let report = s.engine.finish_match(m).unwrap();
    // p1 scores 0 against p0's -8
    assert_eq!(report.game.winner, Some(p1));

    let loser = s.engine.player(p0).unwrap();
    assert_eq!(loser.tournament_points, 70 - 8);
    assert_eq!(loser.stats.original_moves, 1);
    assert_eq!(loser.stats.blunders, 1);
    assert_eq!(loser.stats.advantageous_positions, 1);
    assert_eq!(loser.stats.disrespect, 1);
    assert_eq!(loser.stats.rage_attacks, 1);

    let winner = s.engine.player(p1).unwrap();
    assert_eq!(winner.tournament_points, 70 + 30);
    assert_eq!(winner.stats, Default::default());
}

#[test]
fn winner_gets_all_five_events_plus_bonus() {
    let mut s = started(4, &[]);
    let m = s.round.match_ids[0];
    let (p0, p1) = (s.players[0], s.players[1]);
    let mut events: Vec<_> = EventType::ALL.iter().map(|&t| (p0, t)).collect();
    events.push((p1, EventType::RageAttack));
    events.push((p1, EventType::Disrespect));
    play(&mut s.engine, m, &events);

    let report = s.engine.finish_match(m).unwrap();
    // p0 at -8 beats p1 at -12
    assert_eq!(report.game.winner, Some(p0));
    assert_eq!(s.engine.player(p0).unwrap().tournament_points, 70 - 8 + 30);
    assert_eq!(s.engine.player(p1).unwrap().tournament_points, 70 - 12);
}

#[test]
fn unknown_match_is_not_found() {
    let mut s = started(4, &[]);
    assert!(matches!(
        s.engine.start_match(uuid::Uuid::new_v4()),
        Err(TournamentError::NotFound { .. })
    ));
}
