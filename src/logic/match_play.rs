//! Match lifecycle: start, register events, finish.
//!
//! PENDING → IN_PROGRESS → FINISHED, never skipping or reversing. Finishing a
//! match is the only place player points and lifetime counters change.

use crate::logic::scoring::{score_for, tally_for};
use crate::logic::signal::Signal;
use crate::logic::tie_break::resolve_tie;
use crate::models::{
    Event, EventType, GameMatch, MatchId, MatchStatus, PlayerId, TournamentError,
};
use crate::random::RandomSource;
use crate::rules::Rules;
use crate::store::Store;
use chrono::Utc;
use serde::Serialize;

/// How a finished match was decided.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct MatchOutcome {
    pub winner: PlayerId,
    pub loser: PlayerId,
    /// Comparison scores, including the blitz bonus when a tie-break fired.
    pub winner_score: i32,
    pub loser_score: i32,
    pub blitz: bool,
}

/// A just-finished match together with the signal it emits.
#[derive(Clone, Debug)]
pub struct FinishedMatch {
    pub game: GameMatch,
    pub outcome: MatchOutcome,
    pub follow_up: Signal,
}

/// PENDING → IN_PROGRESS.
pub fn start_match<S: Store>(
    store: &mut S,
    match_id: MatchId,
) -> Result<GameMatch, TournamentError> {
    let mut game = store.load_match(match_id)?;
    game.require(MatchStatus::Pending)?;
    game.status = MatchStatus::InProgress;
    game.started_at = Some(Utc::now());
    store.save_match(game.clone())?;
    log::info!("match {} started", game.id);
    Ok(game)
}

/// Append one event to an in-progress match.
///
/// A player can have at most one event of each type per match. No player
/// statistics change here; they are settled when the match finishes.
pub fn register_event<S: Store>(
    store: &mut S,
    match_id: MatchId,
    player_id: PlayerId,
    event_type: EventType,
) -> Result<GameMatch, TournamentError> {
    let mut game = store.load_match(match_id)?;
    game.require(MatchStatus::InProgress)?;
    if !game.involves(player_id) {
        return Err(TournamentError::NotParticipant {
            match_id,
            player_id,
        });
    }
    if game.has_event(player_id, event_type) {
        return Err(TournamentError::DuplicateEvent {
            match_id,
            player_id,
            event_type,
        });
    }
    game.events.push(Event::new(match_id, player_id, event_type));
    store.save_match(game.clone())?;
    log::debug!("match {match_id}: {event_type} for player {player_id}");
    Ok(game)
}

/// IN_PROGRESS → FINISHED: score both players, decide the winner, settle player stats.
///
/// The higher event score wins outright; a level score goes to the blitz
/// tie-break. The winner gains `rules.win_bonus` on top of their event score,
/// the loser only their event score. Both players' lifetime counters absorb
/// this match's events.
pub fn finish_match<S: Store>(
    store: &mut S,
    rng: &mut dyn RandomSource,
    rules: &Rules,
    match_id: MatchId,
) -> Result<FinishedMatch, TournamentError> {
    let mut game = store.load_match(match_id)?;
    game.require(MatchStatus::InProgress)?;

    let score_1 = score_for(&game.events, game.player_1);
    let score_2 = score_for(&game.events, game.player_2);

    let outcome = if score_1 > score_2 {
        MatchOutcome {
            winner: game.player_1,
            loser: game.player_2,
            winner_score: score_1,
            loser_score: score_2,
            blitz: false,
        }
    } else if score_2 > score_1 {
        MatchOutcome {
            winner: game.player_2,
            loser: game.player_1,
            winner_score: score_2,
            loser_score: score_1,
            blitz: false,
        }
    } else {
        let tie = resolve_tie(rng, game.player_1, game.player_2, score_1, rules.blitz_bonus);
        MatchOutcome {
            winner: tie.winner,
            loser: tie.loser,
            winner_score: tie.winner_score,
            loser_score: tie.loser_score,
            blitz: true,
        }
    };

    game.status = MatchStatus::Finished;
    game.winner = Some(outcome.winner);
    game.blitz = outcome.blitz;
    game.finished_at = Some(Utc::now());

    let mut players = store.load_players_by_ids(&[outcome.winner, outcome.loser])?;
    for player in &mut players {
        let mut points = score_for(&game.events, player.id);
        if player.id == outcome.winner {
            points += rules.win_bonus;
        }
        player.record_match(points, &tally_for(&game.events, player.id));
    }
    for player in players {
        store.save_player(player)?;
    }
    store.save_match(game.clone())?;

    log::info!(
        "match {} finished: {} beat {} ({}-{}{})",
        game.id,
        outcome.winner,
        outcome.loser,
        outcome.winner_score,
        outcome.loser_score,
        if outcome.blitz { ", blitz" } else { "" }
    );

    let follow_up = Signal::MatchFinished {
        match_id: game.id,
        round_id: game.round_id,
    };
    Ok(FinishedMatch {
        game,
        outcome,
        follow_up,
    })
}
