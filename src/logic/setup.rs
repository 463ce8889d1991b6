//! Setup phase: player registration, enrollment, starting the tournament and
//! the manual "next round" entry point.

use crate::logic::bracket::{advance_bracket, create_round, Advancement};
use crate::logic::signal::Signal;
use crate::models::{
    Player, PlayerId, Round, RoundStatus, Tournament, TournamentError, TournamentId,
    TournamentStatus, BASELINE_POINTS,
};
use crate::random::RandomSource;
use crate::rules::Rules;
use crate::store::Store;
use serde::Serialize;
use std::collections::HashSet;

const RATING_RANGE: std::ops::RangeInclusive<i32> = 1..=15000;

/// Register a new player. Nicknames are unique (case-insensitive).
pub fn register_player<S: Store>(
    store: &mut S,
    name: &str,
    nickname: &str,
    rating: i32,
) -> Result<Player, TournamentError> {
    let nickname = nickname.trim();
    if nickname.is_empty() {
        return Err(TournamentError::InvalidNickname(nickname.to_string()));
    }
    if !RATING_RANGE.contains(&rating) {
        return Err(TournamentError::InvalidRating(rating));
    }
    if find_by_nickname(store, nickname).is_some() {
        return Err(TournamentError::DuplicateNickname(nickname.to_string()));
    }
    let player = Player::new(name.trim(), nickname, rating);
    store.save_player(player.clone())?;
    Ok(player)
}

/// Look a player up by nickname, ignoring case.
pub fn player_by_nickname<S: Store>(store: &S, nickname: &str) -> Result<Player, TournamentError> {
    find_by_nickname(store, nickname.trim())
        .ok_or_else(|| TournamentError::UnknownNickname(nickname.trim().to_string()))
}

fn find_by_nickname<S: Store>(store: &S, nickname: &str) -> Option<Player> {
    let wanted = nickname.to_lowercase();
    store
        .all_players()
        .into_iter()
        .find(|p| p.nickname.to_lowercase() == wanted)
}

/// Create a tournament with its initial players, applying the enrollment rules.
///
/// Every player must exist, be listed once, and not be enrolled in another
/// unfinished tournament. Enrolled players get their active-tournament reference set.
pub fn create_tournament<S: Store>(
    store: &mut S,
    rules: &Rules,
    name: &str,
    player_ids: &[PlayerId],
) -> Result<Tournament, TournamentError> {
    rules.check_player_count(player_ids.len())?;
    let distinct: HashSet<PlayerId> = player_ids.iter().copied().collect();
    if distinct.len() != player_ids.len() {
        return Err(TournamentError::Enrollment(
            "a player is listed more than once".to_string(),
        ));
    }

    let tournament = Tournament::with_players(name.trim(), player_ids.to_vec());
    for mut player in store.load_players_by_ids(player_ids)? {
        ensure_available(store, &player, tournament.id)?;
        player.active_tournament = Some(tournament.id);
        store.save_player(player)?;
    }
    store.save_tournament(tournament.clone())?;
    log::info!(
        "tournament {} ({:?}) created with {} players",
        tournament.id,
        tournament.name,
        tournament.player_ids.len()
    );
    Ok(tournament)
}

/// Add a player to a tournament that has not started yet.
pub fn enroll_player<S: Store>(
    store: &mut S,
    rules: &Rules,
    tournament_id: TournamentId,
    player_id: PlayerId,
) -> Result<Tournament, TournamentError> {
    let mut tournament = store.load_tournament(tournament_id)?;
    tournament.require(TournamentStatus::Created)?;
    if tournament.is_enrolled(player_id) {
        return Err(TournamentError::Enrollment(format!(
            "player {player_id} is already enrolled"
        )));
    }
    if tournament.player_ids.len() >= rules.max_players {
        return Err(TournamentError::Enrollment(format!(
            "tournament is full ({} players)",
            rules.max_players
        )));
    }
    let mut player = store.load_player(player_id)?;
    ensure_available(store, &player, tournament.id)?;

    player.active_tournament = Some(tournament.id);
    tournament.player_ids.push(player_id);
    store.save_player(player)?;
    store.save_tournament(tournament.clone())?;
    Ok(tournament)
}

/// Remove a player from a tournament that has not started yet.
pub fn withdraw_player<S: Store>(
    store: &mut S,
    tournament_id: TournamentId,
    player_id: PlayerId,
) -> Result<Tournament, TournamentError> {
    let mut tournament = store.load_tournament(tournament_id)?;
    tournament.require(TournamentStatus::Created)?;
    let idx = tournament
        .player_ids
        .iter()
        .position(|&id| id == player_id)
        .ok_or_else(|| {
            TournamentError::Enrollment(format!("player {player_id} is not enrolled"))
        })?;
    tournament.player_ids.remove(idx);

    let mut player = store.load_player(player_id)?;
    if player.active_tournament == Some(tournament.id) {
        player.active_tournament = None;
        store.save_player(player)?;
    }
    store.save_tournament(tournament.clone())?;
    Ok(tournament)
}

/// Start the tournament: CREATED → IN_PROGRESS, reset points to the baseline, pair round 1.
pub fn start_tournament<S: Store>(
    store: &mut S,
    rng: &mut dyn RandomSource,
    rules: &Rules,
    tournament_id: TournamentId,
) -> Result<(Round, Signal), TournamentError> {
    let mut tournament = store.load_tournament(tournament_id)?;
    tournament.require(TournamentStatus::Created)?;
    rules.check_player_count(tournament.player_ids.len())?;

    for mut player in store.load_players_by_ids(&tournament.player_ids)? {
        player.tournament_points = BASELINE_POINTS;
        store.save_player(player)?;
    }

    tournament.status = TournamentStatus::InProgress;
    let players = tournament.player_ids.clone();
    let round = create_round(store, rng, &mut tournament, 1, &players)?;
    log::info!("tournament {} started", tournament.id);

    let signal = Signal::RoundCreated {
        round_id: round.id,
        tournament_id: tournament.id,
        round_number: round.round_number,
    };
    Ok((round, signal))
}

/// What [`create_next_round`] found or did.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NextRound {
    /// The last round was finished and had not been advanced yet; this call paired the next one.
    Created { round: Round },
    /// The latest round is still being played (or was just paired); nothing to do.
    AlreadyCreated { round: Round },
    /// The tournament is over.
    Finished { champion: Option<PlayerId> },
}

/// Advance the bracket on request. A no-op when the bracket is already advanced.
///
/// Normally the cascade from the last match finish advances the bracket by
/// itself; this is the idempotent manual trigger for callers that want to
/// make sure.
pub fn create_next_round<S: Store>(
    store: &mut S,
    rng: &mut dyn RandomSource,
    tournament_id: TournamentId,
) -> Result<(NextRound, Option<Signal>), TournamentError> {
    let mut tournament = store.load_tournament(tournament_id)?;
    match tournament.status {
        TournamentStatus::Finished => {
            return Ok((
                NextRound::Finished {
                    champion: tournament.champion,
                },
                None,
            ))
        }
        TournamentStatus::Created => tournament.require(TournamentStatus::InProgress)?,
        TournamentStatus::InProgress => {}
    }

    let last = match tournament.round_ids.last() {
        Some(&id) => store.load_round(id)?,
        None => {
            let players = tournament.player_ids.clone();
            let round = create_round(store, rng, &mut tournament, 1, &players)?;
            let signal = Signal::RoundCreated {
                round_id: round.id,
                tournament_id,
                round_number: round.round_number,
            };
            return Ok((NextRound::Created { round }, Some(signal)));
        }
    };
    if last.status != RoundStatus::Finished {
        return Ok((NextRound::AlreadyCreated { round: last }, None));
    }

    let advancement = advance_bracket(store, rng, last.id)?;
    let signal = advancement.signal();
    let next = match advancement {
        Advancement::NextRound(round) => NextRound::Created { round },
        Advancement::Champion { champion, .. } => NextRound::Finished {
            champion: Some(champion),
        },
    };
    Ok((next, Some(signal)))
}

/// Reject `player` if they are enrolled in a different tournament that has not finished.
fn ensure_available<S: Store>(
    store: &S,
    player: &Player,
    tournament_id: TournamentId,
) -> Result<(), TournamentError> {
    let Some(other) = player.active_tournament else {
        return Ok(());
    };
    if other == tournament_id {
        return Ok(());
    }
    match store.load_tournament(other) {
        Ok(t) if t.status != TournamentStatus::Finished => Err(TournamentError::Enrollment(
            format!("{} is already playing in tournament {}", player.nickname, other),
        )),
        _ => Ok(()),
    }
}
