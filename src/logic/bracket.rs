//! Single-elimination bracket: pair qualified players into the next round, or crown the champion.

use crate::logic::signal::Signal;
use crate::models::{
    GameMatch, PlayerId, Round, RoundId, RoundStatus, Tournament, TournamentError, TournamentId,
    TournamentStatus,
};
use crate::random::RandomSource;
use crate::store::Store;
use std::collections::HashSet;

/// Result of advancing the bracket past a finished round.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Advancement {
    NextRound(Round),
    Champion {
        tournament_id: TournamentId,
        champion: PlayerId,
    },
}

impl Advancement {
    /// The signal announcing this advancement.
    pub fn signal(&self) -> Signal {
        match self {
            Advancement::NextRound(round) => Signal::RoundCreated {
                round_id: round.id,
                tournament_id: round.tournament_id,
                round_number: round.round_number,
            },
            Advancement::Champion {
                tournament_id,
                champion,
            } => Signal::TournamentFinished {
                tournament_id: *tournament_id,
                champion: *champion,
            },
        }
    }
}

/// Winners of every match of a finished round, in pairing order.
pub fn qualified_players<S: Store>(
    store: &S,
    round: &Round,
) -> Result<Vec<PlayerId>, TournamentError> {
    round.require(RoundStatus::Finished)?;
    let matches = store.matches_in_round(round.id)?;
    let winners: Vec<PlayerId> = matches.iter().filter_map(|m| m.winner).collect();
    if winners.len() != matches.len() {
        return Err(TournamentError::BracketIntegrity {
            round_id: round.id,
            qualified: winners.len(),
        });
    }
    Ok(winners)
}

/// React to a finished round: finalize on one winner, pair the next round on an even count.
///
/// An odd count above one means a player was dropped or duplicated somewhere
/// upstream; it is reported as `BracketIntegrity` and nothing is written.
pub fn advance_bracket<S: Store>(
    store: &mut S,
    rng: &mut dyn RandomSource,
    round_id: RoundId,
) -> Result<Advancement, TournamentError> {
    let round = store.load_round(round_id)?;
    let mut tournament = store.load_tournament(round.tournament_id)?;
    tournament.require(TournamentStatus::InProgress)?;

    let qualified = qualified_players(store, &round)?;
    match qualified.len() {
        1 => {
            let champion = qualified[0];
            finalize_tournament(store, &mut tournament, champion)?;
            Ok(Advancement::Champion {
                tournament_id: tournament.id,
                champion,
            })
        }
        n if n >= 2 && n % 2 == 0 => {
            let number = round.round_number + 1;
            let next = create_round(store, rng, &mut tournament, number, &qualified)?;
            Ok(Advancement::NextRound(next))
        }
        n => {
            log::warn!(
                "round {} of tournament {} left {} qualified players; bracket cannot continue",
                round.round_number,
                tournament.id,
                n
            );
            Err(TournamentError::BracketIntegrity {
                round_id: round.id,
                qualified: n,
            })
        }
    }
}

/// Shuffle `players`, pair them consecutively and store the new round with
/// one PENDING match per pair.
///
/// The round is CREATED while its matches are built and IN_PROGRESS once they exist.
pub fn create_round<S: Store>(
    store: &mut S,
    rng: &mut dyn RandomSource,
    tournament: &mut Tournament,
    round_number: u32,
    players: &[PlayerId],
) -> Result<Round, TournamentError> {
    if players.len() < 2 || players.len() % 2 != 0 {
        return Err(TournamentError::Enrollment(format!(
            "cannot pair {} players into matches",
            players.len()
        )));
    }
    let distinct: HashSet<PlayerId> = players.iter().copied().collect();
    if distinct.len() != players.len() {
        return Err(TournamentError::Enrollment(
            "a player cannot appear twice in one round".to_string(),
        ));
    }

    let mut order = players.to_vec();
    rng.shuffle_ids(&mut order);

    let mut round = Round::new(tournament.id, round_number);
    for pair in order.chunks_exact(2) {
        let game = GameMatch::new(round.id, pair[0], pair[1]);
        round.match_ids.push(game.id);
        store.save_match(game)?;
    }
    round.status = RoundStatus::InProgress;
    store.save_round(round.clone())?;

    tournament.round_ids.push(round.id);
    store.save_tournament(tournament.clone())?;

    log::info!(
        "round {} of tournament {} created with {} matches",
        round.round_number,
        tournament.id,
        round.match_ids.len()
    );
    Ok(round)
}

/// Mark the tournament FINISHED with `champion` and release every enrolled player.
pub fn finalize_tournament<S: Store>(
    store: &mut S,
    tournament: &mut Tournament,
    champion: PlayerId,
) -> Result<(), TournamentError> {
    tournament.status = TournamentStatus::Finished;
    tournament.champion = Some(champion);

    for mut player in store.load_players_by_ids(&tournament.player_ids)? {
        if player.active_tournament == Some(tournament.id) {
            player.active_tournament = None;
            store.save_player(player)?;
        }
    }
    store.save_tournament(tournament.clone())?;

    log::info!("tournament {} finished, champion {}", tournament.id, champion);
    Ok(())
}
