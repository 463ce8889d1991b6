//! Round completion: decide whether a match finish closed its round.

use crate::logic::signal::Signal;
use crate::models::{RoundId, RoundStatus, TournamentError};
use crate::store::Store;

/// Check the round after one of its matches finished.
///
/// Returns `RoundFinished` only when this call moved the round from
/// IN_PROGRESS to FINISHED. A round that is already finished, or still has a
/// pending or in-progress match, yields `None`, so repeated checks never emit twice.
pub fn check_round_completion<S: Store>(
    store: &mut S,
    round_id: RoundId,
) -> Result<Option<Signal>, TournamentError> {
    let mut round = store.load_round(round_id)?;
    if round.status == RoundStatus::Finished {
        return Ok(None);
    }

    let matches = store.matches_in_round(round_id)?;
    if matches.is_empty() || !matches.iter().all(|m| m.is_finished()) {
        return Ok(None);
    }

    round.require(RoundStatus::InProgress)?;
    round.status = RoundStatus::Finished;
    store.save_round(round.clone())?;
    log::info!(
        "round {} of tournament {} finished",
        round.round_number,
        round.tournament_id
    );

    Ok(Some(Signal::RoundFinished {
        round_id: round.id,
        tournament_id: round.tournament_id,
    }))
}
