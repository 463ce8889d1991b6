//! Blitz tie-break for matches that finish level on points.

use crate::models::PlayerId;
use crate::random::RandomSource;
use serde::Serialize;

/// Result of a single tie-break draw.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct TieBreak {
    pub winner: PlayerId,
    pub loser: PlayerId,
    /// Tied score plus the blitz bonus. Used for comparison only.
    pub winner_score: i32,
    pub loser_score: i32,
}

/// Draw one fair coin between two players tied on `tied_score`.
///
/// The selected player gets `bonus` added and wins. Called at most once per
/// match: the caller only reaches it while finishing an in-progress match.
pub fn resolve_tie(
    rng: &mut dyn RandomSource,
    player_1: PlayerId,
    player_2: PlayerId,
    tied_score: i32,
    bonus: i32,
) -> TieBreak {
    let (winner, loser) = if rng.coin_flip() {
        (player_1, player_2)
    } else {
        (player_2, player_1)
    };
    log::debug!("blitz tie-break at {tied_score} points: {winner} wins the draw");
    TieBreak {
        winner,
        loser,
        winner_score: tied_score + bonus,
        loser_score: tied_score,
    }
}
