//! Signals passed up the progression chain: match → round → tournament.

use crate::models::{MatchId, PlayerId, RoundId, TournamentId};
use serde::Serialize;

/// Something that happened during an operation and may trigger a follow-up step.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum Signal {
    /// A match reached FINISHED. Triggers the round-completion check.
    MatchFinished { match_id: MatchId, round_id: RoundId },
    /// Every match of a round is finished. Triggers bracket advancement.
    RoundFinished {
        round_id: RoundId,
        tournament_id: TournamentId,
    },
    RoundCreated {
        round_id: RoundId,
        tournament_id: TournamentId,
        round_number: u32,
    },
    TournamentFinished {
        tournament_id: TournamentId,
        champion: PlayerId,
    },
}
