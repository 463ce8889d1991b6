//! Round: one bracket level of a tournament.

use crate::models::game::MatchId;
use crate::models::tournament::{Entity, TournamentError, TournamentId};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a round.
pub type RoundId = Uuid;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundStatus {
    #[default]
    Created,
    InProgress,
    Finished,
}

impl RoundStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RoundStatus::Created => "CREATED",
            RoundStatus::InProgress => "IN_PROGRESS",
            RoundStatus::Finished => "FINISHED",
        }
    }
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A round and the ids of its matches.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    pub tournament_id: TournamentId,
    /// 1-based.
    pub round_number: u32,
    pub status: RoundStatus,
    pub match_ids: Vec<MatchId>,
}

impl Round {
    /// New round with no matches yet.
    pub fn new(tournament_id: TournamentId, round_number: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            round_number,
            status: RoundStatus::Created,
            match_ids: Vec::new(),
        }
    }

    /// Fail with `InvalidState` unless the round is in `expected`.
    pub fn require(&self, expected: RoundStatus) -> Result<(), TournamentError> {
        if self.status != expected {
            return Err(TournamentError::InvalidState {
                entity: Entity::Round,
                id: self.id,
                actual: self.status.as_str(),
                expected: expected.as_str(),
            });
        }
        Ok(())
    }
}
