//! Match (game) between two players and its lifecycle status.

use crate::models::event::{Event, EventType};
use crate::models::player::PlayerId;
use crate::models::round::RoundId;
use crate::models::tournament::{Entity, TournamentError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Lifecycle of a match. Only moves forward.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    #[default]
    Pending,
    InProgress,
    Finished,
}

impl MatchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchStatus::Pending => "PENDING",
            MatchStatus::InProgress => "IN_PROGRESS",
            MatchStatus::Finished => "FINISHED",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single 1v1 match inside a round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub round_id: RoundId,
    pub player_1: PlayerId,
    pub player_2: PlayerId,
    pub status: MatchStatus,
    /// Set once the match is finished; always one of the two players.
    pub winner: Option<PlayerId>,
    /// True iff the result was decided by a tie-break.
    pub blitz: bool,
    /// Events in registration order.
    pub events: Vec<Event>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl GameMatch {
    /// New pending match.
    pub fn new(round_id: RoundId, player_1: PlayerId, player_2: PlayerId) -> Self {
        Self {
            id: Uuid::new_v4(),
            round_id,
            player_1,
            player_2,
            status: MatchStatus::Pending,
            winner: None,
            blitz: false,
            events: Vec::new(),
            started_at: None,
            finished_at: None,
        }
    }

    pub fn involves(&self, player_id: PlayerId) -> bool {
        self.player_1 == player_id || self.player_2 == player_id
    }

    pub fn has_event(&self, player_id: PlayerId, event_type: EventType) -> bool {
        self.events
            .iter()
            .any(|e| e.player_id == player_id && e.event_type == event_type)
    }

    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }

    /// Fail with `InvalidState` unless the match is in `expected`.
    pub fn require(&self, expected: MatchStatus) -> Result<(), TournamentError> {
        if self.status != expected {
            return Err(TournamentError::InvalidState {
                entity: Entity::Match,
                id: self.id,
                actual: self.status.as_str(),
                expected: expected.as_str(),
            });
        }
        Ok(())
    }
}
