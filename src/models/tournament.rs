//! Tournament, TournamentStatus and the engine-wide error type.

use crate::models::event::EventType;
use crate::models::game::MatchId;
use crate::models::player::PlayerId;
use crate::models::round::RoundId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Kind of stored entity, used in error messages.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Entity {
    Player,
    Tournament,
    Round,
    Match,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Entity::Player => "player",
            Entity::Tournament => "tournament",
            Entity::Round => "round",
            Entity::Match => "match",
        };
        write!(f, "{repr}")
    }
}

/// Errors that can occur during tournament operations.
///
/// Every operation either applies all of its state changes or none of them,
/// so any of these leaves the store exactly as it was before the call.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum TournamentError {
    /// Operation attempted from the wrong lifecycle state.
    #[error("{entity} {id} is {actual}, expected {expected}")]
    InvalidState {
        entity: Entity,
        id: Uuid,
        actual: &'static str,
        expected: &'static str,
    },

    #[error("player {player_id} does not take part in match {match_id}")]
    NotParticipant { match_id: MatchId, player_id: PlayerId },

    #[error("{event_type} is already registered for player {player_id} in match {match_id}")]
    DuplicateEvent {
        match_id: MatchId,
        player_id: PlayerId,
        event_type: EventType,
    },

    #[error("{entity} {id} not found")]
    NotFound { entity: Entity, id: Uuid },

    /// Pairing the next round is impossible. Never recovered from automatically.
    #[error("round {round_id} produced {qualified} qualified players, which cannot be paired")]
    BracketIntegrity { round_id: RoundId, qualified: usize },

    /// Player-count or uniqueness rule for enrollment violated.
    #[error("enrollment rejected: {0}")]
    Enrollment(String),

    #[error("nickname {0:?} is already taken")]
    DuplicateNickname(String),

    #[error("nickname {0:?} is not valid")]
    InvalidNickname(String),

    #[error("no player with nickname {0:?}")]
    UnknownNickname(String),

    #[error("rating {0} is outside 1..=15000")]
    InvalidRating(i32),
}

impl TournamentError {
    pub fn not_found(entity: Entity, id: Uuid) -> Self {
        TournamentError::NotFound { entity, id }
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Current phase of the tournament. Only moves forward.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TournamentStatus {
    /// Enrolling players; not started.
    #[default]
    Created,
    /// Rounds are being played.
    InProgress,
    /// One champion remains.
    Finished,
}

impl TournamentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TournamentStatus::Created => "CREATED",
            TournamentStatus::InProgress => "IN_PROGRESS",
            TournamentStatus::Finished => "FINISHED",
        }
    }
}

impl fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single-elimination tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub status: TournamentStatus,
    /// Enrolled players, in enrollment order.
    pub player_ids: Vec<PlayerId>,
    /// Rounds ordered by round number.
    pub round_ids: Vec<RoundId>,
    /// Set iff the tournament is finished.
    pub champion: Option<PlayerId>,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a new tournament in Created state with no players.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            status: TournamentStatus::Created,
            player_ids: Vec::new(),
            round_ids: Vec::new(),
            champion: None,
            created_at: Utc::now(),
        }
    }

    /// Create a tournament with initial players. Still Created until started.
    pub fn with_players(name: impl Into<String>, player_ids: Vec<PlayerId>) -> Self {
        Self {
            player_ids,
            ..Self::new(name)
        }
    }

    pub fn is_enrolled(&self, player_id: PlayerId) -> bool {
        self.player_ids.contains(&player_id)
    }

    /// Fail with `InvalidState` unless the tournament is in `expected`.
    pub fn require(&self, expected: TournamentStatus) -> Result<(), TournamentError> {
        if self.status != expected {
            return Err(TournamentError::InvalidState {
                entity: Entity::Tournament,
                id: self.id,
                actual: self.status.as_str(),
                expected: expected.as_str(),
            });
        }
        Ok(())
    }
}
