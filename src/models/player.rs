//! Player and the per-category lifetime counters.

use crate::models::event::{EventTally, EventType};
use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in matches and lookups).
pub type PlayerId = Uuid;

/// Points every enrolled player holds when a tournament starts.
pub const BASELINE_POINTS: i32 = 70;

/// Lifetime event counters, one per event type.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub original_moves: u32,
    pub blunders: u32,
    pub advantageous_positions: u32,
    pub disrespect: u32,
    pub rage_attacks: u32,
}

impl PlayerStats {
    /// Add the counts from one finished match.
    pub fn absorb(&mut self, tally: &EventTally) {
        self.original_moves += tally.count(EventType::OriginalMove);
        self.blunders += tally.count(EventType::Blunder);
        self.advantageous_positions += tally.count(EventType::AdvantageousPosition);
        self.disrespect += tally.count(EventType::Disrespect);
        self.rage_attacks += tally.count(EventType::RageAttack);
    }
}

/// A registered chess player.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Unique handle (case-insensitive).
    pub nickname: String,
    pub rating: i32,
    /// Cumulative score inside the current tournament.
    pub tournament_points: i32,
    pub stats: PlayerStats,
    /// The tournament this player is enrolled in, if any. Cleared when it finishes.
    pub active_tournament: Option<TournamentId>,
}

impl Player {
    /// Create a new player. Points start at the baseline, counters at zero.
    pub fn new(name: impl Into<String>, nickname: impl Into<String>, rating: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            nickname: nickname.into(),
            rating,
            tournament_points: BASELINE_POINTS,
            stats: PlayerStats::default(),
            active_tournament: None,
        }
    }

    /// Apply the outcome of one finished match: point delta plus the match's event counts.
    pub(crate) fn record_match(&mut self, points: i32, tally: &EventTally) {
        self.tournament_points += points;
        self.stats.absorb(tally);
    }
}
