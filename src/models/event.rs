//! Scored in-match events.

use crate::models::game::MatchId;
use crate::models::player::PlayerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an event.
pub type EventId = Uuid;

/// Kind of notable thing a player did during a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    OriginalMove,
    Blunder,
    AdvantageousPosition,
    Disrespect,
    RageAttack,
}

impl EventType {
    /// All event types, in table order.
    pub const ALL: [EventType; 5] = [
        EventType::OriginalMove,
        EventType::Blunder,
        EventType::AdvantageousPosition,
        EventType::Disrespect,
        EventType::RageAttack,
    ];

    /// Points this event is worth to the acting player.
    pub fn points(self) -> i32 {
        match self {
            EventType::OriginalMove => 5,
            EventType::Blunder => -3,
            EventType::AdvantageousPosition => 2,
            EventType::Disrespect => -5,
            EventType::RageAttack => -7,
        }
    }

    /// Stable name used at the API boundary.
    pub fn as_str(self) -> &'static str {
        match self {
            EventType::OriginalMove => "ORIGINAL_MOVE",
            EventType::Blunder => "BLUNDER",
            EventType::AdvantageousPosition => "ADVANTAGEOUS_POSITION",
            EventType::Disrespect => "DISRESPECT",
            EventType::RageAttack => "RAGE_ATTACK",
        }
    }

    fn index(self) -> usize {
        match self {
            EventType::OriginalMove => 0,
            EventType::Blunder => 1,
            EventType::AdvantageousPosition => 2,
            EventType::Disrespect => 3,
            EventType::RageAttack => 4,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One event registered against a player in a match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub match_id: MatchId,
    pub player_id: PlayerId,
    pub event_type: EventType,
    pub recorded_at: DateTime<Utc>,
}

impl Event {
    pub fn new(match_id: MatchId, player_id: PlayerId, event_type: EventType) -> Self {
        Self {
            id: Uuid::new_v4(),
            match_id,
            player_id,
            event_type,
            recorded_at: Utc::now(),
        }
    }
}

/// Per-type event counts for one player in one match.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct EventTally {
    counts: [u32; 5],
}

impl EventTally {
    pub fn count(&self, event_type: EventType) -> u32 {
        self.counts[event_type.index()]
    }

    pub fn add(&mut self, event_type: EventType) {
        self.counts[event_type.index()] += 1;
    }

    /// Total number of events counted.
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }
}
