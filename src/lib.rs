//! Chess tournament engine: library with models, progression logic and the engine facade.

pub mod engine;
pub mod logic;
pub mod models;
pub mod random;
pub mod rules;
pub mod store;

pub use engine::{dispatch, Engine, FinishReport};
pub use logic::{MatchOutcome, NextRound, Signal};
pub use models::{
    Entity, Event, EventId, EventTally, EventType, GameMatch, MatchId, MatchStatus, Player,
    PlayerId, PlayerStats, Round, RoundId, RoundStatus, Tournament, TournamentError,
    TournamentId, TournamentStatus, BASELINE_POINTS,
};
pub use random::{RandomSource, SeededRandom};
pub use rules::Rules;
pub use store::{MemoryStore, Store};
