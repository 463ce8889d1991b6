//! Data structures for the chess tournament: players, matches, events, rounds, tournaments.

mod event;
mod game;
mod player;
mod round;
mod tournament;

pub use event::{Event, EventId, EventTally, EventType};
pub use game::{GameMatch, MatchId, MatchStatus};
pub use player::{Player, PlayerId, PlayerStats, BASELINE_POINTS};
pub use round::{Round, RoundId, RoundStatus};
pub use tournament::{Entity, Tournament, TournamentError, TournamentId, TournamentStatus};
