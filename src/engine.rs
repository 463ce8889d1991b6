//! The engine: every externally callable operation, each run as one unit of work.
//!
//! Lower layers never call upward. A finished match hands back a
//! [`Signal`]; [`dispatch`] feeds each signal to the component that reacts to
//! it and queues whatever that component emits, all inside the same
//! transaction. By the time an operation returns, the whole cascade has either
//! committed or been discarded.

use crate::logic::{
    self, advance_bracket, check_round_completion, FinishedMatch, MatchOutcome, NextRound, Signal,
};
use crate::models::{
    Entity, Event, EventType, GameMatch, MatchId, Player, PlayerId, Round, RoundId, Tournament,
    TournamentError, TournamentId, TournamentStatus,
};
use crate::random::RandomSource;
use crate::rules::Rules;
use crate::store::Store;
use serde::Serialize;
use std::collections::VecDeque;

/// What finishing a match did, including every cascaded signal in emission order.
#[derive(Clone, Debug, Serialize)]
pub struct FinishReport {
    #[serde(rename = "match")]
    pub game: GameMatch,
    pub outcome: MatchOutcome,
    pub signals: Vec<Signal>,
}

impl FinishReport {
    pub fn round_finished(&self) -> bool {
        self.signals
            .iter()
            .any(|s| matches!(s, Signal::RoundFinished { .. }))
    }

    /// The champion, if this finish ended the tournament.
    pub fn champion(&self) -> Option<PlayerId> {
        self.signals.iter().find_map(|s| match s {
            Signal::TournamentFinished { champion, .. } => Some(*champion),
            _ => None,
        })
    }
}

/// Tournament progression engine over a store and a random source.
///
/// Mutating operations take `&mut self`, so there is exactly one writer at a time.
pub struct Engine<S, R> {
    store: S,
    rng: R,
    rules: Rules,
}

impl<S: Store, R: RandomSource> Engine<S, R> {
    pub fn new(store: S, rng: R, rules: Rules) -> Self {
        Self { store, rng, rules }
    }

    // --- setup ---

    pub fn register_player(
        &mut self,
        name: &str,
        nickname: &str,
        rating: i32,
    ) -> Result<Player, TournamentError> {
        self.store
            .transaction(|store| logic::register_player(store, name, nickname, rating))
    }

    pub fn create_tournament(
        &mut self,
        name: &str,
        player_ids: &[PlayerId],
    ) -> Result<Tournament, TournamentError> {
        let rules = &self.rules;
        self.store
            .transaction(|store| logic::create_tournament(store, rules, name, player_ids))
    }

    pub fn enroll_player(
        &mut self,
        tournament_id: TournamentId,
        player_id: PlayerId,
    ) -> Result<Tournament, TournamentError> {
        let rules = &self.rules;
        self.store
            .transaction(|store| logic::enroll_player(store, rules, tournament_id, player_id))
    }

    pub fn withdraw_player(
        &mut self,
        tournament_id: TournamentId,
        player_id: PlayerId,
    ) -> Result<Tournament, TournamentError> {
        self.store
            .transaction(|store| logic::withdraw_player(store, tournament_id, player_id))
    }

    /// Start the tournament and pair round 1.
    pub fn start_tournament(
        &mut self,
        tournament_id: TournamentId,
    ) -> Result<Round, TournamentError> {
        let rng = &mut self.rng;
        let rules = &self.rules;
        self.store.transaction(|store| {
            let (round, _) = logic::start_tournament(store, rng, rules, tournament_id)?;
            Ok(round)
        })
    }

    /// Idempotent manual bracket advancement.
    pub fn create_next_round(
        &mut self,
        tournament_id: TournamentId,
    ) -> Result<NextRound, TournamentError> {
        let rng = &mut self.rng;
        self.store.transaction(|store| {
            let (next, _) = logic::create_next_round(store, rng, tournament_id)?;
            Ok(next)
        })
    }

    // --- match lifecycle ---

    pub fn start_match(&mut self, match_id: MatchId) -> Result<GameMatch, TournamentError> {
        self.store
            .transaction(|store| logic::start_match(store, match_id))
    }

    pub fn register_event(
        &mut self,
        match_id: MatchId,
        player_id: PlayerId,
        event_type: EventType,
    ) -> Result<GameMatch, TournamentError> {
        self.store
            .transaction(|store| logic::register_event(store, match_id, player_id, event_type))
    }

    /// Finish a match and run the full cascade: round completion, then bracket advancement.
    pub fn finish_match(&mut self, match_id: MatchId) -> Result<FinishReport, TournamentError> {
        let rng = &mut self.rng;
        let rules = &self.rules;
        self.store.transaction(|store| {
            let FinishedMatch {
                game,
                outcome,
                follow_up,
            } = logic::finish_match(store, &mut *rng, rules, match_id)?;
            let signals = dispatch(store, &mut *rng, follow_up)?;
            Ok(FinishReport {
                game,
                outcome,
                signals,
            })
        })
    }

    // --- queries ---

    /// Enrolled players by points, or just the champion once finished.
    pub fn standings(&self, tournament_id: TournamentId) -> Result<Vec<Player>, TournamentError> {
        logic::standings(&self.store, tournament_id)
    }

    pub fn player(&self, player_id: PlayerId) -> Result<Player, TournamentError> {
        self.store.load_player(player_id)
    }

    pub fn players(&self) -> Vec<Player> {
        self.store.all_players()
    }

    pub fn player_by_nickname(&self, nickname: &str) -> Result<Player, TournamentError> {
        logic::player_by_nickname(&self.store, nickname)
    }

    pub fn tournament(&self, tournament_id: TournamentId) -> Result<Tournament, TournamentError> {
        self.store.load_tournament(tournament_id)
    }

    /// All tournaments, optionally only those in `status`.
    pub fn tournaments(&self, status: Option<TournamentStatus>) -> Vec<Tournament> {
        self.store
            .all_tournaments()
            .into_iter()
            .filter(|t| status.map_or(true, |s| t.status == s))
            .collect()
    }

    /// Rounds of a tournament ordered by round number.
    pub fn rounds(&self, tournament_id: TournamentId) -> Result<Vec<Round>, TournamentError> {
        let tournament = self.store.load_tournament(tournament_id)?;
        let mut rounds = tournament
            .round_ids
            .iter()
            .map(|&id| self.store.load_round(id))
            .collect::<Result<Vec<_>, _>>()?;
        rounds.sort_by_key(|r| r.round_number);
        Ok(rounds)
    }

    pub fn round(&self, round_id: RoundId) -> Result<Round, TournamentError> {
        self.store.load_round(round_id)
    }

    /// A round, provided it belongs to `tournament_id`.
    pub fn tournament_round(
        &self,
        tournament_id: TournamentId,
        round_id: RoundId,
    ) -> Result<Round, TournamentError> {
        let round = self.store.load_round(round_id)?;
        if round.tournament_id != tournament_id {
            return Err(TournamentError::not_found(Entity::Round, round_id));
        }
        Ok(round)
    }

    pub fn matches_in_round(&self, round_id: RoundId) -> Result<Vec<GameMatch>, TournamentError> {
        self.store.matches_in_round(round_id)
    }

    pub fn game_match(&self, match_id: MatchId) -> Result<GameMatch, TournamentError> {
        self.store.load_match(match_id)
    }

    pub fn events_for_match(&self, match_id: MatchId) -> Result<Vec<Event>, TournamentError> {
        Ok(self.store.load_match(match_id)?.events)
    }
}

/// Run `first` and every signal it triggers, in FIFO order. Returns all signals emitted.
///
/// `MatchFinished` → round-completion check; `RoundFinished` → bracket
/// advancement. `RoundCreated` and `TournamentFinished` end the chain.
pub fn dispatch<S: Store>(
    store: &mut S,
    rng: &mut dyn RandomSource,
    first: Signal,
) -> Result<Vec<Signal>, TournamentError> {
    let mut emitted = Vec::new();
    let mut queue = VecDeque::from([first]);
    while let Some(signal) = queue.pop_front() {
        emitted.push(signal);
        match signal {
            Signal::MatchFinished { round_id, .. } => {
                if let Some(next) = check_round_completion(store, round_id)? {
                    queue.push_back(next);
                }
            }
            Signal::RoundFinished { round_id, .. } => {
                queue.push_back(advance_bracket(store, rng, round_id)?.signal());
            }
            Signal::RoundCreated { .. } | Signal::TournamentFinished { .. } => {}
        }
    }
    Ok(emitted)
}
