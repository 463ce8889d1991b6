//! Persistence collaborator: the loads and saves the engine needs, plus an
//! in-memory implementation.

use crate::models::{
    Entity, GameMatch, MatchId, Player, PlayerId, Round, RoundId, Tournament, TournamentError,
    TournamentId,
};
use std::collections::HashMap;

/// Storage the engine reads from and writes to.
///
/// Loads fail with `NotFound` when the entity is absent. Every engine operation
/// runs inside [`Store::transaction`], so an implementation must make the
/// closure's writes visible either all together or not at all.
pub trait Store {
    fn load_player(&self, id: PlayerId) -> Result<Player, TournamentError>;
    fn load_match(&self, id: MatchId) -> Result<GameMatch, TournamentError>;
    fn load_round(&self, id: RoundId) -> Result<Round, TournamentError>;
    fn load_tournament(&self, id: TournamentId) -> Result<Tournament, TournamentError>;

    fn save_player(&mut self, player: Player) -> Result<(), TournamentError>;
    fn save_match(&mut self, game: GameMatch) -> Result<(), TournamentError>;
    fn save_round(&mut self, round: Round) -> Result<(), TournamentError>;
    fn save_tournament(&mut self, tournament: Tournament) -> Result<(), TournamentError>;

    /// Every registered player.
    fn all_players(&self) -> Vec<Player>;

    /// Every tournament, oldest first.
    fn all_tournaments(&self) -> Vec<Tournament>;

    /// Run `f` as one unit of work. If it returns `Err`, none of its writes persist.
    fn transaction<T, F>(&mut self, f: F) -> Result<T, TournamentError>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<T, TournamentError>;

    /// Players in the order of `ids`. Fails if any one is missing.
    fn load_players_by_ids(&self, ids: &[PlayerId]) -> Result<Vec<Player>, TournamentError> {
        ids.iter().map(|&id| self.load_player(id)).collect()
    }

    /// Current state of every match in a round, in pairing order.
    fn matches_in_round(&self, round_id: RoundId) -> Result<Vec<GameMatch>, TournamentError> {
        let round = self.load_round(round_id)?;
        round.match_ids.iter().map(|&id| self.load_match(id)).collect()
    }
}

/// HashMap-backed store. Transactions snapshot the maps and restore them on failure.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    players: HashMap<PlayerId, Player>,
    tournaments: HashMap<TournamentId, Tournament>,
    rounds: HashMap<RoundId, Round>,
    matches: HashMap<MatchId, GameMatch>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn load_player(&self, id: PlayerId) -> Result<Player, TournamentError> {
        self.players
            .get(&id)
            .cloned()
            .ok_or(TournamentError::not_found(Entity::Player, id))
    }

    fn load_match(&self, id: MatchId) -> Result<GameMatch, TournamentError> {
        self.matches
            .get(&id)
            .cloned()
            .ok_or(TournamentError::not_found(Entity::Match, id))
    }

    fn load_round(&self, id: RoundId) -> Result<Round, TournamentError> {
        self.rounds
            .get(&id)
            .cloned()
            .ok_or(TournamentError::not_found(Entity::Round, id))
    }

    fn load_tournament(&self, id: TournamentId) -> Result<Tournament, TournamentError> {
        self.tournaments
            .get(&id)
            .cloned()
            .ok_or(TournamentError::not_found(Entity::Tournament, id))
    }

    fn save_player(&mut self, player: Player) -> Result<(), TournamentError> {
        self.players.insert(player.id, player);
        Ok(())
    }

    fn save_match(&mut self, game: GameMatch) -> Result<(), TournamentError> {
        self.matches.insert(game.id, game);
        Ok(())
    }

    fn save_round(&mut self, round: Round) -> Result<(), TournamentError> {
        self.rounds.insert(round.id, round);
        Ok(())
    }

    fn save_tournament(&mut self, tournament: Tournament) -> Result<(), TournamentError> {
        self.tournaments.insert(tournament.id, tournament);
        Ok(())
    }

    fn all_players(&self) -> Vec<Player> {
        let mut players: Vec<Player> = self.players.values().cloned().collect();
        players.sort_by(|a, b| a.nickname.cmp(&b.nickname));
        players
    }

    fn all_tournaments(&self) -> Vec<Tournament> {
        let mut tournaments: Vec<Tournament> = self.tournaments.values().cloned().collect();
        tournaments.sort_by_key(|t| t.created_at);
        tournaments
    }

    fn transaction<T, F>(&mut self, f: F) -> Result<T, TournamentError>
    where
        F: FnOnce(&mut Self) -> Result<T, TournamentError>,
    {
        let snapshot = self.clone();
        let result = f(self);
        if result.is_err() {
            *self = snapshot;
        }
        result
    }
}
