#![allow(dead_code)]

use chess_brawl::{
    Engine, EventType, MatchId, MemoryStore, PlayerId, RandomSource, Round, Rules, TournamentId,
};
use std::collections::VecDeque;
use uuid::Uuid;

/// Random source with scripted coin flips (default `true` = first player).
/// Shuffles leave the order alone unless built with [`ScriptedCoin::reversing`].
pub struct ScriptedCoin {
    flips: VecDeque<bool>,
    reverse: bool,
}

impl ScriptedCoin {
    pub fn new(flips: &[bool]) -> Self {
        Self {
            flips: flips.iter().copied().collect(),
            reverse: false,
        }
    }

    /// Every shuffle reverses the ids.
    pub fn reversing(flips: &[bool]) -> Self {
        Self {
            reverse: true,
            ..Self::new(flips)
        }
    }
}

impl RandomSource for ScriptedCoin {
    fn coin_flip(&mut self) -> bool {
        self.flips.pop_front().unwrap_or(true)
    }

    fn shuffle_ids(&mut self, ids: &mut [Uuid]) {
        if self.reverse {
            ids.reverse();
        }
    }
}

pub type TestEngine = Engine<MemoryStore, ScriptedCoin>;

pub fn engine(flips: &[bool]) -> TestEngine {
    Engine::new(MemoryStore::new(), ScriptedCoin::new(flips), Rules::default())
}

/// Register `n` players named P0.. with nicknames p0..
pub fn register_players(engine: &mut TestEngine, n: usize) -> Vec<PlayerId> {
    register_players_from(engine, 0, n)
}

/// Register `n` players numbered from `start`.
pub fn register_players_from(engine: &mut TestEngine, start: usize, n: usize) -> Vec<PlayerId> {
    (start..start + n)
        .map(|i| {
            engine
                .register_player(&format!("P{i}"), &format!("p{i}"), 1200 + i as i32)
                .unwrap()
                .id
        })
        .collect()
}

/// A started tournament: with identity shuffles round 1 pairs (p0,p1), (p2,p3), ...
pub struct Started {
    pub engine: TestEngine,
    pub players: Vec<PlayerId>,
    pub tournament: TournamentId,
    pub round: Round,
}

pub fn started(n: usize, flips: &[bool]) -> Started {
    started_with(n, flips, Rules::default())
}

pub fn started_with(n: usize, flips: &[bool], rules: Rules) -> Started {
    let mut engine = Engine::new(MemoryStore::new(), ScriptedCoin::new(flips), rules);
    let players = register_players(&mut engine, n);
    let tournament = engine.create_tournament("Brawl", &players).unwrap().id;
    let round = engine.start_tournament(tournament).unwrap();
    Started {
        engine,
        players,
        tournament,
        round,
    }
}

/// Start a match, register `events`, leave it in progress.
pub fn play(engine: &mut TestEngine, match_id: MatchId, events: &[(PlayerId, EventType)]) {
    engine.start_match(match_id).unwrap();
    for &(player, event_type) in events {
        engine.register_event(match_id, player, event_type).unwrap();
    }
}
