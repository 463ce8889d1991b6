//! Standings: enrolled players ranked by tournament points.

use crate::models::{Player, TournamentError, TournamentId, TournamentStatus};
use crate::store::Store;
use serde::Serialize;

/// Players sorted by `tournament_points`, highest first (ties by nickname).
/// A finished tournament ranks only its champion.
pub fn standings<S: Store>(
    store: &S,
    tournament_id: TournamentId,
) -> Result<Vec<Player>, TournamentError> {
    let tournament = store.load_tournament(tournament_id)?;
    if tournament.status == TournamentStatus::Finished {
        if let Some(champion) = tournament.champion {
            return Ok(vec![store.load_player(champion)?]);
        }
    }
    let mut players = store.load_players_by_ids(&tournament.player_ids)?;
    players.sort_by(|a, b| {
        b.tournament_points
            .cmp(&a.tournament_points)
            .then_with(|| a.nickname.cmp(&b.nickname))
    });
    Ok(players)
}

#[derive(Serialize)]
struct StandingRow<'a> {
    rank: usize,
    nickname: &'a str,
    name: &'a str,
    tournament_points: i32,
}

/// Render ranked players as CSV with a header row.
pub fn standings_csv(players: &[Player]) -> Result<String, csv::Error> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for (i, p) in players.iter().enumerate() {
        wtr.serialize(StandingRow {
            rank: i + 1,
            nickname: &p.nickname,
            name: &p.name,
            tournament_points: p.tournament_points,
        })?;
    }
    let bytes = wtr.into_inner().map_err(|e| csv::Error::from(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| csv::Error::from(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}
