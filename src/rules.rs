//! Tunable point constants and bracket-size rules.

use crate::models::TournamentError;
use serde::Serialize;

/// Point awards and enrollment limits used by the engine.
///
/// The baseline every player starts a tournament with is fixed at
/// [`BASELINE_POINTS`](crate::models::BASELINE_POINTS) and is not part of the rules.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Rules {
    /// Points the winner of a match gains on top of their event score.
    pub win_bonus: i32,
    /// Points the tie-break winner adds to their match score for comparison. Always positive.
    pub blitz_bonus: i32,
    pub min_players: usize,
    pub max_players: usize,
    /// Even sizes inside the range that still cannot form a bracket without byes.
    pub excluded_sizes: Vec<usize>,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            win_bonus: 30,
            blitz_bonus: 2,
            min_players: 4,
            max_players: 8,
            excluded_sizes: vec![6],
        }
    }
}

impl Rules {
    /// Defaults, with `WIN_BONUS` and `BLITZ_BONUS` taken from the environment
    /// when set to a positive integer.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Rules::from_env`], reading values through `lookup`.
    ///
    /// A value that does not parse, or is not positive, is logged and the
    /// default kept: a zero blitz bonus would let a tie-break end level.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            win_bonus: positive_or(&lookup, "WIN_BONUS", defaults.win_bonus),
            blitz_bonus: positive_or(&lookup, "BLITZ_BONUS", defaults.blitz_bonus),
            ..defaults
        }
    }

    /// Enrollment size rule: within `[min_players, max_players]`, even, and not excluded.
    pub fn check_player_count(&self, count: usize) -> Result<(), TournamentError> {
        if count < self.min_players || count > self.max_players {
            return Err(TournamentError::Enrollment(format!(
                "a tournament needs between {} and {} players, got {}",
                self.min_players, self.max_players, count
            )));
        }
        if count % 2 != 0 || self.excluded_sizes.contains(&count) {
            return Err(TournamentError::Enrollment(format!(
                "{count} players cannot form a bracket without byes"
            )));
        }
        Ok(())
    }
}

fn positive_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: i32) -> i32 {
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<i32>() {
        Ok(value) if value > 0 => value,
        _ => {
            log::warn!("ignoring {}={:?}: expected a positive integer", key, raw);
            default
        }
    }
}
