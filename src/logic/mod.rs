//! Tournament business logic: scoring, match lifecycle, round completion, bracket, setup.

mod bracket;
mod match_play;
mod round_completion;
mod scoring;
mod setup;
mod signal;
mod standings;
mod tie_break;

pub use bracket::{
    advance_bracket, create_round, finalize_tournament, qualified_players, Advancement,
};
pub use match_play::{finish_match, register_event, start_match, FinishedMatch, MatchOutcome};
pub use round_completion::check_round_completion;
pub use scoring::{score_for, tally_for};
pub use setup::{
    create_next_round, create_tournament, enroll_player, player_by_nickname, register_player,
    start_tournament, withdraw_player, NextRound,
};
pub use signal::Signal;
pub use standings::{standings, standings_csv};
pub use tie_break::{resolve_tie, TieBreak};
