//! Event scoring: pure mapping from a match's events to one player's points and counts.

use crate::models::{Event, EventTally, PlayerId};

/// Sum of the point values of every event `player_id` has in `events`.
pub fn score_for(events: &[Event], player_id: PlayerId) -> i32 {
    events
        .iter()
        .filter(|e| e.player_id == player_id)
        .map(|e| e.event_type.points())
        .sum()
}

/// Per-type counts of `player_id`'s events.
pub fn tally_for(events: &[Event], player_id: PlayerId) -> EventTally {
    let mut tally = EventTally::default();
    for e in events.iter().filter(|e| e.player_id == player_id) {
        tally.add(e.event_type);
    }
    tally
}
