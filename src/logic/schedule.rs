//! Full classic schedule: strategy by roster size, then court rotation.

use crate::logic::balanced::{schedule_16, schedule_8};
use crate::logic::circle::circle_schedule;
use crate::logic::courts::{optimize_courts, CourtHistory};
use crate::logic::cyclic::{schedule_12, CYCLIC_PLAYERS};
use crate::models::{Player, Round};

/// Fewest players that can fill one court.
pub const MIN_PLAYERS: usize = 4;

/// How a roster of a given size is scheduled.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Strategy {
    /// Fewer than four players: nothing to schedule.
    None,
    /// Fixed whist table (8 or 16 players).
    Table,
    /// Rotated seed matches (12 players).
    Cyclic,
    /// Circle rotation, any other size.
    Circle,
}

impl Strategy {
    pub fn for_roster(num_players: usize) -> Self {
        match num_players {
            n if n < MIN_PLAYERS => Strategy::None,
            8 | 16 => Strategy::Table,
            CYCLIC_PLAYERS => Strategy::Cyclic,
            _ => Strategy::Circle,
        }
    }

    /// True when every pair partners once and opposes exactly twice.
    pub fn is_perfectly_balanced(self) -> bool {
        matches!(self, Strategy::Table | Strategy::Cyclic)
    }
}

/// Number of rounds a full schedule has for this many players.
pub fn schedule_length(num_players: usize) -> usize {
    match Strategy::for_roster(num_players) {
        Strategy::None => 0,
        _ => num_players - 1 + num_players % 2,
    }
}

/// Generate the whole tournament for a roster, courts already rotated.
///
/// Returns an empty schedule for fewer than four players.
pub fn generate_schedule(players: &[Player]) -> Vec<Round> {
    let strategy = Strategy::for_roster(players.len());
    log::debug!("scheduling {} players with {:?}", players.len(), strategy);
    let rounds = match strategy {
        Strategy::None => return Vec::new(),
        Strategy::Table if players.len() == 8 => schedule_8(players),
        Strategy::Table => schedule_16(players),
        Strategy::Cyclic => schedule_12(players),
        Strategy::Circle => circle_schedule(players),
    };

    let mut history = CourtHistory::new();
    rounds
        .into_iter()
        .map(|round| Round {
            matches: optimize_courts(round.matches, round.index, &mut history),
            ..round
        })
        .collect()
}
