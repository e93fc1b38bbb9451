//! Z-cyclic whist schedule for 12 players.

use crate::models::{Match, Player, Round};

/// Roster size handled here.
pub const CYCLIC_PLAYERS: usize = 12;

const MODULUS: usize = CYCLIC_PLAYERS - 1;

/// Stands for the last roster slot, which never rotates.
const FIXED: usize = 11;

/// Base matches `[a1, a2, b1, b2]`. Partner differences cover 1..=5 once each,
/// plus the fixed player, so rotating mod 11 partners everyone exactly once.
pub const WHIST_SEEDS_12: [[usize; 4]; 3] = [[FIXED, 0, 8, 9], [1, 7, 2, 5], [3, 10, 4, 6]];

/// 11 rounds × 3 courts. Caller guarantees exactly 12 players.
pub fn schedule_12(players: &[Player]) -> Vec<Round> {
    (0..MODULUS)
        .map(|r| {
            let id = |i: usize| {
                if i == FIXED {
                    players[CYCLIC_PLAYERS - 1].id
                } else {
                    players[(i + r) % MODULUS].id
                }
            };
            let matches = WHIST_SEEDS_12
                .iter()
                .enumerate()
                .map(|(c, s)| Match::new(r, c, [id(s[0]), id(s[1])], [id(s[2]), id(s[3])]))
                .collect();
            Round::new(r, matches, Vec::new())
        })
        .collect()
}
