//! Fixed whist tables for 8 and 16 players.
//!
//! Each entry is `[a1, a2, b1, b2]`: roster positions of team A and team B.
//! Both tables pair every two players as partners exactly once and as
//! opponents exactly twice.

use crate::models::{Match, Player, Round};

/// 7 rounds × 2 courts.
pub const SCHEDULE_8: [[[usize; 4]; 2]; 7] = [
    [[0, 1, 2, 5], [3, 6, 4, 7]],
    [[0, 2, 3, 7], [1, 5, 4, 6]],
    [[0, 3, 1, 6], [2, 7, 4, 5]],
    [[0, 4, 2, 6], [1, 7, 3, 5]],
    [[0, 5, 3, 4], [1, 2, 6, 7]],
    [[0, 6, 5, 7], [1, 3, 2, 4]],
    [[0, 7, 1, 4], [2, 3, 5, 6]],
];

/// 15 rounds × 4 courts.
pub const SCHEDULE_16: [[[usize; 4]; 4]; 15] = [
    [[3, 8, 5, 1], [11, 0, 2, 6], [10, 14, 12, 7], [13, 9, 4, 15]],
    [[0, 9, 13, 11], [3, 10, 14, 8], [15, 6, 2, 4], [12, 5, 1, 7]],
    [[4, 7, 1, 2], [5, 6, 15, 12], [13, 14, 8, 11], [3, 0, 9, 10]],
    [[15, 9, 10, 12], [2, 11, 8, 1], [3, 5, 6, 0], [14, 7, 4, 13]],
    [[3, 14, 7, 5], [4, 6, 0, 13], [9, 11, 2, 15], [1, 12, 10, 8]],
    [[6, 12, 1, 4], [3, 9, 11, 14], [8, 13, 0, 10], [2, 7, 5, 15]],
    [[10, 15, 5, 0], [7, 13, 8, 2], [1, 11, 14, 4], [3, 6, 12, 9]],
    [[8, 12, 9, 2], [0, 4, 14, 5], [3, 7, 13, 6], [11, 15, 10, 1]],
    [[3, 11, 15, 7], [10, 13, 6, 1], [12, 4, 0, 8], [5, 2, 9, 14]],
    [[13, 2, 5, 10], [3, 12, 4, 11], [14, 1, 6, 9], [0, 15, 7, 8]],
    [[9, 8, 7, 6], [15, 1, 14, 0], [5, 4, 11, 10], [3, 13, 2, 12]],
    [[14, 2, 12, 0], [6, 10, 11, 7], [3, 15, 1, 13], [4, 8, 9, 5]],
    [[3, 4, 8, 15], [9, 1, 13, 5], [2, 10, 6, 14], [7, 0, 12, 11]],
    [[1, 0, 7, 9], [3, 2, 10, 4], [11, 5, 13, 12], [6, 8, 15, 14]],
    [[12, 14, 15, 13], [8, 5, 11, 6], [7, 10, 4, 9], [3, 1, 0, 2]],
];

/// Substitute roster ids into a table. Caller guarantees the roster covers every index.
pub fn from_table<const C: usize>(players: &[Player], table: &[[[usize; 4]; C]]) -> Vec<Round> {
    table
        .iter()
        .enumerate()
        .map(|(r, courts)| {
            let matches = courts
                .iter()
                .enumerate()
                .map(|(c, q)| {
                    Match::new(
                        r,
                        c,
                        [players[q[0]].id, players[q[1]].id],
                        [players[q[2]].id, players[q[3]].id],
                    )
                })
                .collect();
            Round::new(r, matches, Vec::new())
        })
        .collect()
}

/// Balanced schedule for exactly 8 players.
pub fn schedule_8(players: &[Player]) -> Vec<Round> {
    from_table(players, &SCHEDULE_8[..])
}

/// Balanced schedule for exactly 16 players.
pub fn schedule_16(players: &[Player]) -> Vec<Round> {
    from_table(players, &SCHEDULE_16[..])
}
