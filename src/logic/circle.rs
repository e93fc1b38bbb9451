//! Circle (Berger table) rotation for any roster size.
//!
//! Guarantees every two players are paired once over the schedule. Opponent
//! counts are not balanced.

use crate::models::{Match, Player, PlayerId, Round};

/// Partner pairs for each round, as roster positions. `None` is the ghost slot
/// added for odd rosters.
///
/// Round `r` pairs slot `i` with slot `n-1-i`; between rounds slot 0 stays and
/// the last slot moves to position 1.
pub fn circle_pairings(num_players: usize) -> Vec<Vec<(Option<usize>, Option<usize>)>> {
    if num_players < 2 {
        return Vec::new();
    }
    let n = num_players + num_players % 2;
    let mut slots: Vec<usize> = (0..n).collect();
    let real = |i: usize| (i < num_players).then_some(i);

    let mut rounds = Vec::with_capacity(n - 1);
    for _ in 0..n - 1 {
        let pairs = (0..n / 2)
            .map(|i| (real(slots[i]), real(slots[n - 1 - i])))
            .collect();
        rounds.push(pairs);

        if let Some(last) = slots.pop() {
            slots.insert(1, last);
        }
    }
    rounds
}

/// Fallback schedule: `n-1` rounds (`n` padded to even).
///
/// Consecutive valid pairs become team A and team B of one match; a leftover
/// pair and anyone paired with the ghost sit out.
pub fn circle_schedule(players: &[Player]) -> Vec<Round> {
    circle_pairings(players.len())
        .into_iter()
        .enumerate()
        .map(|(r, pairs)| {
            let mut valid: Vec<[PlayerId; 2]> = Vec::new();
            let mut byes: Vec<PlayerId> = Vec::new();
            for pair in pairs {
                match pair {
                    (Some(a), Some(b)) => valid.push([players[a].id, players[b].id]),
                    (Some(a), None) | (None, Some(a)) => byes.push(players[a].id),
                    (None, None) => {}
                }
            }

            let matches = valid
                .chunks_exact(2)
                .enumerate()
                .map(|(c, teams)| Match::new(r, c, teams[0], teams[1]))
                .collect();
            if valid.len() % 2 == 1 {
                if let Some(last) = valid.last() {
                    byes.extend_from_slice(last);
                }
            }
            Round::new(r, matches, byes)
        })
        .collect()
}
