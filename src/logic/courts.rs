//! Court rotation: choose which match plays on which court so that as few
//! players as possible stay on the court they just played on.

use crate::models::{Match, PlayerId, Round};
use pathfinding::kuhn_munkres::kuhn_munkres_min;
use pathfinding::matrix::Matrix;
use std::collections::HashMap;

/// Up to this many courts every permutation is tried; above it the
/// assignment is solved as a min-cost matching.
pub const MAX_SEARCH_COURTS: usize = 9;

/// Courts each player has been assigned, oldest first. One per scheduling session.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CourtHistory {
    courts: HashMap<PlayerId, Vec<usize>>,
}

impl CourtHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the history from rounds already played, in order.
    pub fn from_rounds(rounds: &[Round]) -> Self {
        let mut history = Self::new();
        for round in rounds {
            history.record(&round.matches);
        }
        history
    }

    /// Court the player was on most recently, if any.
    pub fn last(&self, id: PlayerId) -> Option<usize> {
        self.courts.get(&id).and_then(|c| c.last().copied())
    }

    pub fn courts(&self, id: PlayerId) -> &[usize] {
        self.courts.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Append each match player's court.
    pub fn record(&mut self, matches: &[Match]) {
        for m in matches {
            for pid in m.players() {
                self.courts.entry(pid).or_default().push(m.court_index);
            }
        }
    }

    /// Players that would repeat their last court if `matches[i]` went to `courts[i]`.
    pub fn repeats(&self, matches: &[Match], courts: &[usize]) -> usize {
        matches
            .iter()
            .zip(courts)
            .map(|(m, &c)| m.players().iter().filter(|&&p| self.last(p) == Some(c)).count())
            .sum()
    }
}

/// Assign courts to one round's matches and record them in `history`.
///
/// Every permutation of court indices is scored by the number of players who
/// would repeat their previous court. The unique best wins; among ties the
/// `round_index % ties`-th in lexicographic order is taken, so equal rounds
/// alternate rather than always picking the first. Past `MAX_SEARCH_COURTS`
/// the same minimum is found with the Hungarian method. Returns matches sorted by court.
pub fn optimize_courts(
    mut matches: Vec<Match>,
    round_index: usize,
    history: &mut CourtHistory,
) -> Vec<Match> {
    let count = matches.len();
    if count > 1 {
        let cost = repeat_costs(history, &matches);
        let chosen = if count <= MAX_SEARCH_COURTS {
            search_permutations(&cost, round_index)
        } else {
            solve_assignment(&cost, round_index)
        };
        for (m, &court) in matches.iter_mut().zip(&chosen) {
            m.assign_court(court);
        }
        matches.sort_by_key(|m| m.court_index);
    }
    history.record(&matches);
    matches
}

/// `cost[i][c]`: players of match `i` whose last court was `c`.
fn repeat_costs(history: &CourtHistory, matches: &[Match]) -> Vec<Vec<usize>> {
    matches
        .iter()
        .map(|m| {
            let mut row = vec![0; matches.len()];
            for p in m.players() {
                if let Some(c) = history.last(p).filter(|&c| c < row.len()) {
                    row[c] += 1;
                }
            }
            row
        })
        .collect()
}

fn permutation_cost(cost: &[Vec<usize>], perm: &[usize]) -> usize {
    perm.iter().enumerate().map(|(i, &c)| cost[i][c]).sum()
}

/// Two passes over all `C!` permutations: find the minimum and count its ties,
/// then walk again to the `round_index % ties`-th tied one.
fn search_permutations(cost: &[Vec<usize>], round_index: usize) -> Vec<usize> {
    let count = cost.len();
    let mut perm: Vec<usize> = (0..count).collect();
    let mut best = usize::MAX;
    let mut ties = 0usize;
    loop {
        let repeats = permutation_cost(cost, &perm);
        if repeats < best {
            best = repeats;
            ties = 0;
        }
        if repeats == best {
            ties += 1;
        }
        if !next_permutation(&mut perm) {
            break;
        }
    }
    log::debug!(
        "round {round_index}: {ties} of {} court permutations tie at {best} repeats",
        factorial(count)
    );

    let mut skip = round_index % ties;
    let mut perm: Vec<usize> = (0..count).collect();
    loop {
        if permutation_cost(cost, &perm) == best {
            if skip == 0 {
                return perm;
            }
            skip -= 1;
        }
        if !next_permutation(&mut perm) {
            return perm;
        }
    }
}

/// Min-cost matching of matches to courts. Repeats dominate the weight; the
/// remainder prefers sending match `i` to court `(i + round_index) % C`, so
/// equally good rounds still rotate.
fn solve_assignment(cost: &[Vec<usize>], round_index: usize) -> Vec<usize> {
    let count = cost.len();
    let scale = (count * count) as i64;
    let weights = Matrix::from_fn(count, count, |(i, c)| {
        let shift = (c + count - (i + round_index) % count) % count;
        cost[i][c] as i64 * scale + shift as i64
    });
    let (total, assignment) = kuhn_munkres_min(&weights);
    log::debug!(
        "round {round_index}: {count} courts matched at {} repeats",
        total / scale
    );
    assignment
}

/// Advance to the next lexicographic permutation; false once the last was reached.
fn next_permutation(p: &mut [usize]) -> bool {
    let Some(i) = (1..p.len()).rev().find(|&i| p[i - 1] < p[i]) else {
        return false;
    };
    let pivot = i - 1;
    let Some(j) = (i..p.len()).rev().find(|&j| p[j] > p[pivot]) else {
        return false;
    };
    p.swap(pivot, j);
    p[i..].reverse();
    true
}

fn factorial(n: usize) -> usize {
    (1..=n).product()
}
