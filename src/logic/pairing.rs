//! Repetition-aware pairing shared by the on-demand round builders.
//!
//! Players are first paired into teams, then teams into matches. Both steps
//! run a greedy pass followed by pairwise swaps until no swap lowers the cost.

use crate::models::{Match, Player, PlayerId, Round};
use std::collections::HashMap;

const PARTNER_REPEAT: f64 = 10.0;
const OPPONENT_REPEAT: f64 = 1.0;
const MATCH_OPPONENT_REPEAT: f64 = 3.0;
const MATCH_PARTNER_REPEAT: f64 = 1.0;
const MAX_SWAP_PASSES: usize = 32;
const EPSILON: f64 = 1e-9;

fn key(a: PlayerId, b: PlayerId) -> (PlayerId, PlayerId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Who has played with and against whom, and how often each player played or sat out.
#[derive(Clone, Debug, Default)]
pub struct PairingHistory {
    partners: HashMap<(PlayerId, PlayerId), u32>,
    opponents: HashMap<(PlayerId, PlayerId), u32>,
    played: HashMap<PlayerId, u32>,
    byes: HashMap<PlayerId, u32>,
}

impl PairingHistory {
    pub fn from_rounds(rounds: &[Round]) -> Self {
        let mut h = Self::default();
        for round in rounds {
            for m in &round.matches {
                for team in [m.team_a, m.team_b] {
                    *h.partners.entry(key(team[0], team[1])).or_default() += 1;
                }
                for a in m.team_a {
                    for b in m.team_b {
                        *h.opponents.entry(key(a, b)).or_default() += 1;
                    }
                }
                for p in m.players() {
                    *h.played.entry(p).or_default() += 1;
                }
            }
            for &p in &round.byes {
                *h.byes.entry(p).or_default() += 1;
            }
        }
        h
    }

    pub fn partner_count(&self, a: PlayerId, b: PlayerId) -> u32 {
        self.partners.get(&key(a, b)).copied().unwrap_or(0)
    }

    pub fn opponent_count(&self, a: PlayerId, b: PlayerId) -> u32 {
        self.opponents.get(&key(a, b)).copied().unwrap_or(0)
    }

    pub fn played(&self, id: PlayerId) -> u32 {
        self.played.get(&id).copied().unwrap_or(0)
    }

    pub fn byes(&self, id: PlayerId) -> u32 {
        self.byes.get(&id).copied().unwrap_or(0)
    }
}

/// Pair up `items` (even length) minimizing the summed `cost` of the pairs.
///
/// Greedy: the first unpaired item takes its cheapest remaining partner.
/// Then for any two pairs `(a,b),(c,d)` the cheaper of `(a,c),(b,d)` and
/// `(a,d),(b,c)` replaces them when strictly better.
pub fn pair_up<T>(items: &[T], cost: impl Fn(&T, &T) -> f64) -> Vec<(usize, usize)> {
    let mut free: Vec<usize> = (0..items.len()).collect();
    let mut pairs: Vec<(usize, usize)> = Vec::with_capacity(items.len() / 2);
    while free.len() >= 2 {
        let a = free.remove(0);
        let mut best = 0;
        let mut best_cost = f64::INFINITY;
        for (k, &b) in free.iter().enumerate() {
            let c = cost(&items[a], &items[b]);
            if c < best_cost - EPSILON {
                best = k;
                best_cost = c;
            }
        }
        let b = free.remove(best);
        pairs.push((a, b));
    }

    let pair_cost = |(a, b): (usize, usize)| cost(&items[a], &items[b]);
    for _ in 0..MAX_SWAP_PASSES {
        let mut improved = false;
        for i in 0..pairs.len() {
            for j in i + 1..pairs.len() {
                let (a, b) = pairs[i];
                let (c, d) = pairs[j];
                let current = pair_cost((a, b)) + pair_cost((c, d));
                let cross = pair_cost((a, c)) + pair_cost((b, d));
                let split = pair_cost((a, d)) + pair_cost((b, c));
                if cross < current - EPSILON && cross <= split {
                    pairs[i] = (a, c);
                    pairs[j] = (b, d);
                    improved = true;
                } else if split < current - EPSILON {
                    pairs[i] = (a, d);
                    pairs[j] = (b, c);
                    improved = true;
                }
            }
        }
        if !improved {
            break;
        }
    }
    pairs
}

/// Turn `playing` (a multiple of four) into matches on courts `0..`.
///
/// `skill_weight` 0 ignores skill tiers; otherwise teams are pulled toward the
/// mean team strength and opposing teams toward equal strength.
pub fn build_matches(
    playing: &[Player],
    history: &PairingHistory,
    skill_weight: f64,
    round_index: usize,
) -> Vec<Match> {
    if playing.len() < 4 {
        return Vec::new();
    }
    let total: u32 = playing.iter().map(Player::skill_weight).sum();
    let mean_team = 2.0 * f64::from(total) / playing.len() as f64;

    let partner_cost = |p: &Player, q: &Player| {
        let strength = f64::from(p.skill_weight() + q.skill_weight());
        PARTNER_REPEAT * f64::from(history.partner_count(p.id, q.id))
            + OPPONENT_REPEAT * f64::from(history.opponent_count(p.id, q.id))
            + skill_weight * (strength - mean_team).abs()
    };
    let teams: Vec<([PlayerId; 2], u32)> = pair_up(playing, partner_cost)
        .into_iter()
        .map(|(a, b)| {
            let (p, q) = (&playing[a], &playing[b]);
            ([p.id, q.id], p.skill_weight() + q.skill_weight())
        })
        .collect();

    let match_cost = |x: &([PlayerId; 2], u32), y: &([PlayerId; 2], u32)| {
        let mut c = skill_weight * (f64::from(x.1) - f64::from(y.1)).abs();
        for a in x.0 {
            for b in y.0 {
                c += MATCH_OPPONENT_REPEAT * f64::from(history.opponent_count(a, b))
                    + MATCH_PARTNER_REPEAT * f64::from(history.partner_count(a, b));
            }
        }
        c
    };
    let usable = teams.len() - teams.len() % 2;
    pair_up(&teams[..usable], match_cost)
        .into_iter()
        .enumerate()
        .map(|(court, (a, b))| Match::new(round_index, court, teams[a].0, teams[b].0))
        .collect()
}

/// Order key that starts at roster position `round_index % n` and wraps.
pub fn rotated_position(position: usize, round_index: usize, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    (position + n - round_index % n) % n
}
