//! Leaderboard derived from completed matches. Never stored.

use crate::models::game::Round;
use crate::models::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// One leaderboard row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub player_id: PlayerId,
    pub player_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_nickname: Option<String>,
    pub prize_exempt: bool,
    pub total_points: u32,
    pub matches_played: u32,
    /// Rounded to one decimal.
    pub avg_points: f64,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub point_differential: i64,
}

impl Standing {
    fn empty(p: &Player) -> Self {
        Self {
            player_id: p.id,
            player_name: p.name.clone(),
            player_nickname: p.nickname.clone(),
            prize_exempt: p.prize_exempt,
            total_points: 0,
            matches_played: 0,
            avg_points: 0.0,
            wins: 0,
            losses: 0,
            ties: 0,
            point_differential: 0,
        }
    }

    fn record(&mut self, scored: u32, conceded: u32) {
        self.total_points += scored;
        self.point_differential += i64::from(scored) - i64::from(conceded);
        self.matches_played += 1;
        match scored.cmp(&conceded) {
            Ordering::Greater => self.wins += 1,
            Ordering::Less => self.losses += 1,
            Ordering::Equal => self.ties += 1,
        }
    }
}

/// Fold all completed matches into per-player standings, best first.
///
/// Order: total points, then wins, then point differential (all descending);
/// remaining ties keep roster order. Players in matches but not on the roster are ignored.
pub fn compute_standings(players: &[Player], rounds: &[Round]) -> Vec<Standing> {
    let mut table: Vec<Standing> = players.iter().map(Standing::empty).collect();
    let index: HashMap<PlayerId, usize> =
        players.iter().enumerate().map(|(i, p)| (p.id, i)).collect();

    for m in rounds.iter().flat_map(|r| r.matches.iter()) {
        let Some((a, b)) = m.result().filter(|_| m.is_completed) else {
            continue;
        };
        for (team, scored, conceded) in [(&m.team_a, a, b), (&m.team_b, b, a)] {
            for pid in team {
                if let Some(&i) = index.get(pid) {
                    table[i].record(scored, conceded);
                }
            }
        }
    }

    for s in &mut table {
        if s.matches_played > 0 {
            let avg = f64::from(s.total_points) / f64::from(s.matches_played);
            s.avg_points = (avg * 10.0).round() / 10.0;
        }
    }

    // stable sort keeps roster order for full ties
    table.sort_by(|x, y| {
        y.total_points
            .cmp(&x.total_points)
            .then(y.wins.cmp(&x.wins))
            .then(y.point_differential.cmp(&x.point_differential))
    });
    table
}

/// Standings without prize-exempt players.
pub fn prize_standings(standings: &[Standing]) -> Vec<Standing> {
    standings.iter().filter(|s| !s.prize_exempt).cloned().collect()
}
