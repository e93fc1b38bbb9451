//! Match, Round and Team for 2v2 padel games.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};

/// Identifier of a match, e.g. `r3-c1` or `r9-championship`.
pub type MatchId = String;

const CHAMPIONSHIP_TAG: &str = "championship";

/// Which side of a match.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    #[default]
    A,
    B,
}

/// A single 2v2 match on one court.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub round_index: usize,
    pub court_index: usize,
    pub team_a: [PlayerId; 2],
    pub team_b: [PlayerId; 2],
    /// None until entered.
    pub score_a: Option<u32>,
    pub score_b: Option<u32>,
    pub is_completed: bool,
}

impl Match {
    pub fn new(
        round_index: usize,
        court_index: usize,
        team_a: [PlayerId; 2],
        team_b: [PlayerId; 2],
    ) -> Self {
        Self {
            id: court_match_id(round_index, court_index),
            round_index,
            court_index,
            team_a,
            team_b,
            score_a: None,
            score_b: None,
            is_completed: false,
        }
    }

    /// Finals match: always court 0, id tagged so viewers can label it.
    pub fn championship(round_index: usize, team_a: [PlayerId; 2], team_b: [PlayerId; 2]) -> Self {
        Self {
            id: format!("r{round_index}-{CHAMPIONSHIP_TAG}"),
            ..Self::new(round_index, 0, team_a, team_b)
        }
    }

    pub fn is_championship(&self) -> bool {
        self.id.ends_with(CHAMPIONSHIP_TAG)
    }

    /// Move the match to another court, keeping the id in step.
    pub fn assign_court(&mut self, court_index: usize) {
        self.court_index = court_index;
        if !self.is_championship() {
            self.id = court_match_id(self.round_index, court_index);
        }
    }

    /// All four players, team A first.
    pub fn players(&self) -> [PlayerId; 4] {
        [self.team_a[0], self.team_a[1], self.team_b[0], self.team_b[1]]
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.players().contains(&id)
    }

    /// Set one side's score and recompute completion.
    pub fn set_score(&mut self, team: Team, score: Option<u32>) {
        match team {
            Team::A => self.score_a = score,
            Team::B => self.score_b = score,
        }
        self.is_completed = self.score_a.is_some() && self.score_b.is_some();
    }

    /// Both scores, if the match is complete.
    pub fn result(&self) -> Option<(u32, u32)> {
        match (self.score_a, self.score_b) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        }
    }
}

fn court_match_id(round_index: usize, court_index: usize) -> MatchId {
    format!("r{round_index}-c{court_index}")
}

/// One round: matches ordered by court, plus players sitting out.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub index: usize,
    pub matches: Vec<Match>,
    pub byes: Vec<PlayerId>,
}

impl Round {
    pub fn new(index: usize, matches: Vec<Match>, byes: Vec<PlayerId>) -> Self {
        Self {
            index,
            matches,
            byes,
        }
    }

    /// Every player in the round: match players first, then byes.
    pub fn participants(&self) -> Vec<PlayerId> {
        self.matches
            .iter()
            .flat_map(|m| m.players())
            .chain(self.byes.iter().copied())
            .collect()
    }

    pub fn is_championship(&self) -> bool {
        self.matches.iter().any(Match::is_championship)
    }

    pub fn is_completed(&self) -> bool {
        self.matches.iter().all(|m| m.is_completed)
    }

    pub fn get_match_mut(&mut self, id: &str) -> Option<&mut Match> {
        self.matches.iter_mut().find(|m| m.id == id)
    }
}
