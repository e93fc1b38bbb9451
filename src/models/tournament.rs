//! Tournament aggregate and TournamentMode.

use crate::logic::{
    generate_additional_round, generate_championship_round, generate_event_round,
    generate_schedule, Strategy, MIN_PLAYERS,
};
use crate::models::game::{MatchId, Round, Team};
use crate::models::player::{Player, PlayerId};
use crate::models::standings::{compute_standings, prize_standings, Standing};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Not enough (active) players to form a match (need at least 4).
    NotEnoughPlayers,
    /// Tournament is not in a state that allows this action.
    InvalidState,
    /// Player not found on the roster.
    PlayerNotFound(PlayerId),
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayerName,
    /// Player name is blank.
    EmptyName,
    /// No round with this index.
    RoundNotFound(usize),
    /// No match with this id in the round.
    MatchNotFound(MatchId),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::NotEnoughPlayers => write!(f, "Need at least 4 players"),
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
            TournamentError::PlayerNotFound(_) => write!(f, "Player not found"),
            TournamentError::DuplicatePlayerName => {
                write!(f, "Player with this name already exists")
            }
            TournamentError::EmptyName => write!(f, "Player name is required"),
            TournamentError::RoundNotFound(i) => write!(f, "Round {} not found", i + 1),
            TournamentError::MatchNotFound(id) => write!(f, "Match {} not found", id),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Classic: fixed roster, whole schedule up front. Event: players come and go,
/// rounds are built one at a time from whoever is active.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentMode {
    #[default]
    Classic,
    Event,
}

/// Full tournament state: roster, rounds and court setup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    /// Frozen once a classic tournament starts; append-only in event mode.
    pub players: Vec<Player>,
    /// Append-only; only scores change after a round is created.
    pub rounds: Vec<Round>,
    pub is_started: bool,
    #[serde(default)]
    pub mode: TournamentMode,
    /// Display names per court index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub court_names: Option<Vec<String>>,
    /// Courts available for event rounds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_courts: Option<usize>,
}

impl Tournament {
    /// Create an empty, not yet started tournament.
    pub fn new(name: impl Into<String>, mode: TournamentMode) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            players: Vec::new(),
            rounds: Vec::new(),
            is_started: false,
            mode,
            court_names: None,
            num_courts: None,
        }
    }

    /// Create a tournament with an initial roster. Still not started.
    pub fn with_players(
        name: impl Into<String>,
        players: Vec<Player>,
        mode: TournamentMode,
    ) -> Self {
        Self {
            players,
            ..Self::new(name, mode)
        }
    }

    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Players that may be scheduled in the next event round.
    pub fn active_players(&self) -> Vec<Player> {
        self.players.iter().filter(|p| p.active()).cloned().collect()
    }

    /// Add a player before the start, or at any time in event mode.
    pub fn add_player(&mut self, mut player: Player) -> Result<PlayerId, TournamentError> {
        if self.is_started && self.mode == TournamentMode::Classic {
            return Err(TournamentError::InvalidState);
        }
        let name = player.name.trim().to_string();
        if name.is_empty() {
            return Err(TournamentError::EmptyName);
        }
        let folded = name.to_lowercase();
        if self.players.iter().any(|p| p.name.to_lowercase() == folded) {
            return Err(TournamentError::DuplicatePlayerName);
        }
        player.name = name;
        let id = player.id;
        self.players.push(player);
        Ok(id)
    }

    /// Remove a player by id (only before the start).
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<(), TournamentError> {
        if self.is_started {
            return Err(TournamentError::InvalidState);
        }
        let idx = self
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        self.players.remove(idx);
        Ok(())
    }

    /// Flip a player's active flag (event mode only). Returns the new state.
    pub fn toggle_active(&mut self, player_id: PlayerId) -> Result<bool, TournamentError> {
        if self.mode != TournamentMode::Event {
            return Err(TournamentError::InvalidState);
        }
        let p = self
            .players
            .iter_mut()
            .find(|p| p.id == player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        p.toggle_active();
        Ok(p.active())
    }

    /// Start: a classic tournament gets its full schedule now, an event starts with no rounds.
    pub fn start(&mut self) -> Result<(), TournamentError> {
        if self.is_started {
            return Err(TournamentError::InvalidState);
        }
        if self.mode == TournamentMode::Classic {
            if self.players.len() < MIN_PLAYERS {
                return Err(TournamentError::NotEnoughPlayers);
            }
            self.rounds = generate_schedule(&self.players);
            log::info!(
                "Tournament {} started: {} players, {} rounds",
                self.id,
                self.players.len(),
                self.rounds.len()
            );
        }
        self.is_started = true;
        Ok(())
    }

    /// Append the next round: an extra classic round, or an event round over the active players.
    pub fn add_round(&mut self) -> Result<&Round, TournamentError> {
        if !self.is_started {
            return Err(TournamentError::InvalidState);
        }
        let index = self.rounds.len();
        let round = match self.mode {
            TournamentMode::Classic => {
                if self.players.len() < MIN_PLAYERS {
                    return Err(TournamentError::NotEnoughPlayers);
                }
                generate_additional_round(&self.players, &self.rounds, index)
            }
            TournamentMode::Event => {
                let active = self.active_players();
                if active.len() < MIN_PLAYERS {
                    return Err(TournamentError::NotEnoughPlayers);
                }
                let courts = self.num_courts.unwrap_or(active.len() / 4);
                let round =
                    generate_event_round(&active, &self.players, &self.rounds, index, courts);
                if round.matches.is_empty() {
                    return Err(TournamentError::InvalidState);
                }
                round
            }
        };
        log::info!(
            "Tournament {}: round {} added ({} matches, {} byes)",
            self.id,
            index + 1,
            round.matches.len(),
            round.byes.len()
        );
        self.rounds.push(round);
        Ok(&self.rounds[index])
    }

    /// Append the finals round for the current top four.
    ///
    /// In event mode only active players are considered: the finalists are the
    /// four best-ranked active players and the other active players sit out.
    pub fn add_championship_round(&mut self) -> Result<&Round, TournamentError> {
        if !self.is_started {
            return Err(TournamentError::InvalidState);
        }
        let index = self.rounds.len();
        let (roster, standings) = match self.mode {
            TournamentMode::Classic => (self.players.clone(), self.standings()),
            TournamentMode::Event => {
                let active = self.active_players();
                let standings = self
                    .standings()
                    .into_iter()
                    .filter(|s| active.iter().any(|p| p.id == s.player_id))
                    .collect::<Vec<_>>();
                (active, standings)
            }
        };
        let round = generate_championship_round(&roster, &standings, &self.rounds, index)?;
        log::info!("Tournament {}: championship round {} added", self.id, index + 1);
        self.rounds.push(round);
        Ok(&self.rounds[index])
    }

    /// Enter (or clear, with `None`) one team's score.
    pub fn set_score(
        &mut self,
        round_index: usize,
        match_id: &str,
        team: Team,
        score: Option<u32>,
    ) -> Result<(), TournamentError> {
        let round = self
            .rounds
            .get_mut(round_index)
            .ok_or(TournamentError::RoundNotFound(round_index))?;
        round
            .get_match_mut(match_id)
            .ok_or_else(|| TournamentError::MatchNotFound(match_id.to_string()))?
            .set_score(team, score);
        Ok(())
    }

    /// Enter both scores of a match at once.
    pub fn set_scores(
        &mut self,
        round_index: usize,
        match_id: &str,
        score_a: Option<u32>,
        score_b: Option<u32>,
    ) -> Result<(), TournamentError> {
        self.set_score(round_index, match_id, Team::A, score_a)?;
        self.set_score(round_index, match_id, Team::B, score_b)
    }

    pub fn standings(&self) -> Vec<Standing> {
        compute_standings(&self.players, &self.rounds)
    }

    /// Standings without prize-exempt players.
    pub fn prize_standings(&self) -> Vec<Standing> {
        prize_standings(&self.standings())
    }

    /// Display name of a court: the configured name, or "Court N".
    pub fn court_name(&self, court_index: usize) -> String {
        self.court_names
            .as_ref()
            .and_then(|names| names.get(court_index))
            .filter(|n| !n.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| format!("Court {}", court_index + 1))
    }

    /// Classic roster of 8, 12 or 16: every pair partners once and opposes twice.
    pub fn is_perfectly_balanced(&self) -> bool {
        self.mode == TournamentMode::Classic
            && Strategy::for_roster(self.players.len()).is_perfectly_balanced()
    }
}
