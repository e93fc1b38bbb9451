//! Data structures for the Americano: players, matches, rounds, tournament, standings.

mod game;
mod player;
mod standings;
mod tournament;

pub use game::{Match, MatchId, Round, Team};
pub use player::{Player, PlayerId, SkillLevel};
pub use standings::{compute_standings, prize_standings, Standing};
pub use tournament::{Tournament, TournamentError, TournamentId, TournamentMode};
