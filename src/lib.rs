//! Americano padel: library with models, the scheduling engine and share storage.

pub mod import;
pub mod logic;
pub mod models;
pub mod share;

pub use logic::{
    circle_pairings, generate_additional_round, generate_championship_round, generate_event_round,
    generate_schedule, optimize_courts, schedule_length, CourtHistory, Strategy, MIN_PLAYERS,
};
pub use models::{
    compute_standings, prize_standings, Match, MatchId, Player, PlayerId, Round, SkillLevel,
    Standing, Team, Tournament, TournamentError, TournamentId, TournamentMode,
};
