//! Scheduling engine: full schedules, court rotation and on-demand rounds.

mod balanced;
mod championship;
mod circle;
mod courts;
mod cyclic;
mod event;
mod extend;
mod pairing;
mod schedule;

pub use balanced::{schedule_16, schedule_8, SCHEDULE_16, SCHEDULE_8};
pub use championship::generate_championship_round;
pub use circle::{circle_pairings, circle_schedule};
pub use courts::{optimize_courts, CourtHistory, MAX_SEARCH_COURTS};
pub use cyclic::{schedule_12, WHIST_SEEDS_12};
pub use event::{generate_event_round, EVENT_SKILL_WEIGHT};
pub use extend::generate_additional_round;
pub use pairing::PairingHistory;
pub use schedule::{generate_schedule, schedule_length, Strategy, MIN_PLAYERS};
