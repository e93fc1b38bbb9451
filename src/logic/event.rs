//! Open-ended event rounds over whoever is currently active.

use crate::logic::courts::{optimize_courts, CourtHistory};
use crate::logic::pairing::{build_matches, rotated_position, PairingHistory};
use crate::models::{Player, PlayerId, Round};

/// Weight of skill balance against repetition when building event matches.
pub const EVENT_SKILL_WEIGHT: f64 = 2.0;

/// One round for the `active` players on at most `court_count` courts.
///
/// Up to `4 * court_count` players (a multiple of four) play. Those who have
/// played most sit out first, so late arrivals get on court; ties go to fewer
/// byes, then a rotating roster position. Teams are balanced by skill tier and
/// steered away from repeated partners and opponents. `full_roster` fixes the
/// rotation order so that toggling players does not reshuffle everyone.
pub fn generate_event_round(
    active: &[Player],
    full_roster: &[Player],
    existing_rounds: &[Round],
    new_round_index: usize,
    court_count: usize,
) -> Round {
    let mut active: Vec<Player> = active.to_vec();
    let roster_pos = |id: PlayerId| {
        full_roster
            .iter()
            .position(|p| p.id == id)
            .unwrap_or(full_roster.len())
    };
    active.sort_by_key(|p| roster_pos(p.id));
    active.dedup_by_key(|p| p.id);

    let slots = (court_count * 4).min(active.len() / 4 * 4);
    if slots == 0 {
        return Round::new(new_round_index, Vec::new(), active.iter().map(|p| p.id).collect());
    }
    let history = PairingHistory::from_rounds(existing_rounds);

    let n = full_roster.len().max(active.len());
    let mut order: Vec<usize> = (0..active.len()).collect();
    order.sort_by_key(|&i| {
        let id = active[i].id;
        (
            std::cmp::Reverse(history.played(id)),
            history.byes(id),
            rotated_position(roster_pos(id), new_round_index, n),
        )
    });
    let sitting = active.len() - slots;
    let byes: Vec<PlayerId> = order[..sitting].iter().map(|&i| active[i].id).collect();

    let mut playing: Vec<Player> = active.into_iter().filter(|p| !byes.contains(&p.id)).collect();
    let len = playing.len();
    playing.rotate_left(new_round_index % len);

    let matches = build_matches(&playing, &history, EVENT_SKILL_WEIGHT, new_round_index);
    let mut courts = CourtHistory::from_rounds(existing_rounds);
    let matches = optimize_courts(matches, new_round_index, &mut courts);
    log::debug!(
        "event round {new_round_index}: {} matches on {court_count} courts, {} byes",
        matches.len(),
        byes.len()
    );
    Round::new(new_round_index, matches, byes)
}
