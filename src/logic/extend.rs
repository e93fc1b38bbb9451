//! Extra classic rounds once the generated schedule has been played.

use crate::logic::courts::{optimize_courts, CourtHistory};
use crate::logic::pairing::{build_matches, rotated_position, PairingHistory};
use crate::logic::schedule::MIN_PLAYERS;
use crate::models::{Player, PlayerId, Round};

/// One more round over the full roster.
///
/// `n % 4` players sit out: fewest byes so far first, then most matches played,
/// then a roster position that rotates with `new_round_index`. The rest are
/// paired to avoid repeating earlier partners, then earlier opponents.
pub fn generate_additional_round(
    players: &[Player],
    existing_rounds: &[Round],
    new_round_index: usize,
) -> Round {
    let n = players.len();
    if n < MIN_PLAYERS {
        return Round::new(new_round_index, Vec::new(), players.iter().map(|p| p.id).collect());
    }
    let history = PairingHistory::from_rounds(existing_rounds);

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&i| {
        let id = players[i].id;
        (
            history.byes(id),
            std::cmp::Reverse(history.played(id)),
            rotated_position(i, new_round_index, n),
        )
    });
    let sitting = n % 4;
    let byes: Vec<PlayerId> = order[..sitting].iter().map(|&i| players[i].id).collect();

    let mut playing: Vec<Player> = players
        .iter()
        .filter(|p| !byes.contains(&p.id))
        .cloned()
        .collect();
    let len = playing.len();
    playing.rotate_left(new_round_index % len);

    let matches = build_matches(&playing, &history, 0.0, new_round_index);
    let mut courts = CourtHistory::from_rounds(existing_rounds);
    let matches = optimize_courts(matches, new_round_index, &mut courts);
    log::debug!(
        "additional round {new_round_index}: {} matches, {} byes",
        matches.len(),
        byes.len()
    );
    Round::new(new_round_index, matches, byes)
}
