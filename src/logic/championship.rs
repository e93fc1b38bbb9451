//! Finals round for the top four of the standings.

use crate::models::{Match, Player, PlayerId, Round, Standing, TournamentError};

/// Single match: rank 1 & rank 3 against rank 2 & rank 4, on court 0.
///
/// Everyone else on the roster sits out. `standings` must already be ranked.
pub fn generate_championship_round(
    players: &[Player],
    standings: &[Standing],
    _existing_rounds: &[Round],
    new_round_index: usize,
) -> Result<Round, TournamentError> {
    let [first, second, third, fourth] = match standings {
        [a, b, c, d, ..] => [a.player_id, b.player_id, c.player_id, d.player_id],
        _ => return Err(TournamentError::NotEnoughPlayers),
    };
    let finalists = [first, second, third, fourth];
    let m = Match::championship(new_round_index, [first, third], [second, fourth]);
    let byes: Vec<PlayerId> = players
        .iter()
        .map(|p| p.id)
        .filter(|id| !finalists.contains(id))
        .collect();
    log::debug!("championship round {new_round_index}: {} sitting out", byes.len());
    Ok(Round::new(new_round_index, vec![m], byes))
}
