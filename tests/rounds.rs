//! Integration tests for on-demand rounds: extra classic rounds, championship and event rounds.

use padel_americano::{
    compute_standings, generate_additional_round, generate_championship_round,
    generate_event_round, generate_schedule, Player, PlayerId, Round, SkillLevel, TournamentError,
};
use std::collections::{HashMap, HashSet};

fn roster(n: usize) -> Vec<Player> {
    (0..n).map(|i| Player::new(format!("P{i}"))).collect()
}

fn assert_no_duplicates(round: &Round) {
    let all = round.participants();
    let unique: HashSet<PlayerId> = all.iter().copied().collect();
    assert_eq!(all.len(), unique.len(), "duplicate player in round {}", round.index);
}

#[test]
fn additional_round_uses_everyone_when_divisible_by_four() {
    let players = roster(8);
    let rounds = generate_schedule(&players);
    let extra = generate_additional_round(&players, &rounds, rounds.len());
    assert_eq!(extra.index, 7);
    assert_eq!(extra.matches.len(), 2);
    assert!(extra.byes.is_empty());
    assert_no_duplicates(&extra);
    assert!(extra.matches.iter().all(|m| m.round_index == 7));
    assert_eq!(extra.participants().len(), 8);
}

#[test]
fn additional_round_sits_out_the_remainder() {
    for n in [5, 6, 7, 9, 10, 11] {
        let players = roster(n);
        let rounds = generate_schedule(&players);
        let extra = generate_additional_round(&players, &rounds, rounds.len());
        assert_eq!(extra.byes.len(), n % 4, "n = {n}");
        assert_eq!(extra.matches.len(), n / 4);
        assert_no_duplicates(&extra);
        assert_eq!(extra.participants().len(), n);
    }
}

#[test]
fn additional_round_rests_whoever_rested_least() {
    // 9 players: everyone sat out once in the 9 circle rounds, so the tie falls to rotation
    let players = roster(9);
    let rounds = generate_schedule(&players);
    let extra = generate_additional_round(&players, &rounds, rounds.len());
    assert_eq!(extra.byes, vec![players[0].id]);

    // a player who has never rested goes first
    let mut rounds = rounds;
    for r in &mut rounds {
        r.byes.retain(|&id| id != players[5].id);
    }
    let extra = generate_additional_round(&players, &rounds, rounds.len());
    assert_eq!(extra.byes, vec![players[5].id]);
}

#[test]
fn repeated_extra_rounds_find_fresh_partners() {
    let players = roster(8);
    let mut rounds: Vec<Round> = Vec::new();
    for i in 0..7 {
        let r = generate_additional_round(&players, &rounds, i);
        assert_no_duplicates(&r);
        rounds.push(r);
    }
    let mut partners: HashMap<(PlayerId, PlayerId), u32> = HashMap::new();
    for m in rounds.iter().flat_map(|r| &r.matches) {
        for t in [m.team_a, m.team_b] {
            *partners.entry((t[0].min(t[1]), t[0].max(t[1]))).or_insert(0) += 1;
        }
    }
    assert_eq!(partners.len(), 28);
    assert!(partners.values().all(|&c| c == 1));
}

#[test]
fn additional_round_is_deterministic() {
    let players = roster(10);
    let rounds = generate_schedule(&players);
    assert_eq!(
        generate_additional_round(&players, &rounds, rounds.len()),
        generate_additional_round(&players, &rounds, rounds.len())
    );
}

#[test]
fn championship_pairs_first_and_third_against_second_and_fourth() {
    let players = roster(8);
    let mut rounds = generate_schedule(&players);
    // P0 scores most, P1 next, and so on
    for r in &mut rounds {
        for m in &mut r.matches {
            let rank = |id: PlayerId| players.iter().position(|p| p.id == id).unwrap() as u32;
            let a = 30 - rank(m.team_a[0]) - rank(m.team_a[1]);
            let b = 30 - rank(m.team_b[0]) - rank(m.team_b[1]);
            m.set_score(padel_americano::Team::A, Some(a));
            m.set_score(padel_americano::Team::B, Some(b));
        }
    }
    let standings = compute_standings(&players, &rounds);
    let top: Vec<PlayerId> = standings.iter().take(4).map(|s| s.player_id).collect();

    let finals = generate_championship_round(&players, &standings, &rounds, rounds.len()).unwrap();
    assert_eq!(finals.index, 7);
    assert_eq!(finals.matches.len(), 1);
    let m = &finals.matches[0];
    assert_eq!(m.team_a, [top[0], top[2]]);
    assert_eq!(m.team_b, [top[1], top[3]]);
    assert_eq!(m.court_index, 0);
    assert!(m.is_championship());
    assert!(m.id.contains("championship"));
    assert!(finals.is_championship());
    assert_eq!(finals.byes.len(), 4);
    assert_no_duplicates(&finals);
}

#[test]
fn championship_needs_four_ranked_players() {
    let players = roster(3);
    let standings = compute_standings(&players, &[]);
    assert_eq!(
        generate_championship_round(&players, &standings, &[], 0),
        Err(TournamentError::NotEnoughPlayers)
    );
}

#[test]
fn event_round_caps_matches_at_court_count() {
    let full = roster(14);
    let active: Vec<Player> = full[..10].to_vec();
    let round = generate_event_round(&active, &full, &[], 0, 2);
    assert_eq!(round.matches.len(), 2);
    assert_eq!(round.byes.len(), 2);
    assert_no_duplicates(&round);

    let active_ids: HashSet<PlayerId> = active.iter().map(|p| p.id).collect();
    assert!(round.participants().iter().all(|id| active_ids.contains(id)));
    assert_eq!(round.participants().len(), 10);
}

#[test]
fn event_round_fills_only_complete_courts() {
    let full = roster(13);
    let round = generate_event_round(&full, &full, &[], 0, 5);
    assert_eq!(round.matches.len(), 3);
    assert_eq!(round.byes.len(), 1);
    assert_no_duplicates(&round);
}

#[test]
fn event_round_without_courts_rests_everyone() {
    let full = roster(6);
    let round = generate_event_round(&full, &full, &[], 4, 0);
    assert!(round.matches.is_empty());
    assert_eq!(round.byes.len(), 6);
    assert_eq!(round.index, 4);
}

#[test]
fn event_round_mixes_skill_tiers_within_teams() {
    let full: Vec<Player> = (0..8)
        .map(|i| {
            let skill = if i < 4 { SkillLevel::High } else { SkillLevel::Low };
            Player::new(format!("P{i}")).with_skill(skill)
        })
        .collect();
    let skill: HashMap<PlayerId, SkillLevel> =
        full.iter().map(|p| (p.id, p.skill_level.unwrap())).collect();

    let round = generate_event_round(&full, &full, &[], 0, 2);
    assert_eq!(round.matches.len(), 2);
    for m in &round.matches {
        for team in [m.team_a, m.team_b] {
            let tiers: HashSet<SkillLevel> = team.iter().map(|id| skill[id]).collect();
            assert_eq!(tiers.len(), 2, "team should pair a high with a low player");
        }
    }
}

#[test]
fn event_round_gets_late_arrivals_on_court() {
    let full = roster(9);
    let first = generate_event_round(&full[..8], &full, &[], 0, 2);
    assert!(first.byes.is_empty());

    let second = generate_event_round(&full, &full, &[first], 1, 2);
    assert_eq!(second.byes.len(), 1);
    assert_ne!(second.byes[0], full[8].id);
    assert!(second.matches.iter().any(|m| m.contains(full[8].id)));
}
