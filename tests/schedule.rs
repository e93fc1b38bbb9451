//! Integration tests for full schedule generation: whist tables, cyclic seeds and circle fallback.

use padel_americano::{
    circle_pairings, generate_schedule, schedule_length, Player, PlayerId, Round, Strategy,
};
use std::collections::{HashMap, HashSet};

fn roster(n: usize) -> Vec<Player> {
    (0..n).map(|i| Player::new(format!("P{i}"))).collect()
}

fn pair(a: PlayerId, b: PlayerId) -> (PlayerId, PlayerId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn partner_counts(rounds: &[Round]) -> HashMap<(PlayerId, PlayerId), u32> {
    let mut counts = HashMap::new();
    for m in rounds.iter().flat_map(|r| &r.matches) {
        for team in [m.team_a, m.team_b] {
            *counts.entry(pair(team[0], team[1])).or_insert(0) += 1;
        }
    }
    counts
}

fn opponent_counts(rounds: &[Round]) -> HashMap<(PlayerId, PlayerId), u32> {
    let mut counts = HashMap::new();
    for m in rounds.iter().flat_map(|r| &r.matches) {
        for a in m.team_a {
            for b in m.team_b {
                *counts.entry(pair(a, b)).or_insert(0) += 1;
            }
        }
    }
    counts
}

/// Every player exactly once per round (match or bye) and every match has four distinct players.
fn assert_rounds_cover_roster(players: &[Player], rounds: &[Round]) {
    let ids: HashSet<PlayerId> = players.iter().map(|p| p.id).collect();
    for r in rounds {
        let seen = r.participants();
        let unique: HashSet<PlayerId> = seen.iter().copied().collect();
        assert_eq!(unique.len(), seen.len(), "duplicate player in round {}", r.index);
        assert_eq!(unique, ids, "round {} does not cover the roster", r.index);
        for m in &r.matches {
            let four: HashSet<PlayerId> = m.players().into_iter().collect();
            assert_eq!(four.len(), 4);
            assert_eq!(m.round_index, r.index);
        }
    }
}

fn assert_every_pair_partners_once(players: &[Player], rounds: &[Round]) {
    let counts = partner_counts(rounds);
    let n = players.len();
    assert_eq!(counts.len(), n * (n - 1) / 2);
    for i in 0..n {
        for j in i + 1..n {
            assert_eq!(counts.get(&pair(players[i].id, players[j].id)), Some(&1));
        }
    }
}

#[test]
fn eight_players_use_the_whist_table() {
    let players = roster(8);
    let rounds = generate_schedule(&players);
    assert_eq!(rounds.len(), 7);
    assert!(rounds.iter().all(|r| r.matches.len() == 2 && r.byes.is_empty()));
    assert_eq!(rounds.iter().map(|r| r.matches.len()).sum::<usize>(), 14);
    assert_rounds_cover_roster(&players, &rounds);
    assert_every_pair_partners_once(&players, &rounds);

    // each player: 7 matches, one slot per round
    for p in &players {
        let played = rounds.iter().flat_map(|r| &r.matches).filter(|m| m.contains(p.id)).count();
        assert_eq!(played, 7);
    }
    assert!(opponent_counts(&rounds).values().all(|&c| c == 2));
}

#[test]
fn sixteen_players_use_four_courts_without_byes() {
    let players = roster(16);
    let rounds = generate_schedule(&players);
    assert_eq!(rounds.len(), 15);
    assert!(rounds.iter().all(|r| r.matches.len() == 4 && r.byes.is_empty()));
    assert_rounds_cover_roster(&players, &rounds);
    assert_every_pair_partners_once(&players, &rounds);
    assert!(opponent_counts(&rounds).values().all(|&c| c == 2));
}

#[test]
fn twelve_players_rotate_seeds_into_a_whist_schedule() {
    let players = roster(12);
    let rounds = generate_schedule(&players);
    assert_eq!(rounds.len(), 11);
    assert!(rounds.iter().all(|r| r.matches.len() == 3 && r.byes.is_empty()));
    assert_rounds_cover_roster(&players, &rounds);
    assert_every_pair_partners_once(&players, &rounds);
    assert_eq!(opponent_counts(&rounds).len(), 66);
    assert!(opponent_counts(&rounds).values().all(|&c| c == 2));
}

#[test]
fn fewer_than_four_players_get_no_schedule() {
    for n in 0..4 {
        assert!(generate_schedule(&roster(n)).is_empty());
        assert_eq!(schedule_length(n), 0);
    }
}

#[test]
fn circle_fallback_covers_other_sizes() {
    for n in (4..=21).filter(|n| ![8, 12, 16].contains(n)) {
        let players = roster(n);
        let rounds = generate_schedule(&players);
        assert_eq!(Strategy::for_roster(n), Strategy::Circle);
        assert_eq!(rounds.len(), n - 1 + n % 2, "n = {n}");
        assert_eq!(rounds.len(), schedule_length(n));
        assert_rounds_cover_roster(&players, &rounds);

        let counts = partner_counts(&rounds);
        assert!(counts.values().all(|&c| c == 1), "repeated partnership for n = {n}");
        if n % 4 == 0 {
            assert_every_pair_partners_once(&players, &rounds);
        }
    }
}

#[test]
fn circle_pairings_pair_everyone_once() {
    for n in [5, 6, 7, 10, 13] {
        let mut seen: HashMap<(usize, usize), u32> = HashMap::new();
        let rounds = circle_pairings(n);
        assert_eq!(rounds.len(), n - 1 + n % 2);
        for pairs in &rounds {
            for &(a, b) in pairs {
                if let (Some(a), Some(b)) = (a, b) {
                    *seen.entry((a.min(b), a.max(b))).or_insert(0) += 1;
                }
            }
        }
        assert_eq!(seen.len(), n * (n - 1) / 2, "n = {n}");
        assert!(seen.values().all(|&c| c == 1));
    }
}

#[test]
fn five_players_pad_with_a_ghost() {
    let players = roster(5);
    let rounds = generate_schedule(&players);
    assert_eq!(rounds.len(), 5);
    for r in &rounds {
        assert!(r.matches.len() <= 1);
        assert!((1..=2).contains(&r.byes.len()));
    }
    assert_rounds_cover_roster(&players, &rounds);
    // the ghost's partner sits out each round, so everyone sits out exactly once
    for p in &players {
        assert_eq!(rounds.iter().filter(|r| r.byes.contains(&p.id)).count(), 1);
    }
}

#[test]
fn schedule_is_deterministic() {
    for n in [6, 8, 9, 12, 16, 20] {
        let players = roster(n);
        assert_eq!(generate_schedule(&players), generate_schedule(&players));
    }
}

#[test]
fn match_ids_follow_courts() {
    let rounds = generate_schedule(&roster(16));
    for r in &rounds {
        for (c, m) in r.matches.iter().enumerate() {
            assert_eq!(m.court_index, c);
            assert_eq!(m.id, format!("r{}-c{}", r.index, c));
            assert!(!m.is_completed);
            assert_eq!((m.score_a, m.score_b), (None, None));
        }
    }
}

#[test]
fn perfect_balance_only_for_whist_sizes() {
    for n in 4..=20 {
        assert_eq!(
            Strategy::for_roster(n).is_perfectly_balanced(),
            [8, 12, 16].contains(&n),
            "n = {n}"
        );
    }
}
