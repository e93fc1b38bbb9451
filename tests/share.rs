//! Integration tests for the share store: PIN gating, expiry and kiosk patches.

use chrono::{Duration, TimeZone, Utc};
use padel_americano::share::{
    generate_id, generate_pin, hash_pin, PlayerPatch, ShareError, ShareStore,
};
use padel_americano::{Player, Tournament, TournamentError, TournamentMode};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn event_tournament() -> Tournament {
    let players: Vec<Player> = (0..8).map(|i| Player::new(format!("P{i}"))).collect();
    Tournament::with_players("Club night", players, TournamentMode::Event)
}

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 1, 18, 0, 0).unwrap()
}

#[test]
fn pin_hash_matches_the_rolling_string_hash() {
    assert_eq!(hash_pin(""), "0");
    assert_eq!(hash_pin("1234"), "170842");
    assert_eq!(hash_pin("9876543210abc"), "-3751d19");
    assert_ne!(hash_pin("1234"), hash_pin("4321"));
}

#[test]
fn ids_and_pins_have_the_expected_shape() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let id = generate_id(&mut rng);
        assert_eq!(id.len(), 6);
        assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        let pin: u32 = generate_pin(&mut rng).parse().unwrap();
        assert!((1000..=9999).contains(&pin));
    }
}

#[test]
fn create_then_read_without_pin() {
    let mut store = ShareStore::default();
    let mut rng = StdRng::seed_from_u64(1);
    let created = store.create(event_tournament(), &mut rng, now());
    assert_eq!(created.share_url, format!("/game/{}", created.id));

    let entry = store.get(&created.id, now()).unwrap();
    assert_eq!(entry.tournament.players.len(), 8);
    assert_eq!(entry.expires_at, now() + Duration::hours(24));
    assert_eq!(entry.pin_hash, hash_pin(&created.pin));
    assert_eq!(store.get("zzzzzz", now()).unwrap_err(), ShareError::NotFound);
}

#[test]
fn writes_need_the_right_pin() {
    let mut store = ShareStore::default();
    let mut rng = StdRng::seed_from_u64(2);
    let created = store.create(event_tournament(), &mut rng, now());
    let mut renamed = event_tournament();
    renamed.name = "Renamed".to_string();

    assert_eq!(
        store.update(&created.id, None, renamed.clone(), now()).unwrap_err(),
        ShareError::PinRequired
    );
    let wrong = if created.pin == "1111" { "2222" } else { "1111" };
    assert_eq!(
        store.update(&created.id, Some(wrong), renamed.clone(), now()).unwrap_err(),
        ShareError::InvalidPin
    );
    let entry = store.update(&created.id, Some(&created.pin), renamed, now()).unwrap();
    assert_eq!(entry.tournament.name, "Renamed");

    assert_eq!(store.delete(&created.id, Some(wrong), now()), Err(ShareError::InvalidPin));
    store.delete(&created.id, Some(&created.pin), now()).unwrap();
    assert!(store.is_empty());
}

#[test]
fn engine_changes_go_through_the_pin() {
    let mut store = ShareStore::default();
    let mut rng = StdRng::seed_from_u64(3);
    let created = store.create(event_tournament(), &mut rng, now());
    let pin = Some(created.pin.as_str());

    let rounds = store
        .with_tournament_mut(&created.id, pin, now(), |t| {
            t.start()?;
            t.add_round()?;
            Ok(t.rounds.len())
        })
        .unwrap();
    assert_eq!(rounds, 1);

    let err = store
        .with_tournament_mut(&created.id, pin, now(), |t| t.start())
        .unwrap_err();
    assert_eq!(err, ShareError::Tournament(TournamentError::InvalidState));
}

#[test]
fn kiosk_toggles_and_adds_without_pin() {
    let mut store = ShareStore::default();
    let mut rng = StdRng::seed_from_u64(4);
    let created = store.create(event_tournament(), &mut rng, now());
    let player_id = store.get(&created.id, now()).unwrap().tournament.players[2].id;

    let t = store
        .patch_players(&created.id, PlayerPatch::Toggle { player_id }, now())
        .unwrap();
    assert!(!t.players[2].active());

    let t = store
        .patch_players(&created.id, PlayerPatch::Add { player: Player::new("Newcomer") }, now())
        .unwrap();
    assert_eq!(t.players.len(), 9);
    assert_eq!(t.players[8].is_active, Some(true));

    let newcomer_again = PlayerPatch::Add { player: Player::new("NEWCOMER") };
    let dup = store.patch_players(&created.id, newcomer_again, now());
    assert_eq!(dup.unwrap_err(), ShareError::Tournament(TournamentError::DuplicatePlayerName));
}

#[test]
fn player_patch_reads_tagged_json() {
    let json = r#"{
        "action": "add",
        "player": {
            "id": "7d9f4a52-3c1e-4c53-9d5e-1f1b2a3c4d5e",
            "name": "Kim",
            "skill_level": "high"
        }
    }"#;
    let patch: PlayerPatch = serde_json::from_str(json).unwrap();
    match patch {
        PlayerPatch::Add { player } => {
            assert_eq!(player.name, "Kim");
            assert_eq!(player.skill_level, Some(padel_americano::SkillLevel::High));
            assert!(!player.prize_exempt);
        }
        other => panic!("unexpected patch {other:?}"),
    }
}

#[test]
fn expired_entries_disappear() {
    let mut store = ShareStore::new(Duration::hours(2));
    let mut rng = StdRng::seed_from_u64(5);
    let created = store.create(event_tournament(), &mut rng, now());
    let later = now() + Duration::hours(3);

    assert_eq!(store.get(&created.id, later).unwrap_err(), ShareError::NotFound);
    assert_eq!(
        store.update(&created.id, Some(&created.pin), event_tournament(), later).unwrap_err(),
        ShareError::NotFound
    );
    assert_eq!(store.purge_expired(now()), 0);
    assert_eq!(store.purge_expired(later), 1);
    assert_eq!(store.len(), 0);
}
