//! Integration tests for the in-memory tournament store and server configuration.

use badminton_tournament_web::{
    create_tournament, submit_score, MemoryStore, Pairing, Player, ServerConfig, TournamentError,
    TournamentStore,
};
use std::time::Duration;
use uuid::Uuid;

fn sample(club: Uuid) -> badminton_tournament_web::Tournament {
    let players: Vec<Player> = (0..8).map(|i| Player::new(format!("P{i}"))).collect();
    create_tournament("Cup", club, players, &Pairing::Random).unwrap()
}

#[test]
fn insert_and_update_bump_the_version() {
    let store = MemoryStore::new();
    let t = store.insert(sample(Uuid::new_v4())).unwrap();
    assert_eq!(t.version, 1);

    let match_id = t.matches[0].id;
    let (updated, _) = store
        .update(t.id, |t| submit_score(t, match_id, 21, 11))
        .unwrap();
    assert_eq!(updated.version, 2);
    assert!(store.load(t.id).unwrap().get_match(match_id).unwrap().completed);
}

#[test]
fn failed_update_writes_nothing() {
    let store = MemoryStore::new();
    let t = store.insert(sample(Uuid::new_v4())).unwrap();
    let match_id = t.matches[0].id;

    let err = store
        .update(t.id, |t| submit_score(t, match_id, 21, 20))
        .unwrap_err();

    assert_eq!(err, TournamentError::InvalidScore { score_1: 21, score_2: 20 });
    let stored = store.load(t.id).unwrap();
    assert_eq!(stored.version, 1);
    assert!(!stored.get_match(match_id).unwrap().completed);
}

#[test]
fn stale_save_is_a_concurrent_modification() {
    let store = MemoryStore::new();
    let t = store.insert(sample(Uuid::new_v4())).unwrap();
    let mut first = store.load(t.id).unwrap();
    let mut second = store.load(t.id).unwrap();

    let id = first.matches[0].id;
    submit_score(&mut first, id, 21, 5).unwrap();
    assert_eq!(store.save(first).unwrap().version, 2);

    let id = second.matches[1].id;
    submit_score(&mut second, id, 21, 5).unwrap();
    assert_eq!(
        store.save(second).unwrap_err(),
        TournamentError::ConcurrentModification { expected: 1, found: 2 }
    );
}

#[test]
fn unknown_ids_are_not_found() {
    let store = MemoryStore::new();
    let id = Uuid::new_v4();
    assert_eq!(store.load(id).unwrap_err(), TournamentError::TournamentNotFound(id));
    assert_eq!(store.delete(id).unwrap_err(), TournamentError::TournamentNotFound(id));
    assert!(store.subscribe(id).is_err());
}

#[test]
fn club_listing_is_newest_first() {
    let store = MemoryStore::new();
    let club = Uuid::new_v4();
    let mut older = sample(club);
    older.created_at -= chrono::Duration::hours(1);
    let older = store.insert(older).unwrap();
    let newer = store.insert(sample(club)).unwrap();
    store.insert(sample(Uuid::new_v4())).unwrap();

    let ids: Vec<Uuid> = store.list_for_club(club).iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);
}

#[tokio::test]
async fn subscribers_receive_full_snapshots() {
    let store = MemoryStore::new();
    let t = store.insert(sample(Uuid::new_v4())).unwrap();
    let mut subscription = store.subscribe(t.id).unwrap();
    assert_eq!(subscription.latest().version, 1);

    let match_id = t.matches[0].id;
    store
        .update(t.id, |t| submit_score(t, match_id, 21, 17))
        .unwrap();

    let snapshot = tokio::time::timeout(Duration::from_secs(1), subscription.changed())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(snapshot.version, 2);
    assert_eq!(snapshot.matches.len(), t.matches.len());
    assert!(snapshot.get_match(match_id).unwrap().completed);
}

#[tokio::test]
async fn deleting_ends_subscriptions() {
    let store = MemoryStore::new();
    let t = store.insert(sample(Uuid::new_v4())).unwrap();
    let mut subscription = store.subscribe(t.id).unwrap();

    store.delete(t.id).unwrap();

    assert!(subscription.changed().await.is_none());
}

#[test]
fn config_defaults_and_overrides() {
    let defaults = ServerConfig::from_lookup(|_| None);
    assert_eq!(defaults, ServerConfig::default());
    assert_eq!(defaults.port, 8080);

    let config = ServerConfig::from_lookup(|key| match key {
        "HOST" => Some("127.0.0.1".to_string()),
        "PORT" => Some("9000".to_string()),
        "WATCH_TIMEOUT_SECS" => Some("not a number".to_string()),
        _ => None,
    });
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 9000);
    assert_eq!(config.watch_timeout, Duration::from_secs(25));
}
