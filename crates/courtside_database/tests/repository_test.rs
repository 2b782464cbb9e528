//! Repository integration tests against a live PostgreSQL database.
//!
//! These tests require `DATABASE_URL` to point at a database with the
//! `player_profiles` and `audit_log` tables, so they are ignored by default:
//!
//! ```text
//! cargo test -p courtside_database -- --ignored
//! ```

use courtside_core::{
    Archetype, AuditAction, AuditEntry, BASE_STAT, Profile, STAT_MAX, Stat,
};
use courtside_database::{ProfileRepository, establish_connection};

fn setup() -> ProfileRepository {
    dotenvy::dotenv().ok();
    let conn = establish_connection().expect("DATABASE_URL must be set");
    ProfileRepository::new(conn)
}

fn sample(player_id: i64) -> Profile {
    let now = chrono::Utc::now().naive_utc();
    Profile::create(player_id, "Test Player", Archetype::Pivot, BASE_STAT, STAT_MAX, now)
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn profile_upsert_and_load_roundtrip() {
    let repo = setup();
    let player_id = 900_001;
    let mut profile = sample(player_id);

    repo.store_profile(&profile).await.unwrap();
    let loaded = repo.get_profile(player_id).await.unwrap().unwrap();
    assert_eq!(loaded, profile);

    // Upsert path: mutate and store again under the same key.
    profile.available_points = 80;
    profile.stats.set(Stat::Speed, 600);
    repo.store_profile(&profile).await.unwrap();
    let reloaded = repo.get_profile(player_id).await.unwrap().unwrap();
    assert_eq!(reloaded.available_points, 80);
    assert_eq!(reloaded.stats.get(Stat::Speed), 600);

    assert!(repo.delete_profile(player_id).await.unwrap());
    assert!(repo.get_profile(player_id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn delete_missing_profile_reports_false() {
    let repo = setup();
    assert!(!repo.delete_profile(899_999).await.unwrap());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn audit_appends_are_ordered() {
    let repo = setup();
    let player_id = 900_002;
    let now = chrono::Utc::now().naive_utc();

    for (i, action) in [AuditAction::ProfileCreated, AuditAction::StatAdded]
        .iter()
        .enumerate()
    {
        repo.append_audit(&AuditEntry {
            player_id,
            action: *action,
            details: format!("entry {i}"),
            actor_id: None,
            timestamp: now,
        })
        .await
        .unwrap();
    }

    let entries = repo.list_audit(player_id).await.unwrap();
    assert!(entries.len() >= 2);
    let tail: Vec<_> = entries.iter().rev().take(2).rev().collect();
    assert_eq!(tail[0].action, "PROFILE_CREATED");
    assert_eq!(tail[1].action, "STAT_ADDED");
}
