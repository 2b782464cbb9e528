//! Ledger behavior tests over an in-memory gateway.

use async_trait::async_trait;
use courtside_core::{
    Archetype, AuditAction, AuditEntry, AuditSink, Customization, LedgerConfig, Profile,
    ProfileGateway, ProfileLedger, Stat,
};
use courtside_error::{LedgerError, LedgerErrorKind, LedgerResult};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

/// In-memory test double for the persistence and audit seams.
#[derive(Default)]
struct MemoryGateway {
    profiles: Mutex<HashMap<i64, Profile>>,
    audits: Mutex<Vec<AuditEntry>>,
    fail_audit: AtomicBool,
}

impl MemoryGateway {
    async fn audit_entries(&self) -> Vec<AuditEntry> {
        self.audits.lock().await.clone()
    }
}

#[async_trait]
impl ProfileGateway for MemoryGateway {
    async fn load(&self, player_id: i64) -> LedgerResult<Option<Profile>> {
        Ok(self.profiles.lock().await.get(&player_id).cloned())
    }

    async fn save(&self, profile: &Profile) -> LedgerResult<()> {
        self.profiles
            .lock()
            .await
            .insert(profile.player_id, profile.clone());
        Ok(())
    }

    async fn delete(&self, player_id: i64) -> LedgerResult<bool> {
        Ok(self.profiles.lock().await.remove(&player_id).is_some())
    }

    async fn list_all(&self) -> LedgerResult<Vec<Profile>> {
        Ok(self.profiles.lock().await.values().cloned().collect())
    }
}

#[async_trait]
impl AuditSink for MemoryGateway {
    async fn append(&self, entry: &AuditEntry) -> LedgerResult<()> {
        if self.fail_audit.load(Ordering::SeqCst) {
            return Err(LedgerError::new(LedgerErrorKind::Persistence(
                "audit table unavailable".into(),
            )));
        }
        self.audits.lock().await.push(entry.clone());
        Ok(())
    }
}

fn ledger() -> (ProfileLedger<MemoryGateway>, Arc<MemoryGateway>) {
    let gateway = Arc::new(MemoryGateway::default());
    (
        ProfileLedger::new(gateway.clone(), LedgerConfig::default()),
        gateway,
    )
}

#[tokio::test]
async fn create_applies_pivot_bonuses_to_base_stats() {
    let (ledger, _) = ledger();
    let profile = ledger.create(1, "Dunkan", Archetype::Pivot, 0).await.unwrap();

    assert_eq!(profile.stats.get(Stat::Strength), 520);
    assert_eq!(profile.stats.get(Stat::Vertical), 515);
    assert_eq!(profile.stats.get(Stat::Defense), 510);
    assert_eq!(profile.stats.get(Stat::Endurance), 505);
    assert_eq!(profile.stats.get(Stat::Speed), 485);
    assert_eq!(profile.stats.get(Stat::Agility), 490);
    assert_eq!(profile.stats.get(Stat::Accuracy), 495);
    assert_eq!(profile.stats.get(Stat::BallHandling), 500);
    assert_eq!(profile.total_stats(), 4020);
    assert_eq!(profile.available_points, 0);
}

#[tokio::test]
async fn create_is_not_idempotent() {
    let (ledger, _) = ledger();
    let first = ledger
        .create(7, "Original", Archetype::Meneur, 50)
        .await
        .unwrap();

    let second = ledger.create(7, "Impostor", Archetype::Pivot, 0).await;
    assert!(matches!(
        second.unwrap_err().kind,
        LedgerErrorKind::AlreadyExists { player_id: 7 }
    ));

    // The first profile is untouched.
    let stored = ledger.get(7).await.unwrap();
    assert_eq!(stored, first);
}

#[tokio::test]
async fn create_records_audit_with_archetype() {
    let (ledger, gateway) = ledger();
    ledger.create(3, "Sniper", Archetype::Arriere, 0).await.unwrap();

    let audits = gateway.audit_entries().await;
    assert_eq!(audits.len(), 1);
    assert_eq!(audits[0].action, AuditAction::ProfileCreated);
    assert_eq!(audits[0].player_id, 3);
    assert!(audits[0].details.contains("Arrière"));
    assert_eq!(audits[0].actor_id, None);
}

#[tokio::test]
async fn create_rejects_negative_starting_points() {
    let (ledger, _) = ledger();
    let result = ledger.create(9, "Broke", Archetype::Ailier, -5).await;
    assert!(matches!(
        result.unwrap_err().kind,
        LedgerErrorKind::InvalidAmount(-5)
    ));
}

#[tokio::test]
async fn allocation_conserves_points() {
    let (ledger, _) = ledger();
    ledger
        .create(10, "Grinder", Archetype::Generaliste, 100)
        .await
        .unwrap();
    let before = ledger.get(10).await.unwrap();

    let outcome = ledger.allocate(10, "Vitesse", 30).await.unwrap();
    assert_eq!(outcome.new_value - outcome.old_value, 30);
    assert_eq!(outcome.remaining_points, 70);

    let after = ledger.get(10).await.unwrap();
    assert_eq!(after.total_stats() - before.total_stats(), 30);
    assert_eq!(before.available_points - after.available_points, 30);
}

#[tokio::test]
async fn allocation_sequence_raises_total_by_exactly_spent_points() {
    let (ledger, _) = ledger();
    ledger
        .create(11, "Sequence", Archetype::Pivot, 90)
        .await
        .unwrap();
    let before = ledger.get(11).await.unwrap().total_stats();

    ledger.allocate(11, "FOR", 40).await.unwrap();
    ledger.allocate(11, "Endurance", 25).await.unwrap();
    ledger.allocate(11, "ball", 25).await.unwrap();

    let after = ledger.get(11).await.unwrap();
    assert_eq!(after.total_stats() - before, 90);
    assert_eq!(after.available_points, 0);
}

#[tokio::test]
async fn allocation_holds_for_full_legal_range() {
    for points in 1..=100 {
        let (ledger, _) = ledger();
        ledger
            .create(12, "Sweep", Archetype::Generaliste, 100)
            .await
            .unwrap();
        let outcome = ledger.allocate(12, "Défense", points).await.unwrap();
        assert_eq!(outcome.old_value, 500);
        assert_eq!(outcome.new_value, 500 + points);
        assert_eq!(outcome.remaining_points, 100 - points);
    }
}

#[tokio::test]
async fn allocate_rejects_unknown_stat() {
    let (ledger, _) = ledger();
    ledger
        .create(13, "Typo", Archetype::Generaliste, 10)
        .await
        .unwrap();
    let result = ledger.allocate(13, "Charisme", 5).await;
    assert!(matches!(
        result.unwrap_err().kind,
        LedgerErrorKind::InvalidStat(_)
    ));
}

#[tokio::test]
async fn allocate_rejects_non_positive_amounts() {
    let (ledger, _) = ledger();
    ledger
        .create(14, "Zero", Archetype::Generaliste, 10)
        .await
        .unwrap();

    for points in [0, -3] {
        let result = ledger.allocate(14, "Vitesse", points).await;
        assert!(matches!(
            result.unwrap_err().kind,
            LedgerErrorKind::InvalidAmount(_)
        ));
    }
}

#[tokio::test]
async fn allocate_rejects_batch_over_limit() {
    let (ledger, _) = ledger();
    ledger
        .create(15, "Whale", Archetype::Generaliste, 500)
        .await
        .unwrap();
    let result = ledger.allocate(15, "Vitesse", 101).await;
    assert!(matches!(
        result.unwrap_err().kind,
        LedgerErrorKind::ExceedsBatchLimit { points: 101, limit: 100 }
    ));
}

#[tokio::test]
async fn allocate_rejects_insufficient_points_regardless_of_headroom() {
    let (ledger, _) = ledger();
    ledger
        .create(16, "Poor", Archetype::Generaliste, 10)
        .await
        .unwrap();
    let result = ledger.allocate(16, "Vitesse", 11).await;
    assert!(matches!(
        result.unwrap_err().kind,
        LedgerErrorKind::InsufficientPoints {
            requested: 11,
            available: 10
        }
    ));
}

#[tokio::test]
async fn ceiling_reports_max_addable_then_exact_fill_succeeds() {
    let (ledger, _) = ledger();
    ledger
        .create(17, "Capped", Archetype::Generaliste, 50)
        .await
        .unwrap();
    ledger.override_stat(17, "Vitesse", 995, 99).await.unwrap();

    let result = ledger.allocate(17, "Vitesse", 10).await;
    match result.unwrap_err().kind {
        LedgerErrorKind::StatCeilingExceeded {
            current,
            max_addable,
            ..
        } => {
            assert_eq!(current, 995);
            assert_eq!(max_addable, 5);
        }
        other => panic!("expected StatCeilingExceeded, got {other:?}"),
    }

    let outcome = ledger.allocate(17, "Vitesse", 5).await.unwrap();
    assert_eq!(outcome.new_value, 1000);
    assert_eq!(outcome.remaining_points, 45);
}

#[tokio::test]
async fn grant_points_credits_balance_and_audits_actor() {
    let (ledger, gateway) = ledger();
    ledger
        .create(18, "Lucky", Archetype::Generaliste, 0)
        .await
        .unwrap();

    let profile = ledger.grant_points(18, 100, 777).await.unwrap();
    assert_eq!(profile.available_points, 100);

    let audits = gateway.audit_entries().await;
    let grant = audits
        .iter()
        .find(|e| e.action == AuditAction::PointsGiven)
        .unwrap();
    assert_eq!(grant.actor_id, Some(777));
}

#[tokio::test]
async fn grant_points_rejects_non_positive_amounts() {
    let (ledger, _) = ledger();
    ledger
        .create(19, "Unlucky", Archetype::Generaliste, 0)
        .await
        .unwrap();
    assert!(ledger.grant_points(19, 0, 777).await.is_err());
    assert!(ledger.grant_points(19, -10, 777).await.is_err());
}

#[tokio::test]
async fn override_stat_bypasses_point_economy() {
    let (ledger, _) = ledger();
    ledger
        .create(20, "Subject", Archetype::Generaliste, 40)
        .await
        .unwrap();

    let change = ledger.override_stat(20, "Précision", 900, 777).await.unwrap();
    assert_eq!(change.old_value, 500);
    assert_eq!(change.new_value, 900);

    let profile = ledger.get(20).await.unwrap();
    assert_eq!(profile.available_points, 40);
}

#[tokio::test]
async fn override_stat_rejects_out_of_range_values() {
    let (ledger, _) = ledger();
    ledger
        .create(21, "Subject", Archetype::Generaliste, 0)
        .await
        .unwrap();

    for value in [-1, 1001] {
        let result = ledger.override_stat(21, "Vitesse", value, 777).await;
        assert!(matches!(
            result.unwrap_err().kind,
            LedgerErrorKind::OutOfRange { .. }
        ));
    }
}

#[tokio::test]
async fn override_physical_requires_a_positive_field() {
    let (ledger, _) = ledger();
    ledger
        .create(22, "Body", Archetype::Generaliste, 0)
        .await
        .unwrap();

    for (h, w) in [(None, None), (Some(0), None), (Some(-3), Some(0))] {
        let result = ledger.override_physical(22, h, w, 777).await;
        assert!(matches!(
            result.unwrap_err().kind,
            LedgerErrorKind::NoChangeRequested
        ));
    }

    let profile = ledger
        .override_physical(22, Some(201), None, 777)
        .await
        .unwrap();
    assert_eq!(profile.height_cm, 201);
    assert_eq!(profile.weight_kg, 0);
}

#[tokio::test]
async fn customize_updates_fields_and_rejects_negative_age() {
    let (ledger, _) = ledger();
    ledger
        .create(23, "Persona", Archetype::Generaliste, 0)
        .await
        .unwrap();

    ledger
        .customize(23, Customization::CharacterName("Le Phénix".into()))
        .await
        .unwrap();
    let profile = ledger
        .customize(23, Customization::Age(24))
        .await
        .unwrap();
    assert_eq!(profile.character_name, "Le Phénix");
    assert_eq!(profile.age, 24);

    let result = ledger.customize(23, Customization::Age(-1)).await;
    assert!(matches!(
        result.unwrap_err().kind,
        LedgerErrorKind::OutOfRange { .. }
    ));
}

#[tokio::test]
async fn set_color_falls_back_to_default_for_unknown_names() {
    let (ledger, _) = ledger();
    ledger
        .create(24, "Painter", Archetype::Generaliste, 0)
        .await
        .unwrap();

    let profile = ledger.set_color(24, "violet").await.unwrap();
    assert_eq!(profile.embed_color, 0x8A2BE2);

    let profile = ledger.set_color(24, "plaid").await.unwrap();
    assert_eq!(profile.embed_color, 0xFF6B35);
}

#[tokio::test]
async fn reset_restores_base_plus_bonuses_regardless_of_allocations() {
    let (ledger, _) = ledger();
    ledger.create(25, "Veteran", Archetype::Pivot, 100).await.unwrap();
    ledger.allocate(25, "Endurance", 60).await.unwrap();
    ledger.allocate(25, "FOR", 40).await.unwrap();

    let profile = ledger.reset(25, 777).await.unwrap();

    let bonus_sum: i64 = Archetype::Pivot.bonuses().iter().map(|(_, b)| *b).sum();
    assert_eq!(profile.total_stats(), 8 * 500 + bonus_sum);
    assert_eq!(profile.available_points, 0);
    assert_eq!(profile.archetype, Archetype::Pivot);
}

#[tokio::test]
async fn delete_reports_not_found_for_missing_profile() {
    let (ledger, _) = ledger();
    let result = ledger.delete(404, 777).await;
    assert!(matches!(
        result.unwrap_err().kind,
        LedgerErrorKind::NotFound { player_id: 404 }
    ));
}

#[tokio::test]
async fn delete_removes_profile_permanently() {
    let (ledger, gateway) = ledger();
    ledger
        .create(26, "Gone", Archetype::Generaliste, 0)
        .await
        .unwrap();

    ledger.delete(26, 777).await.unwrap();
    assert!(ledger.get(26).await.is_err());

    let audits = gateway.audit_entries().await;
    assert!(audits.iter().any(|e| e.action == AuditAction::ProfileDeleted));
}

#[tokio::test]
async fn audit_failure_does_not_roll_back_mutation() {
    let (ledger, gateway) = ledger();
    ledger
        .create(27, "Unlogged", Archetype::Generaliste, 50)
        .await
        .unwrap();

    gateway.fail_audit.store(true, Ordering::SeqCst);
    let outcome = ledger.allocate(27, "Vitesse", 10).await.unwrap();
    assert_eq!(outcome.new_value, 510);

    let profile = ledger.get(27).await.unwrap();
    assert_eq!(profile.stats.get(Stat::Speed), 510);
    assert_eq!(profile.available_points, 40);
}

#[tokio::test]
async fn concurrent_allocations_never_lose_updates() {
    let gateway = Arc::new(MemoryGateway::default());
    let ledger = Arc::new(ProfileLedger::new(gateway, LedgerConfig::default()));
    ledger
        .create(28, "Racer", Archetype::Generaliste, 80)
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let ledger = ledger.clone();
        handles.push(tokio::spawn(async move {
            ledger.allocate(28, "Vitesse", 10).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let profile = ledger.get(28).await.unwrap();
    assert_eq!(profile.stats.get(Stat::Speed), 580);
    assert_eq!(profile.available_points, 0);
}
