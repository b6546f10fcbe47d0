//! # Cross-Crate Flows
//!
//! Records move from a JSON snapshot into the store, through the engine and
//! the commission lifecycle, and back out to disk.

use unitrack_commission::{CommissionConfig, CommissionEngine, EngineError};
use unitrack_core::{Application, Partner, PartnerTier, Student};
use unitrack_state::{CommissionLifecycleError, CommissionStatus, CommissionTransitionEvidence};
use unitrack_store::{InMemoryStore, RecordStore, Snapshot};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn enrolled(id: &str, tuition: f64) -> Application {
    Application::new(id, "s1", "p1", "u", "Law", tuition, "enrollment_completed")
}

fn engine_with(store: InMemoryStore) -> CommissionEngine<InMemoryStore> {
    CommissionEngine::new(CommissionConfig::default(), store)
}

// =========================================================================
// Minting
// =========================================================================

#[test]
fn create_fails_for_unknown_partner() {
    let engine = engine_with(InMemoryStore::new());
    let app = Application::new("a1", "s1", "ghost", "u", "Law", 1000.0, "enrollment_completed");
    let err = engine.create_commission_from_application(&app, None).unwrap_err();
    assert!(matches!(err, EngineError::PartnerNotFound { .. }));
    assert!(err.to_string().contains("ghost"));
}

#[test]
fn create_succeeds_without_student_record() {
    let store = InMemoryStore::new();
    store.save_partner(Partner::new("p1", "Alpha").with_tier(PartnerTier::Silver));
    let engine = engine_with(store);
    let app = Application::new("a1", "nobody", "p1", "u", "Law", 1000.0, "enrollment_completed");
    let c = engine.create_commission_from_application(&app, None).unwrap();
    assert!(close(c.commission_rate, 0.125));
    assert_eq!(c.status, CommissionStatus::Pending);
}

#[test]
fn student_nationality_feeds_country_bonus() {
    let store = InMemoryStore::new();
    store.save_partner(Partner::new("p1", "Alpha"));
    store.save_student(Student::new("s1", "Amina").with_nationality("SOMALIA"));
    let engine = engine_with(store);
    let app = Application::new("a1", "s1", "p1", "u", "Law", 10000.0, "enrollment_completed");
    let c = engine.create_commission_from_application(&app, None).unwrap();
    assert!(close(c.commission_rate, 0.115));
}

// =========================================================================
// Snapshot → engine → lifecycle → snapshot
// =========================================================================

#[test]
fn snapshot_round_trip_through_engine_and_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.json");

    let raw = serde_json::json!({
        "partners": [{ "id": "p1", "name": "Alpha", "tier": "gold" }],
        "students": [{ "id": "s1", "name": "Omar", "nationality": "Yemen" }],
        "applications": [{
            "id": "a1",
            "studentId": "s1",
            "partnerId": "p1",
            "universityId": "some_college",
            "programName": "Engineering",
            "tuitionFee": 40000,
            "currency": "MYR",
            "status": "enrollment_completed"
        }]
    });
    std::fs::write(&path, serde_json::to_vec_pretty(&raw).unwrap()).unwrap();

    let engine = engine_with(Snapshot::load(&path).unwrap().into_store());
    let minted = engine.record_enrollment(&"a1".into(), None).unwrap();
    // gold 0.15 + yemen 0.02 = 0.17; gross 6800; fee 136; net 6664
    assert!(close(minted.commission_amount, 6664.0));
    assert_eq!(minted.currency, "MYR");

    engine
        .store()
        .try_update_commission(&minted.id, |c| {
            c.verify_enrollment()?;
            c.confirm_attendance()?;
            c.approve(CommissionTransitionEvidence::new("verified").by("finance"))
        })
        .unwrap()
        .unwrap();
    Snapshot::from_store(engine.store()).save(&path).unwrap();

    let reloaded = Snapshot::load(&path).unwrap();
    assert_eq!(reloaded.commissions.len(), 1);
    let c = &reloaded.commissions[0];
    assert_eq!(c.id, minted.id);
    assert_eq!(c.status, CommissionStatus::Approved);
    assert!(c.enrollment_verified && c.student_attendance_confirmed);
    assert!(c.approved_at.is_some());
    assert_eq!(c.transitions[0].actor.as_deref(), Some("finance"));

    let summary = engine_with(reloaded.into_store()).summarize_partner_commissions(&"p1".into());
    assert_eq!(summary.approved.count, 1);
    assert!(close(summary.total_earned, 6664.0));
}

#[test]
fn second_enrollment_for_same_application_is_rejected() {
    let store = InMemoryStore::new();
    store.save_partner(Partner::new("p1", "Alpha"));
    store.save_application(enrolled("a1", 1000.0));
    let engine = engine_with(store);
    engine.record_enrollment(&"a1".into(), None).unwrap();
    assert!(matches!(
        engine.record_enrollment(&"a1".into(), None),
        Err(EngineError::CommissionAlreadyExists { .. })
    ));
}

// =========================================================================
// Lifecycle through the store
// =========================================================================

#[test]
fn paid_commission_is_frozen_in_store() {
    let store = InMemoryStore::new();
    store.save_partner(Partner::new("p1", "Alpha"));
    store.save_application(enrolled("a1", 1000.0));
    let engine = engine_with(store.clone());
    let id = engine.record_enrollment(&"a1".into(), None).unwrap().id;

    store
        .try_update_commission(&id, |c| {
            c.approve(CommissionTransitionEvidence::new("ok"))?;
            c.mark_paid(CommissionTransitionEvidence::new("wired"))
        })
        .unwrap()
        .unwrap();

    let err = store
        .try_update_commission(&id, |c| c.add_bonus(10.0))
        .unwrap()
        .unwrap_err();
    assert!(matches!(err, CommissionLifecycleError::TerminalState { .. }));

    let c = store.find_commission(&id).unwrap();
    assert_eq!(c.status, CommissionStatus::Paid);
    assert_eq!(c.bonus_commission, 0.0);
    assert!(c.paid_at.is_some());
}

#[test]
fn disputed_commission_excluded_from_earned_total() {
    let store = InMemoryStore::new();
    store.save_partner(Partner::new("p1", "Alpha"));
    for id in ["a1", "a2"] {
        store.save_application(enrolled(id, 10000.0));
    }
    let engine = engine_with(store.clone());
    let first = engine.record_enrollment(&"a1".into(), None).unwrap().id;
    let second = engine.record_enrollment(&"a2".into(), None).unwrap().id;

    store
        .try_update_commission(&first, |c| c.approve(CommissionTransitionEvidence::new("ok")))
        .unwrap()
        .unwrap();
    store
        .try_update_commission(&second, |c| {
            c.dispute(CommissionTransitionEvidence::new("withdrawn"))
        })
        .unwrap()
        .unwrap();

    let s = engine.summarize_partner_commissions(&"p1".into());
    assert_eq!(s.approved.count, 1);
    assert_eq!(s.disputed.count, 1);
    // bronze 0.10: gross 1000, net 980
    assert!(close(s.total_earned, 980.0));
    assert_eq!(s.total_count(), 2);
}

// =========================================================================
// Tier updates persist
// =========================================================================

#[test]
fn tier_update_survives_snapshot() {
    let store = InMemoryStore::new();
    store.save_partner(Partner::new("p1", "Alpha").with_tier(PartnerTier::Bronze));
    for i in 0..10 {
        store.save_application(Application::new(
            format!("a{i}"),
            "s1",
            "p1",
            "u",
            "Law",
            1.0,
            "commission_pending",
        ));
    }
    let engine = engine_with(store);
    let changes = engine.update_partner_tiers();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].current, PartnerTier::Silver);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.json");
    Snapshot::from_store(engine.store()).save(&path).unwrap();
    let partner = &Snapshot::load(&path).unwrap().partners[0];
    assert_eq!(partner.tier, Some(PartnerTier::Silver));
}
