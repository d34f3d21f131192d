use chrono::{DateTime, Duration, Utc};
use lazyledger_core::SnapshotStorage;
use lazyledger_domain::{
    BillingCycle, Category, LedgerSnapshot, Subscription, Transaction, TransactionKind, Trip,
};
use lazyledger_storage_json::JsonSnapshotStorage;
use tempfile::tempdir;

fn saved_at() -> DateTime<Utc> {
    "2025-08-07T12:00:00Z".parse().unwrap()
}

fn sample_snapshot() -> LedgerSnapshot {
    let now = saved_at();
    let mut trip = Trip::new(
        "Tokyo",
        now.date_naive(),
        now.date_naive() + Duration::days(7),
    );
    trip.is_active = true;

    let mut lunch = Transaction::new(
        "Lunch",
        120.0,
        TransactionKind::Expense,
        Category::Food,
        now,
    );
    lunch.trip_id = Some(trip.id);
    let mut trashed = Transaction::new(
        "Impulse buy",
        999.0,
        TransactionKind::Expense,
        Category::Shopping,
        now - Duration::hours(3),
    );
    trashed.mark_deleted(now - Duration::hours(1));
    let mut recurring = Transaction::new(
        "Streaming",
        390.0,
        TransactionKind::Expense,
        Category::Entertainment,
        now,
    );
    recurring.is_recurring = true;

    let subscription = Subscription::new(
        "Streaming",
        390.0,
        BillingCycle::Monthly,
        now.date_naive(),
        Category::Entertainment,
    );

    LedgerSnapshot::new(
        vec![lunch, trashed, recurring],
        vec![subscription],
        Some(trip),
        now,
    )
}

#[test]
fn snapshot_round_trips_losslessly() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonSnapshotStorage::new(dir.path().join("snapshots")).expect("create storage");

    let snapshot = sample_snapshot();
    storage.save_snapshot("personal", &snapshot).expect("save");
    let loaded = storage.load_snapshot("personal").expect("load");

    // Every field survives, soft-delete markers and trip tags included.
    assert_eq!(loaded, snapshot);
}

#[test]
fn names_are_sanitized_into_file_stems() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonSnapshotStorage::new(dir.path().to_path_buf()).expect("create storage");

    storage
        .save_snapshot("My Ledger (2025)!", &sample_snapshot())
        .expect("save");
    let path = storage.snapshot_path("My Ledger (2025)!");
    assert!(path.exists());
    assert_eq!(
        path.file_name().and_then(|name| name.to_str()),
        Some("my_ledger__2025__.json")
    );
    assert_eq!(storage.list_snapshots().expect("list"), vec![
        "my_ledger__2025__".to_string()
    ]);
}

#[test]
fn list_returns_sorted_stems_and_ignores_foreign_files() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonSnapshotStorage::new(dir.path().to_path_buf()).expect("create storage");

    storage.save_snapshot("zeta", &sample_snapshot()).expect("save");
    storage.save_snapshot("alpha", &sample_snapshot()).expect("save");
    std::fs::write(dir.path().join("notes.txt"), "not a snapshot").expect("write foreign file");

    assert_eq!(
        storage.list_snapshots().expect("list"),
        vec!["alpha".to_string(), "zeta".to_string()]
    );
}

#[test]
fn saving_twice_overwrites_in_place() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonSnapshotStorage::new(dir.path().to_path_buf()).expect("create storage");

    let mut snapshot = sample_snapshot();
    storage.save_snapshot("personal", &snapshot).expect("save");
    snapshot.transactions.clear();
    storage.save_snapshot("personal", &snapshot).expect("save again");

    let loaded = storage.load_snapshot("personal").expect("load");
    assert!(loaded.transactions.is_empty());
    assert_eq!(storage.list_snapshots().expect("list").len(), 1);
}

#[test]
fn missing_snapshots_and_redundant_deletes_are_explicit() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonSnapshotStorage::new(dir.path().to_path_buf()).expect("create storage");

    let err = storage.load_snapshot("nowhere").expect_err("must be missing");
    assert!(matches!(
        err,
        lazyledger_core::CoreError::SnapshotNotFound(_)
    ));

    storage.delete_snapshot("nowhere").expect("delete is a no-op");
    storage.save_snapshot("here", &sample_snapshot()).expect("save");
    storage.delete_snapshot("here").expect("delete");
    assert!(storage.list_snapshots().expect("list").is_empty());
}
