mod common;

use std::sync::atomic::Ordering;

use bkl_core::csv::export_csv;
use bkl_core::roster::{RegistrationRoster, GIFT_LIMIT};
use bkl_core::Status;

use common::MemoryStore;

#[tokio::test]
async fn gift_eligibility_covers_the_first_hundred_of_the_full_set() {
    let store = MemoryStore::new();
    store.seed(151);

    let mut roster = RegistrationRoster::new(store.clone());
    roster.load().await.expect("load");
    assert_eq!(roster.records().len(), 151);

    let keys: Vec<String> = roster.records().iter().map(|r| r.id.clone()).collect();
    for (rank, key) in keys.iter().enumerate() {
        assert_eq!(roster.gift_rank(key), Some(rank));
        assert_eq!(
            roster.is_gift_eligible(key),
            rank < GIFT_LIMIT,
            "rank {rank}"
        );
    }

    // Rank is defined against the full set, not a filtered view.
    let oldest_mobile = roster.records()[150].mobile.clone();
    let filtered = roster.filter(&oldest_mobile);
    assert_eq!(filtered.len(), 1);
    assert!(!roster.is_gift_eligible(&filtered[0].id));
}

#[tokio::test]
async fn filtering_matches_any_field_case_insensitively() {
    let store = MemoryStore::new();
    store.seed(5);

    let mut roster = RegistrationRoster::new(store.clone());
    roster.load().await.expect("load");

    assert_eq!(roster.filter("PARTICIPANT 3").len(), 1);
    assert_eq!(roster.filter("ward 2,").len(), 1);

    let by_mobile = roster.filter("9800000004");
    assert_eq!(by_mobile.len(), 1);
    assert_eq!(by_mobile[0].name, "Participant 4");

    let regnum = roster.records()[0].registration_number.to_lowercase();
    assert!(!roster.filter(&regnum).is_empty());

    // A term matching nothing empties the visible set but not the full set.
    assert!(roster.filter("no such participant").is_empty());
    assert_eq!(roster.records().len(), 5);

    // The empty term shows everything.
    assert_eq!(roster.filter("  ").len(), 5);
}

#[tokio::test]
async fn failed_load_keeps_the_previous_visible_set() {
    let store = MemoryStore::new();
    store.seed(3);

    let mut roster = RegistrationRoster::new(store.clone());
    roster.load().await.expect("load");
    assert_eq!(roster.records().len(), 3);

    store.seed(1);
    store.fail_lists.store(true, Ordering::SeqCst);
    roster.load().await.expect_err("list rejected");
    assert_eq!(roster.records().len(), 3);

    store.fail_lists.store(false, Ordering::SeqCst);
    roster.load().await.expect("load");
    assert_eq!(roster.records().len(), 4);
}

#[tokio::test]
async fn status_updates_are_immediate_and_idempotent() {
    let store = MemoryStore::new();
    store.seed(2);

    let mut roster = RegistrationRoster::new(store.clone());
    roster.load().await.expect("load");
    let key = roster.records()[0].id.clone();

    roster
        .set_status(&key, Status::Confirmed)
        .await
        .expect("update");
    assert_eq!(roster.records()[0].status, Status::Confirmed);

    // Re-applying the same status is a no-op change.
    roster
        .set_status(&key, Status::Confirmed)
        .await
        .expect("update");
    assert_eq!(roster.records()[0].status, Status::Confirmed);

    // A failed update leaves both the store and the local copy unchanged.
    store.fail_updates.store(true, Ordering::SeqCst);
    roster
        .set_status(&key, Status::Cancelled)
        .await
        .expect_err("update rejected");
    assert_eq!(roster.records()[0].status, Status::Confirmed);
    assert_eq!(store.snapshot()[0].status, Status::Confirmed);
}

#[tokio::test]
async fn delete_removes_the_record_everywhere() {
    let store = MemoryStore::new();
    store.seed(3);

    let mut roster = RegistrationRoster::new(store.clone());
    roster.load().await.expect("load");
    let victim = roster.records()[1].clone();

    roster.delete(&victim.id).await.expect("delete");
    assert_eq!(roster.records().len(), 2);
    assert!(roster.filter(&victim.name).is_empty());
    assert_eq!(roster.gift_rank(&victim.id), None);

    // A fresh load does not resurrect it.
    let mut fresh = RegistrationRoster::new(store.clone());
    fresh.load().await.expect("load");
    assert!(fresh.records().iter().all(|r| r.id != victim.id));

    // A failed delete leaves the sets unchanged.
    let survivor = roster.records()[0].id.clone();
    store.fail_removes.store(true, Ordering::SeqCst);
    roster.delete(&survivor).await.expect_err("remove rejected");
    assert_eq!(roster.records().len(), 2);
}

#[tokio::test]
async fn export_serializes_the_filtered_set_only() {
    let store = MemoryStore::new();
    store.seed(5);

    let mut roster = RegistrationRoster::new(store.clone());
    roster.load().await.expect("load");

    let visible = roster.filter("Participant 2");
    let csv = export_csv(visible.into_iter());
    let lines: Vec<&str> = csv.split('\n').collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains("\"Participant 2\""));
}
