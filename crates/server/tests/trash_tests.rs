//! Integration tests for the aggregated trash view.

mod common;

use cofre_core::EntityKind;
use common::TestMetadata;
use common::fixtures::{
    OWNER, days_ago, minutes_ago, new_expense, new_fuel_log, new_subscription,
};
use time::{Duration, OffsetDateTime};

fn cutoff_30d() -> OffsetDateTime {
    OffsetDateTime::now_utc() - Duration::days(30)
}

#[tokio::test]
async fn most_recent_deletion_lists_first() {
    let metadata = TestMetadata::in_memory().await.expect("create store");
    let store = metadata.store();
    let now = OffsetDateTime::now_utc();

    let a = store
        .create_expense(&new_expense(OWNER, "A", 100), now)
        .await
        .unwrap()
        .id;
    let b = store
        .create_expense(&new_expense(OWNER, "B", 200), now)
        .await
        .unwrap()
        .id;
    let c = store
        .create_expense(&new_expense(OWNER, "C", 300), now)
        .await
        .unwrap()
        .id;

    // A deleted first, B last, C in between.
    store
        .soft_delete(EntityKind::Expense, a, OWNER, minutes_ago(3))
        .await
        .unwrap();
    store
        .soft_delete(EntityKind::Expense, b, OWNER, minutes_ago(1))
        .await
        .unwrap();
    store
        .soft_delete(EntityKind::Expense, c, OWNER, minutes_ago(2))
        .await
        .unwrap();

    let trash = store.list_trash(OWNER, cutoff_30d()).await.unwrap();
    let ids: Vec<i64> = trash.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![b, c, a]);
}

#[tokio::test]
async fn equal_deletion_times_order_by_kind_then_id() {
    let metadata = TestMetadata::in_memory().await.expect("create store");
    let store = metadata.store();
    let now = OffsetDateTime::now_utc();
    let deleted_at = minutes_ago(5);

    let exp1 = store
        .create_expense(&new_expense(OWNER, "first", 100), now)
        .await
        .unwrap()
        .id;
    let exp2 = store
        .create_expense(&new_expense(OWNER, "second", 200), now)
        .await
        .unwrap()
        .id;
    let sub = store
        .create_subscription(&new_subscription(OWNER, "Netflix", 2_990), now)
        .await
        .unwrap()
        .id;

    // Deliberately delete out of order at the same instant.
    store
        .soft_delete(EntityKind::Subscription, sub, OWNER, deleted_at)
        .await
        .unwrap();
    store
        .soft_delete(EntityKind::Expense, exp2, OWNER, deleted_at)
        .await
        .unwrap();
    store
        .soft_delete(EntityKind::Expense, exp1, OWNER, deleted_at)
        .await
        .unwrap();

    let trash = store.list_trash(OWNER, cutoff_30d()).await.unwrap();
    let keys: Vec<(EntityKind, i64)> = trash.iter().map(|e| (e.kind, e.id)).collect();
    assert_eq!(
        keys,
        vec![
            (EntityKind::Expense, exp1),
            (EntityKind::Expense, exp2),
            (EntityKind::Subscription, sub),
        ]
    );
}

#[tokio::test]
async fn label_falls_back_through_description_name_then_id() {
    let metadata = TestMetadata::in_memory().await.expect("create store");
    let store = metadata.store();
    let now = OffsetDateTime::now_utc();

    let expense = store
        .create_expense(&new_expense(OWNER, "Mercado", 15_000), now)
        .await
        .unwrap()
        .id;
    let subscription = store
        .create_subscription(&new_subscription(OWNER, "Netflix", 2_990), now)
        .await
        .unwrap()
        .id;
    // Fuel log fixture has neither description nor name.
    let fuel = store
        .create_fuel_log(&new_fuel_log(OWNER, 18_000), now)
        .await
        .unwrap()
        .id;

    for (kind, id) in [
        (EntityKind::Expense, expense),
        (EntityKind::Subscription, subscription),
        (EntityKind::FuelLog, fuel),
    ] {
        store.soft_delete(kind, id, OWNER, now).await.unwrap();
    }

    let trash = store.list_trash(OWNER, cutoff_30d()).await.unwrap();
    let label_of = |kind: EntityKind| {
        trash
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.label.clone())
            .expect("entry present")
    };

    assert_eq!(label_of(EntityKind::Expense), "Mercado");
    assert_eq!(label_of(EntityKind::Subscription), "Netflix");
    assert_eq!(label_of(EntityKind::FuelLog), format!("Item {fuel}"));
}

#[tokio::test]
async fn entries_past_the_retention_window_are_hidden_but_not_erased() {
    let metadata = TestMetadata::in_memory().await.expect("create store");
    let store = metadata.store();
    let now = OffsetDateTime::now_utc();

    let id = store
        .create_expense(&new_expense(OWNER, "old", 500), now)
        .await
        .unwrap()
        .id;
    store
        .soft_delete(EntityKind::Expense, id, OWNER, days_ago(31))
        .await
        .unwrap();

    let trash = store.list_trash(OWNER, cutoff_30d()).await.unwrap();
    assert!(trash.is_empty(), "expired deletion must not be listed");

    // The row still exists in hard storage until the sweep purges it.
    assert!(store.get_expense(id).await.unwrap().is_some());
}

#[tokio::test]
async fn trash_is_scoped_to_the_owner() {
    let metadata = TestMetadata::in_memory().await.expect("create store");
    let store = metadata.store();
    let now = OffsetDateTime::now_utc();

    let mine = store
        .create_expense(&new_expense(OWNER, "mine", 100), now)
        .await
        .unwrap()
        .id;
    let theirs = store
        .create_expense(&new_expense(2, "theirs", 200), now)
        .await
        .unwrap()
        .id;

    store
        .soft_delete(EntityKind::Expense, mine, OWNER, now)
        .await
        .unwrap();
    store
        .soft_delete(EntityKind::Expense, theirs, 2, now)
        .await
        .unwrap();

    let trash = store.list_trash(OWNER, cutoff_30d()).await.unwrap();
    assert_eq!(trash.len(), 1);
    assert_eq!(trash[0].id, mine);
}

#[tokio::test]
async fn normalized_entries_carry_amount_category_and_notes() {
    let metadata = TestMetadata::in_memory().await.expect("create store");
    let store = metadata.store();
    let now = OffsetDateTime::now_utc();

    let mut fixture = new_expense(OWNER, "Mercado", 15_000);
    fixture.notes = Some("weekly shop".to_string());
    let id = store.create_expense(&fixture, now).await.unwrap().id;
    store
        .soft_delete(EntityKind::Expense, id, OWNER, now)
        .await
        .unwrap();

    let trash = store.list_trash(OWNER, cutoff_30d()).await.unwrap();
    assert_eq!(trash.len(), 1);
    let entry = &trash[0];
    assert_eq!(entry.kind, EntityKind::Expense);
    assert_eq!(entry.label, "Mercado");
    assert_eq!(entry.amount_cents, Some(15_000));
    assert_eq!(entry.category, Some("groceries".to_string()));
    assert_eq!(entry.notes, Some("weekly shop".to_string()));
}

#[tokio::test]
async fn restore_removes_the_entry_from_trash() {
    let metadata = TestMetadata::in_memory().await.expect("create store");
    let store = metadata.store();
    let now = OffsetDateTime::now_utc();

    let id = store
        .create_expense(&new_expense(OWNER, "Mercado", 15_000), now)
        .await
        .unwrap()
        .id;
    store
        .soft_delete(EntityKind::Expense, id, OWNER, now)
        .await
        .unwrap();
    assert_eq!(store.list_trash(OWNER, cutoff_30d()).await.unwrap().len(), 1);

    store.restore(EntityKind::Expense, id).await.unwrap();

    assert!(store.list_trash(OWNER, cutoff_30d()).await.unwrap().is_empty());
    let row = store.get_expense(id).await.unwrap().expect("row exists");
    assert_eq!(row.amount_cents, 15_000);
}
