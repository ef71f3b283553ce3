//! Integration tests for the retention sweep.

mod common;

use cofre_core::EntityKind;
use cofre_core::config::RetentionConfig;
use cofre_server::run_retention_sweep;
use common::TestMetadata;
use common::fixtures::{OWNER, create_kind_record, days_ago};
use time::OffsetDateTime;

#[tokio::test]
async fn sweep_purges_expired_records_across_kinds() {
    let metadata = TestMetadata::in_memory().await.expect("create store");
    let store = metadata.store();

    let expired_expense = create_kind_record(&store, EntityKind::Expense, OWNER).await;
    let expired_subscription = create_kind_record(&store, EntityKind::Subscription, OWNER).await;
    let recent_goal = create_kind_record(&store, EntityKind::Goal, OWNER).await;
    let active_card = create_kind_record(&store, EntityKind::Card, OWNER).await;

    store
        .soft_delete(EntityKind::Expense, expired_expense, OWNER, days_ago(31))
        .await
        .unwrap();
    store
        .soft_delete(
            EntityKind::Subscription,
            expired_subscription,
            OWNER,
            days_ago(40),
        )
        .await
        .unwrap();
    store
        .soft_delete(EntityKind::Goal, recent_goal, OWNER, days_ago(2))
        .await
        .unwrap();

    let stats = run_retention_sweep(
        &store,
        &RetentionConfig::default(),
        OffsetDateTime::now_utc(),
    )
    .await;

    assert_eq!(stats.records_purged, 2);
    assert_eq!(stats.errors, 0);

    assert!(store.get_expense(expired_expense).await.unwrap().is_none());
    assert!(
        store
            .get_subscription(expired_subscription)
            .await
            .unwrap()
            .is_none()
    );
    assert!(store.get_goal(recent_goal).await.unwrap().is_some());
    assert!(store.get_card(active_card).await.unwrap().is_some());
}

#[tokio::test]
async fn sweep_is_a_no_op_when_nothing_expired() {
    let metadata = TestMetadata::in_memory().await.expect("create store");
    let store = metadata.store();

    let recent = create_kind_record(&store, EntityKind::Loan, OWNER).await;
    store
        .soft_delete(EntityKind::Loan, recent, OWNER, days_ago(1))
        .await
        .unwrap();

    let stats = run_retention_sweep(
        &store,
        &RetentionConfig::default(),
        OffsetDateTime::now_utc(),
    )
    .await;

    assert_eq!(stats.records_purged, 0);
    assert_eq!(stats.errors, 0);
    assert!(store.get_loan(recent).await.unwrap().is_some());
}

#[tokio::test]
async fn sweep_respects_the_configured_window() {
    let metadata = TestMetadata::in_memory().await.expect("create store");
    let store = metadata.store();

    let id = create_kind_record(&store, EntityKind::Budget, OWNER).await;
    store
        .soft_delete(EntityKind::Budget, id, OWNER, days_ago(8))
        .await
        .unwrap();

    // A 7-day window treats an 8-day-old deletion as expired.
    let retention = RetentionConfig {
        days: 7,
        ..Default::default()
    };
    let stats = run_retention_sweep(&store, &retention, OffsetDateTime::now_utc()).await;

    assert_eq!(stats.records_purged, 1);
    assert!(store.get_budget(id).await.unwrap().is_none());
}

#[tokio::test]
async fn sweep_batch_limit_spreads_work_across_runs() {
    let metadata = TestMetadata::in_memory().await.expect("create store");
    let store = metadata.store();

    for _ in 0..5 {
        let id = create_kind_record(&store, EntityKind::Investment, OWNER).await;
        store
            .soft_delete(EntityKind::Investment, id, OWNER, days_ago(90))
            .await
            .unwrap();
    }

    let retention = RetentionConfig {
        sweep_batch_limit: 2,
        ..Default::default()
    };

    let first = run_retention_sweep(&store, &retention, OffsetDateTime::now_utc()).await;
    assert_eq!(first.records_purged, 2);

    let second = run_retention_sweep(&store, &retention, OffsetDateTime::now_utc()).await;
    assert_eq!(second.records_purged, 2);

    let third = run_retention_sweep(&store, &retention, OffsetDateTime::now_utc()).await;
    assert_eq!(third.records_purged, 1);
}
