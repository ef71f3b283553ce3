//! Dashboard aggregation repository trait.

use crate::error::MetadataResult;
use crate::models::DashboardSnapshotRow;
use async_trait::async_trait;
use cofre_core::Period;
use time::OffsetDateTime;

/// Repository for the cached per-month dashboard aggregate.
///
/// The snapshot is recomputed only by an explicit refresh; readers may see a
/// stale row until the next refresh lands (bounded staleness by contract).
#[async_trait]
pub trait DashboardRepo: Send + Sync {
    /// Recompute all buckets over the owner's non-deleted records for the
    /// period and upsert the snapshot row.
    async fn refresh_dashboard(
        &self,
        owner_id: i64,
        period: Period,
        refreshed_at: OffsetDateTime,
    ) -> MetadataResult<DashboardSnapshotRow>;

    /// Read the cached snapshot; `None` when the period was never refreshed.
    async fn get_dashboard(
        &self,
        owner_id: i64,
        period: Period,
    ) -> MetadataResult<Option<DashboardSnapshotRow>>;
}
