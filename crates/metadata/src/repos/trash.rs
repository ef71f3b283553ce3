//! Trash aggregation repository trait.

use crate::error::MetadataResult;
use crate::models::TrashEntry;
use async_trait::async_trait;
use time::OffsetDateTime;

/// Repository for the aggregated trash view.
#[async_trait]
pub trait TrashRepo: Send + Sync {
    /// Collect an owner's soft-deleted records across every registered kind,
    /// restricted to deletions at or after `cutoff`, normalized and sorted
    /// by deletion time descending (ties: kind, then id ascending).
    async fn list_trash(
        &self,
        owner_id: i64,
        cutoff: OffsetDateTime,
    ) -> MetadataResult<Vec<TrashEntry>>;
}
