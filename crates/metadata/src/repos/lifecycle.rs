//! Soft-delete lifecycle repository trait.
//!
//! State machine per record:
//! `Active --soft_delete--> Deleted --restore--> Active`;
//! `Deleted --purge (after retention)--> Gone` (terminal).

use crate::error::MetadataResult;
use crate::models::LifecycleState;
use async_trait::async_trait;
use cofre_core::EntityKind;
use time::OffsetDateTime;

/// Repository for lifecycle transitions, uniform across entity kinds.
#[async_trait]
pub trait LifecycleRepo: Send + Sync {
    /// Mark a record deleted.
    ///
    /// Errors with `NotFound` when the record does not exist and
    /// `AlreadyDeleted` when it is already in the deleted state; domain
    /// fields are never touched.
    async fn soft_delete(
        &self,
        kind: EntityKind,
        id: i64,
        actor_id: i64,
        deleted_at: OffsetDateTime,
    ) -> MetadataResult<()>;

    /// Clear the deletion marker.
    ///
    /// Errors with `NotFound` when the record does not exist and
    /// `NotDeleted` when it is active.
    async fn restore(&self, kind: EntityKind, id: i64) -> MetadataResult<()>;

    /// Permanently erase a deleted record.
    ///
    /// Only records with `deleted_at <= eligible_before` qualify; purging an
    /// active or too-recently-deleted record is a `PolicyViolation`.
    async fn purge(
        &self,
        kind: EntityKind,
        id: i64,
        eligible_before: OffsetDateTime,
    ) -> MetadataResult<()>;

    /// Bulk-purge up to `limit` retention-expired records of one kind.
    /// Returns the number of rows erased.
    async fn sweep_purge(
        &self,
        kind: EntityKind,
        eligible_before: OffsetDateTime,
        limit: u32,
    ) -> MetadataResult<u64>;

    /// Read a record's lifecycle columns.
    async fn get_lifecycle(
        &self,
        kind: EntityKind,
        id: i64,
    ) -> MetadataResult<Option<LifecycleState>>;
}
