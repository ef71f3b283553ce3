//! Retention sweep: bulk purge of records whose deletion age exceeds the
//! retention window.
//!
//! The sweep runs on a background interval inside the server and on demand
//! via the admin endpoint. Either path goes through the same policy-checked
//! store operations, so the retention window cannot be bypassed.

use crate::state::AppState;
use cofre_core::EntityKind;
use cofre_core::config::RetentionConfig;
use cofre_metadata::MetadataStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::task::JoinHandle;

/// Statistics from one retention sweep run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SweepStats {
    /// Records permanently erased across all kinds.
    pub records_purged: u64,
    /// Kinds whose purge failed this run.
    pub errors: u64,
}

/// Purge retention-expired records across every registered kind.
///
/// A failure on one kind is counted and logged but does not stop the sweep;
/// the remaining kinds still run.
pub async fn run_retention_sweep(
    metadata: &Arc<dyn MetadataStore>,
    retention: &RetentionConfig,
    now: OffsetDateTime,
) -> SweepStats {
    let eligible_before = now - retention.window();
    let mut stats = SweepStats::default();

    for kind in EntityKind::ALL {
        match metadata
            .sweep_purge(kind, eligible_before, retention.sweep_batch_limit)
            .await
        {
            Ok(purged) => {
                if purged > 0 {
                    tracing::info!(kind = %kind, purged, "retention sweep purged records");
                }
                stats.records_purged += purged;
            }
            Err(error) => {
                tracing::error!(kind = %kind, %error, "retention sweep failed for kind");
                stats.errors += 1;
            }
        }
    }

    stats
}

/// Spawn the background sweep scheduler.
/// Returns the task's JoinHandle (caller should keep it to prevent early
/// termination). The first run fires immediately on startup.
pub fn spawn_sweep_scheduler(state: AppState) -> JoinHandle<()> {
    let interval_secs = state.config.retention.sweep_interval_secs;

    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(std::time::Duration::from_secs(interval_secs));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            let stats = run_retention_sweep(
                &state.metadata,
                &state.config.retention,
                OffsetDateTime::now_utc(),
            )
            .await;
            tracing::debug!(
                purged = stats.records_purged,
                errors = stats.errors,
                "scheduled retention sweep finished"
            );
        }
    })
}
