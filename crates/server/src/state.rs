//! Application state shared across handlers.

use cofre_core::Period;
use cofre_core::config::AppConfig;
use cofre_metadata::MetadataStore;
use std::sync::Arc;
use time::OffsetDateTime;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Record store.
    pub metadata: Arc<dyn MetadataStore>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Panics
    ///
    /// Panics if configuration validation fails.
    pub fn new(config: AppConfig, metadata: Arc<dyn MetadataStore>) -> Self {
        if let Err(error) = config.validate() {
            panic!("Invalid configuration: {error}");
        }

        Self {
            config: Arc::new(config),
            metadata,
        }
    }

    /// The trash cutoff for a listing issued at `now`: deletions older than
    /// the retention window are no longer shown (they await the sweep).
    pub fn trash_cutoff(&self, now: OffsetDateTime) -> OffsetDateTime {
        now - self.config.retention.window()
    }

    /// The purge eligibility bound at `now`: only records deleted at or
    /// before this instant may be erased.
    pub fn purge_eligible_before(&self, now: OffsetDateTime) -> OffsetDateTime {
        now - self.config.retention.window()
    }

    /// Schedule a fire-and-forget dashboard refresh for the owner's current
    /// period. The mutation that triggered it has already committed; refresh
    /// completion is not awaited and failures are only logged, since the
    /// next mutation retries.
    pub fn schedule_dashboard_refresh(&self, owner_id: i64) {
        let metadata = self.metadata.clone();
        tokio::spawn(async move {
            let now = OffsetDateTime::now_utc();
            let period = Period::containing_utc(now);
            if let Err(error) = metadata.refresh_dashboard(owner_id, period, now).await {
                tracing::warn!(owner_id, %period, %error, "dashboard refresh failed");
            }
        });
    }
}
