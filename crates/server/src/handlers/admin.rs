//! Administrative endpoints.

use crate::auth::Actor;
use crate::error::ApiResult;
use crate::state::AppState;
use crate::sweep::{SweepStats, run_retention_sweep};
use axum::Json;
use axum::extract::State;
use time::OffsetDateTime;

/// POST /v1/admin/sweep - Run the retention sweep now.
///
/// The same policy-checked bulk purge the background scheduler runs; useful
/// for deployments that disable the scheduler and drive purging externally.
pub async fn trigger_sweep(
    State(state): State<AppState>,
    Actor(_actor): Actor,
) -> ApiResult<Json<SweepStats>> {
    let stats = run_retention_sweep(
        &state.metadata,
        &state.config.retention,
        OffsetDateTime::now_utc(),
    )
    .await;

    Ok(Json(stats))
}
