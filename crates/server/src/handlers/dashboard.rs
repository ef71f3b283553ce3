//! Dashboard snapshot endpoints.

use crate::auth::Actor;
use crate::error::{ApiError, ApiResult};
use crate::handlers::common::parse_period;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Query, State};
use cofre_metadata::models::DashboardSnapshotRow;
use serde::Deserialize;
use time::OffsetDateTime;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Month to read, `YYYY-MM`; defaults to the current month.
    pub period: Option<String>,
}

/// GET /v1/dashboard - Read the cached snapshot for a period.
///
/// Readers may observe a stale snapshot between a mutation and its
/// scheduled refresh; a period that was never refreshed is a 404.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<Json<DashboardSnapshotRow>> {
    let period = parse_period(query.period.as_deref(), OffsetDateTime::now_utc())?;

    let snapshot = state
        .metadata
        .get_dashboard(actor.actor_id, period)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("dashboard for period {period} has not been computed"))
        })?;

    Ok(Json(snapshot))
}

/// POST /v1/dashboard/refresh - Recompute the snapshot synchronously.
pub async fn refresh_dashboard(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<Json<DashboardSnapshotRow>> {
    let now = OffsetDateTime::now_utc();
    let period = parse_period(query.period.as_deref(), now)?;

    let snapshot = state
        .metadata
        .refresh_dashboard(actor.actor_id, period, now)
        .await?;

    Ok(Json(snapshot))
}
