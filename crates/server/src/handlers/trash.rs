//! Trash endpoints: aggregated listing, restore, and policy-checked purge.

use crate::auth::Actor;
use crate::error::ApiResult;
use crate::handlers::common::parse_kind;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use cofre_metadata::models::TrashEntry;
use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug, Serialize)]
pub struct TrashResponse {
    pub items: Vec<TrashEntry>,
}

/// GET /v1/trash - List the actor's soft-deleted records across all kinds.
///
/// Records deleted longer ago than the retention window are omitted; they
/// still exist in storage until the sweep purges them.
pub async fn list_trash(
    State(state): State<AppState>,
    Actor(actor): Actor,
) -> ApiResult<Json<TrashResponse>> {
    let cutoff = state.trash_cutoff(OffsetDateTime::now_utc());
    let items = state.metadata.list_trash(actor.actor_id, cutoff).await?;
    Ok(Json(TrashResponse { items }))
}

/// POST /v1/trash/{kind}/{id}/restore - Move a record back to active.
pub async fn restore_record(
    State(state): State<AppState>,
    Actor(_actor): Actor,
    Path((kind, id)): Path<(String, i64)>,
) -> ApiResult<StatusCode> {
    let kind = parse_kind(&kind)?;

    state.metadata.restore(kind, id).await?;

    if let Some(lifecycle) = state.metadata.get_lifecycle(kind, id).await? {
        state.schedule_dashboard_refresh(lifecycle.owner_id);
    }

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /v1/trash/{kind}/{id} - Permanently erase a deleted record.
///
/// Refused while the retention window has not elapsed; the store enforces
/// the policy, this handler only supplies the eligibility bound.
pub async fn purge_record(
    State(state): State<AppState>,
    Actor(_actor): Actor,
    Path((kind, id)): Path<(String, i64)>,
) -> ApiResult<StatusCode> {
    let kind = parse_kind(&kind)?;
    let eligible_before = state.purge_eligible_before(OffsetDateTime::now_utc());

    state.metadata.purge(kind, id, eligible_before).await?;

    Ok(StatusCode::NO_CONTENT)
}
