//! Shared handler helpers.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use cofre_core::{EntityKind, Period};
use serde::Serialize;
use time::OffsetDateTime;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /v1/health - Health check.
///
/// This endpoint is intentionally unauthenticated to support load balancer
/// probes and monitoring; it returns only non-sensitive information.
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    state.metadata.health_check().await?;

    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    }))
}

/// Parse an entity-kind path segment, mapping failure to a 400.
pub fn parse_kind(raw: &str) -> ApiResult<EntityKind> {
    EntityKind::parse(raw).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Parse an optional `period` query value, defaulting to the month of `now`.
pub fn parse_period(raw: Option<&str>, now: OffsetDateTime) -> ApiResult<Period> {
    match raw {
        Some(s) => Period::parse(s).map_err(|e| ApiError::BadRequest(e.to_string())),
        None => Ok(Period::containing_utc(now)),
    }
}
