//! Route configuration.

use crate::auth::auth_middleware;
use crate::handlers;
use crate::state::AppState;
use axum::Router;
use axum::middleware;
use axum::routing::{delete, get, post, put};
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Health check (intentionally unauthenticated for probes)
        .route("/v1/health", get(handlers::health_check))
        // Record screens
        .route(
            "/v1/expenses",
            post(handlers::create_expense).get(handlers::list_expenses),
        )
        .route(
            "/v1/expenses/{id}",
            get(handlers::get_expense).put(handlers::update_expense),
        )
        .route(
            "/v1/subscriptions",
            post(handlers::create_subscription).get(handlers::list_subscriptions),
        )
        .route(
            "/v1/subscriptions/{id}",
            put(handlers::update_subscription),
        )
        .route(
            "/v1/fixed-bills",
            post(handlers::create_fixed_bill).get(handlers::list_fixed_bills),
        )
        .route(
            "/v1/cards",
            post(handlers::create_card).get(handlers::list_cards),
        )
        .route(
            "/v1/installment-purchases",
            post(handlers::create_installment_purchase).get(handlers::list_installment_purchases),
        )
        .route(
            "/v1/fuel-logs",
            post(handlers::create_fuel_log).get(handlers::list_fuel_logs),
        )
        .route(
            "/v1/goals",
            post(handlers::create_goal).get(handlers::list_goals),
        )
        .route(
            "/v1/investments",
            post(handlers::create_investment).get(handlers::list_investments),
        )
        // Generic soft delete across the registry
        .route(
            "/v1/records/{kind}/{id}",
            delete(handlers::soft_delete_record),
        )
        // Trash
        .route("/v1/trash", get(handlers::list_trash))
        .route(
            "/v1/trash/{kind}/{id}/restore",
            post(handlers::restore_record),
        )
        .route("/v1/trash/{kind}/{id}", delete(handlers::purge_record))
        // Dashboard
        .route("/v1/dashboard", get(handlers::get_dashboard))
        .route("/v1/dashboard/refresh", post(handlers::refresh_dashboard))
        // Admin
        .route("/v1/admin/sweep", post(handlers::trigger_sweep));

    // Auth middleware resolves the actor; TraceLayer wraps everything.
    api_routes
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
