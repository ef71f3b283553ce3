//! Record CRUD endpoints and the generic soft-delete endpoint.
//!
//! Create/list endpoints exist per screen; deletion is a single generic
//! route driven by the entity registry, so every kind shares one code path.

use crate::auth::Actor;
use crate::error::ApiResult;
use crate::handlers::common::parse_kind;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use cofre_metadata::models::{
    CardRow, ExpenseRow, FixedBillRow, FuelLogRow, GoalRow, InstallmentPurchaseRow, InvestmentRow,
    NewCard, NewExpense, NewFixedBill, NewFuelLog, NewGoal, NewInstallmentPurchase, NewInvestment,
    NewSubscription, SubscriptionRow, UpdateExpense, UpdateSubscription,
};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

// =============================================================================
// Expenses
// =============================================================================

/// Request to create an expense. Ownership comes from the authenticated
/// actor, never from the body.
#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    pub description: String,
    pub amount_cents: i64,
    pub category: String,
    pub payment_method: String,
    pub spent_on: Date,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListExpensesResponse {
    pub expenses: Vec<ExpenseRow>,
}

/// POST /v1/expenses
pub async fn create_expense(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Json(req): Json<CreateExpenseRequest>,
) -> ApiResult<(StatusCode, Json<ExpenseRow>)> {
    let new = NewExpense {
        owner_id: actor.actor_id,
        description: req.description,
        amount_cents: req.amount_cents,
        category: req.category,
        payment_method: req.payment_method,
        spent_on: req.spent_on,
        notes: req.notes,
    };

    let row = state
        .metadata
        .create_expense(&new, OffsetDateTime::now_utc())
        .await?;
    state.schedule_dashboard_refresh(actor.actor_id);

    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /v1/expenses
pub async fn list_expenses(
    State(state): State<AppState>,
    Actor(actor): Actor,
) -> ApiResult<Json<ListExpensesResponse>> {
    let expenses = state.metadata.list_expenses(actor.actor_id).await?;
    Ok(Json(ListExpensesResponse { expenses }))
}

/// GET /v1/expenses/{id}
pub async fn get_expense(
    State(state): State<AppState>,
    Actor(_actor): Actor,
    Path(id): Path<i64>,
) -> ApiResult<Json<ExpenseRow>> {
    let row = state
        .metadata
        .get_expense(id)
        .await?
        .ok_or_else(|| crate::error::ApiError::NotFound(format!("expenses id {id} not found")))?;
    Ok(Json(row))
}

/// PUT /v1/expenses/{id}
pub async fn update_expense(
    State(state): State<AppState>,
    Actor(_actor): Actor,
    Path(id): Path<i64>,
    Json(update): Json<UpdateExpense>,
) -> ApiResult<Json<ExpenseRow>> {
    let row = state.metadata.update_expense(id, &update).await?;
    state.schedule_dashboard_refresh(row.owner_id);
    Ok(Json(row))
}

// =============================================================================
// Subscriptions
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateSubscriptionRequest {
    pub name: String,
    pub amount_cents: i64,
    pub category: Option<String>,
    pub billing_day: i64,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListSubscriptionsResponse {
    pub subscriptions: Vec<SubscriptionRow>,
}

/// POST /v1/subscriptions
pub async fn create_subscription(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Json(req): Json<CreateSubscriptionRequest>,
) -> ApiResult<(StatusCode, Json<SubscriptionRow>)> {
    let new = NewSubscription {
        owner_id: actor.actor_id,
        name: req.name,
        amount_cents: req.amount_cents,
        category: req.category,
        billing_day: req.billing_day,
        notes: req.notes,
    };

    let row = state
        .metadata
        .create_subscription(&new, OffsetDateTime::now_utc())
        .await?;
    state.schedule_dashboard_refresh(actor.actor_id);

    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /v1/subscriptions
pub async fn list_subscriptions(
    State(state): State<AppState>,
    Actor(actor): Actor,
) -> ApiResult<Json<ListSubscriptionsResponse>> {
    let subscriptions = state.metadata.list_subscriptions(actor.actor_id).await?;
    Ok(Json(ListSubscriptionsResponse { subscriptions }))
}

/// PUT /v1/subscriptions/{id}
pub async fn update_subscription(
    State(state): State<AppState>,
    Actor(_actor): Actor,
    Path(id): Path<i64>,
    Json(update): Json<UpdateSubscription>,
) -> ApiResult<Json<SubscriptionRow>> {
    let row = state.metadata.update_subscription(id, &update).await?;
    state.schedule_dashboard_refresh(row.owner_id);
    Ok(Json(row))
}

// =============================================================================
// Fixed bills
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateFixedBillRequest {
    pub name: String,
    pub amount_cents: i64,
    pub category: Option<String>,
    pub due_day: i64,
}

#[derive(Debug, Serialize)]
pub struct ListFixedBillsResponse {
    pub fixed_bills: Vec<FixedBillRow>,
}

/// POST /v1/fixed-bills
pub async fn create_fixed_bill(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Json(req): Json<CreateFixedBillRequest>,
) -> ApiResult<(StatusCode, Json<FixedBillRow>)> {
    let new = NewFixedBill {
        owner_id: actor.actor_id,
        name: req.name,
        amount_cents: req.amount_cents,
        category: req.category,
        due_day: req.due_day,
    };

    let row = state
        .metadata
        .create_fixed_bill(&new, OffsetDateTime::now_utc())
        .await?;
    state.schedule_dashboard_refresh(actor.actor_id);

    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /v1/fixed-bills
pub async fn list_fixed_bills(
    State(state): State<AppState>,
    Actor(actor): Actor,
) -> ApiResult<Json<ListFixedBillsResponse>> {
    let fixed_bills = state.metadata.list_fixed_bills(actor.actor_id).await?;
    Ok(Json(ListFixedBillsResponse { fixed_bills }))
}

// =============================================================================
// Cards
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateCardRequest {
    pub name: String,
    pub limit_cents: i64,
    pub closing_day: i64,
    pub due_day: i64,
}

#[derive(Debug, Serialize)]
pub struct ListCardsResponse {
    pub cards: Vec<CardRow>,
}

/// POST /v1/cards
pub async fn create_card(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Json(req): Json<CreateCardRequest>,
) -> ApiResult<(StatusCode, Json<CardRow>)> {
    let new = NewCard {
        owner_id: actor.actor_id,
        name: req.name,
        limit_cents: req.limit_cents,
        closing_day: req.closing_day,
        due_day: req.due_day,
    };

    let row = state
        .metadata
        .create_card(&new, OffsetDateTime::now_utc())
        .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /v1/cards
pub async fn list_cards(
    State(state): State<AppState>,
    Actor(actor): Actor,
) -> ApiResult<Json<ListCardsResponse>> {
    let cards = state.metadata.list_cards(actor.actor_id).await?;
    Ok(Json(ListCardsResponse { cards }))
}

// =============================================================================
// Installment purchases
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateInstallmentPurchaseRequest {
    pub description: String,
    pub total_cents: i64,
    pub installment_count: i64,
    pub installment_cents: i64,
    pub category: Option<String>,
    pub first_due_on: Date,
}

#[derive(Debug, Serialize)]
pub struct ListInstallmentPurchasesResponse {
    pub installment_purchases: Vec<InstallmentPurchaseRow>,
}

/// POST /v1/installment-purchases
pub async fn create_installment_purchase(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Json(req): Json<CreateInstallmentPurchaseRequest>,
) -> ApiResult<(StatusCode, Json<InstallmentPurchaseRow>)> {
    let new = NewInstallmentPurchase {
        owner_id: actor.actor_id,
        description: req.description,
        total_cents: req.total_cents,
        installment_count: req.installment_count,
        installment_cents: req.installment_cents,
        category: req.category,
        first_due_on: req.first_due_on,
    };

    let row = state
        .metadata
        .create_installment_purchase(&new, OffsetDateTime::now_utc())
        .await?;
    state.schedule_dashboard_refresh(actor.actor_id);

    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /v1/installment-purchases
pub async fn list_installment_purchases(
    State(state): State<AppState>,
    Actor(actor): Actor,
) -> ApiResult<Json<ListInstallmentPurchasesResponse>> {
    let installment_purchases = state
        .metadata
        .list_installment_purchases(actor.actor_id)
        .await?;
    Ok(Json(ListInstallmentPurchasesResponse {
        installment_purchases,
    }))
}

// =============================================================================
// Fuel logs
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateFuelLogRequest {
    pub description: Option<String>,
    pub amount_cents: i64,
    pub liters_milli: i64,
    pub filled_on: Date,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListFuelLogsResponse {
    pub fuel_logs: Vec<FuelLogRow>,
}

/// POST /v1/fuel-logs
pub async fn create_fuel_log(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Json(req): Json<CreateFuelLogRequest>,
) -> ApiResult<(StatusCode, Json<FuelLogRow>)> {
    let new = NewFuelLog {
        owner_id: actor.actor_id,
        description: req.description,
        amount_cents: req.amount_cents,
        liters_milli: req.liters_milli,
        filled_on: req.filled_on,
        notes: req.notes,
    };

    let row = state
        .metadata
        .create_fuel_log(&new, OffsetDateTime::now_utc())
        .await?;
    state.schedule_dashboard_refresh(actor.actor_id);

    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /v1/fuel-logs
pub async fn list_fuel_logs(
    State(state): State<AppState>,
    Actor(actor): Actor,
) -> ApiResult<Json<ListFuelLogsResponse>> {
    let fuel_logs = state.metadata.list_fuel_logs(actor.actor_id).await?;
    Ok(Json(ListFuelLogsResponse { fuel_logs }))
}

// =============================================================================
// Goals
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateGoalRequest {
    pub name: String,
    pub target_cents: i64,
    pub saved_cents: i64,
    pub due_on: Option<Date>,
}

#[derive(Debug, Serialize)]
pub struct ListGoalsResponse {
    pub goals: Vec<GoalRow>,
}

/// POST /v1/goals
pub async fn create_goal(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Json(req): Json<CreateGoalRequest>,
) -> ApiResult<(StatusCode, Json<GoalRow>)> {
    let new = NewGoal {
        owner_id: actor.actor_id,
        name: req.name,
        target_cents: req.target_cents,
        saved_cents: req.saved_cents,
        due_on: req.due_on,
    };

    let row = state
        .metadata
        .create_goal(&new, OffsetDateTime::now_utc())
        .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /v1/goals
pub async fn list_goals(
    State(state): State<AppState>,
    Actor(actor): Actor,
) -> ApiResult<Json<ListGoalsResponse>> {
    let goals = state.metadata.list_goals(actor.actor_id).await?;
    Ok(Json(ListGoalsResponse { goals }))
}

// =============================================================================
// Investments
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateInvestmentRequest {
    pub name: String,
    pub amount_cents: i64,
    pub category: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListInvestmentsResponse {
    pub investments: Vec<InvestmentRow>,
}

/// POST /v1/investments
pub async fn create_investment(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Json(req): Json<CreateInvestmentRequest>,
) -> ApiResult<(StatusCode, Json<InvestmentRow>)> {
    let new = NewInvestment {
        owner_id: actor.actor_id,
        name: req.name,
        amount_cents: req.amount_cents,
        category: req.category,
        notes: req.notes,
    };

    let row = state
        .metadata
        .create_investment(&new, OffsetDateTime::now_utc())
        .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /v1/investments
pub async fn list_investments(
    State(state): State<AppState>,
    Actor(actor): Actor,
) -> ApiResult<Json<ListInvestmentsResponse>> {
    let investments = state.metadata.list_investments(actor.actor_id).await?;
    Ok(Json(ListInvestmentsResponse { investments }))
}

// =============================================================================
// Generic soft delete
// =============================================================================

/// DELETE /v1/records/{kind}/{id} - Soft-delete any registered record.
///
/// The record moves to the trash; its dashboard contribution disappears on
/// the next refresh, which is scheduled here after the delete commits.
pub async fn soft_delete_record(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path((kind, id)): Path<(String, i64)>,
) -> ApiResult<StatusCode> {
    let kind = parse_kind(&kind)?;

    state
        .metadata
        .soft_delete(kind, id, actor.actor_id, OffsetDateTime::now_utc())
        .await?;

    // Refresh targets the record's owner, which may differ from the deleting
    // family member.
    if let Some(lifecycle) = state.metadata.get_lifecycle(kind, id).await? {
        state.schedule_dashboard_refresh(lifecycle.owner_id);
    }

    Ok(StatusCode::NO_CONTENT)
}
