//! Database models mapping to the record schema.
//!
//! Every entity table carries the uniform lifecycle columns (`deleted`,
//! `deleted_at`, `deleted_by`) alongside its domain fields. Lifecycle fields
//! are mutated only by the lifecycle repository; create/update operations
//! never touch them. Monetary values are integer cents.

use cofre_core::EntityKind;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, OffsetDateTime};

// =============================================================================
// Expenses
// =============================================================================

/// One-off expense record.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct ExpenseRow {
    pub id: i64,
    pub owner_id: i64,
    pub description: String,
    pub amount_cents: i64,
    pub category: String,
    pub payment_method: String,
    pub spent_on: Date,
    pub notes: Option<String>,
    pub created_at: OffsetDateTime,
    pub deleted: bool,
    pub deleted_at: Option<OffsetDateTime>,
    pub deleted_by: Option<i64>,
}

/// Insert shape for expenses.
#[derive(Debug, Clone, Deserialize)]
pub struct NewExpense {
    pub owner_id: i64,
    pub description: String,
    pub amount_cents: i64,
    pub category: String,
    pub payment_method: String,
    pub spent_on: Date,
    pub notes: Option<String>,
}

/// Partial update for expenses; `None` fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateExpense {
    pub description: Option<String>,
    pub amount_cents: Option<i64>,
    pub category: Option<String>,
    pub payment_method: Option<String>,
    pub spent_on: Option<Date>,
    pub notes: Option<String>,
}

// =============================================================================
// Subscriptions
// =============================================================================

/// Recurring subscription record.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct SubscriptionRow {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub amount_cents: i64,
    pub category: Option<String>,
    /// Day of month the subscription bills (1-31).
    pub billing_day: i64,
    pub notes: Option<String>,
    pub created_at: OffsetDateTime,
    pub deleted: bool,
    pub deleted_at: Option<OffsetDateTime>,
    pub deleted_by: Option<i64>,
}

/// Insert shape for subscriptions.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSubscription {
    pub owner_id: i64,
    pub name: String,
    pub amount_cents: i64,
    pub category: Option<String>,
    pub billing_day: i64,
    pub notes: Option<String>,
}

/// Partial update for subscriptions; `None` fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSubscription {
    pub name: Option<String>,
    pub amount_cents: Option<i64>,
    pub category: Option<String>,
    pub billing_day: Option<i64>,
    pub notes: Option<String>,
}

// =============================================================================
// Remaining record types (uniform create/get/list)
// =============================================================================

/// Monthly fixed bill (rent, utilities).
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct FixedBillRow {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub amount_cents: i64,
    pub category: Option<String>,
    pub due_day: i64,
    pub created_at: OffsetDateTime,
    pub deleted: bool,
    pub deleted_at: Option<OffsetDateTime>,
    pub deleted_by: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewFixedBill {
    pub owner_id: i64,
    pub name: String,
    pub amount_cents: i64,
    pub category: Option<String>,
    pub due_day: i64,
}

/// Credit card record.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct CardRow {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub limit_cents: i64,
    pub closing_day: i64,
    pub due_day: i64,
    pub created_at: OffsetDateTime,
    pub deleted: bool,
    pub deleted_at: Option<OffsetDateTime>,
    pub deleted_by: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCard {
    pub owner_id: i64,
    pub name: String,
    pub limit_cents: i64,
    pub closing_day: i64,
    pub due_day: i64,
}

/// Purchase paid in monthly installments.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct InstallmentPurchaseRow {
    pub id: i64,
    pub owner_id: i64,
    pub description: String,
    pub total_cents: i64,
    pub installment_count: i64,
    pub installment_cents: i64,
    pub category: Option<String>,
    pub first_due_on: Date,
    pub created_at: OffsetDateTime,
    pub deleted: bool,
    pub deleted_at: Option<OffsetDateTime>,
    pub deleted_by: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewInstallmentPurchase {
    pub owner_id: i64,
    pub description: String,
    pub total_cents: i64,
    pub installment_count: i64,
    pub installment_cents: i64,
    pub category: Option<String>,
    pub first_due_on: Date,
}

/// Fuel fill-up record. Liters are thousandths to avoid floats.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct FuelLogRow {
    pub id: i64,
    pub owner_id: i64,
    pub description: Option<String>,
    pub amount_cents: i64,
    pub liters_milli: i64,
    pub filled_on: Date,
    pub notes: Option<String>,
    pub created_at: OffsetDateTime,
    pub deleted: bool,
    pub deleted_at: Option<OffsetDateTime>,
    pub deleted_by: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewFuelLog {
    pub owner_id: i64,
    pub description: Option<String>,
    pub amount_cents: i64,
    pub liters_milli: i64,
    pub filled_on: Date,
    pub notes: Option<String>,
}

/// Savings goal.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct GoalRow {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub target_cents: i64,
    pub saved_cents: i64,
    pub due_on: Option<Date>,
    pub created_at: OffsetDateTime,
    pub deleted: bool,
    pub deleted_at: Option<OffsetDateTime>,
    pub deleted_by: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewGoal {
    pub owner_id: i64,
    pub name: String,
    pub target_cents: i64,
    pub saved_cents: i64,
    pub due_on: Option<Date>,
}

/// Investment position.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct InvestmentRow {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub amount_cents: i64,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub created_at: OffsetDateTime,
    pub deleted: bool,
    pub deleted_at: Option<OffsetDateTime>,
    pub deleted_by: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewInvestment {
    pub owner_id: i64,
    pub name: String,
    pub amount_cents: i64,
    pub category: Option<String>,
    pub notes: Option<String>,
}

/// Money owed to a creditor.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct DebtRow {
    pub id: i64,
    pub owner_id: i64,
    pub description: String,
    pub amount_cents: i64,
    pub creditor: String,
    pub created_at: OffsetDateTime,
    pub deleted: bool,
    pub deleted_at: Option<OffsetDateTime>,
    pub deleted_by: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewDebt {
    pub owner_id: i64,
    pub description: String,
    pub amount_cents: i64,
    pub creditor: String,
}

/// Money lent out.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct LoanRow {
    pub id: i64,
    pub owner_id: i64,
    pub description: String,
    pub amount_cents: i64,
    pub counterparty: String,
    pub created_at: OffsetDateTime,
    pub deleted: bool,
    pub deleted_at: Option<OffsetDateTime>,
    pub deleted_by: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewLoan {
    pub owner_id: i64,
    pub description: String,
    pub amount_cents: i64,
    pub counterparty: String,
}

/// Category budget for one month.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct BudgetRow {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub category: String,
    pub limit_cents: i64,
    /// Month the budget applies to, `YYYY-MM`.
    pub period: String,
    pub created_at: OffsetDateTime,
    pub deleted: bool,
    pub deleted_at: Option<OffsetDateTime>,
    pub deleted_by: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewBudget {
    pub owner_id: i64,
    pub name: String,
    pub category: String,
    pub limit_cents: i64,
    pub period: String,
}

/// Owned asset (vehicle, property).
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct AssetRow {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub value_cents: i64,
    pub category: Option<String>,
    pub created_at: OffsetDateTime,
    pub deleted: bool,
    pub deleted_at: Option<OffsetDateTime>,
    pub deleted_by: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAsset {
    pub owner_id: i64,
    pub name: String,
    pub value_cents: i64,
    pub category: Option<String>,
}

// =============================================================================
// Lifecycle
// =============================================================================

/// Lifecycle columns of one record, independent of its kind.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct LifecycleState {
    pub owner_id: i64,
    pub deleted: bool,
    pub deleted_at: Option<OffsetDateTime>,
    pub deleted_by: Option<i64>,
}

// =============================================================================
// Trash
// =============================================================================

/// Normalized projection of one soft-deleted record.
///
/// Derived on each trash query and never persisted; `label` falls back
/// through description, then name, then `Item {id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrashEntry {
    pub kind: EntityKind,
    pub id: i64,
    pub label: String,
    pub deleted_at: OffsetDateTime,
    pub amount_cents: Option<i64>,
    pub category: Option<String>,
    pub notes: Option<String>,
}

impl TrashEntry {
    /// Build the display label from the normalized optional fields.
    pub fn label_for(id: i64, description: Option<String>, name: Option<String>) -> String {
        description
            .or(name)
            .unwrap_or_else(|| format!("Item {id}"))
    }
}

// =============================================================================
// Dashboard snapshot
// =============================================================================

/// Cached per-month aggregate over an owner's non-deleted records.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct DashboardSnapshotRow {
    pub owner_id: i64,
    /// Month the snapshot covers, `YYYY-MM`.
    pub period: String,
    pub expenses_cents: i64,
    pub installments_cents: i64,
    pub fuel_cents: i64,
    pub subscriptions_cents: i64,
    pub fixed_bills_cents: i64,
    pub loans_cents: i64,
    /// Sum of all outflow buckets.
    pub total_cents: i64,
    pub refreshed_at: OffsetDateTime,
}
