//! Record store trait and SQLite implementation.

use crate::error::{MetadataError, MetadataResult};
use crate::repos::{
    DashboardRepo, ExpenseRepo, LifecycleRepo, RecordRepo, SubscriptionRepo, TrashRepo,
};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Combined record store trait.
#[async_trait]
pub trait MetadataStore:
    ExpenseRepo
    + SubscriptionRepo
    + RecordRepo
    + LifecycleRepo
    + TrashRepo
    + DashboardRepo
    + Send
    + Sync
{
    /// Run database migrations.
    async fn migrate(&self) -> MetadataResult<()>;

    /// Check database connectivity and health.
    async fn health_check(&self) -> MetadataResult<()>;
}

/// SQLite-based record store.
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    /// Create a new SQLite store and bootstrap the schema.
    pub async fn new(path: impl AsRef<Path>) -> MetadataResult<Self> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}?mode=rwc", path.display()))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .foreign_keys(true)
            // Prevent transient "database is locked" errors under concurrent access.
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            // SQLite permits limited write concurrency; a single connection avoids
            // persistent "database is locked" failures under test/axum concurrency.
            .max_connections(1)
            .connect_with(opts)
            .await?;

        let store = Self { pool };
        store.migrate().await?;

        Ok(store)
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

#[async_trait]
impl MetadataStore for SqliteStore {
    async fn migrate(&self) -> MetadataResult<()> {
        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    async fn health_check(&self) -> MetadataResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

// Implement all the repository traits for SqliteStore
mod sqlite_impl {
    use super::*;
    use crate::models::*;
    use cofre_core::{EntityKind, Period};
    use time::{Date, OffsetDateTime};

    #[async_trait]
    impl ExpenseRepo for SqliteStore {
        async fn create_expense(
            &self,
            new: &NewExpense,
            created_at: OffsetDateTime,
        ) -> MetadataResult<ExpenseRow> {
            let row = sqlx::query_as::<_, ExpenseRow>(
                r#"
                INSERT INTO expenses (
                    owner_id, description, amount_cents, category, payment_method,
                    spent_on, notes, created_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                RETURNING *
                "#,
            )
            .bind(new.owner_id)
            .bind(&new.description)
            .bind(new.amount_cents)
            .bind(&new.category)
            .bind(&new.payment_method)
            .bind(new.spent_on)
            .bind(&new.notes)
            .bind(created_at)
            .fetch_one(&self.pool)
            .await?;
            Ok(row)
        }

        async fn get_expense(&self, id: i64) -> MetadataResult<Option<ExpenseRow>> {
            let row = sqlx::query_as::<_, ExpenseRow>("SELECT * FROM expenses WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(row)
        }

        async fn list_expenses(&self, owner_id: i64) -> MetadataResult<Vec<ExpenseRow>> {
            let rows = sqlx::query_as::<_, ExpenseRow>(
                "SELECT * FROM expenses WHERE owner_id = ? AND deleted = 0 ORDER BY spent_on DESC, id DESC",
            )
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn update_expense(
            &self,
            id: i64,
            update: &UpdateExpense,
        ) -> MetadataResult<ExpenseRow> {
            // COALESCE keeps the stored value wherever the update is None.
            let row = sqlx::query_as::<_, ExpenseRow>(
                r#"
                UPDATE expenses SET
                    description = COALESCE(?, description),
                    amount_cents = COALESCE(?, amount_cents),
                    category = COALESCE(?, category),
                    payment_method = COALESCE(?, payment_method),
                    spent_on = COALESCE(?, spent_on),
                    notes = COALESCE(?, notes)
                WHERE id = ? AND deleted = 0
                RETURNING *
                "#,
            )
            .bind(&update.description)
            .bind(update.amount_cents)
            .bind(&update.category)
            .bind(&update.payment_method)
            .bind(update.spent_on)
            .bind(&update.notes)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

            row.ok_or_else(|| {
                MetadataError::NotFound(format!("expenses id {id} not found or deleted"))
            })
        }
    }

    #[async_trait]
    impl SubscriptionRepo for SqliteStore {
        async fn create_subscription(
            &self,
            new: &NewSubscription,
            created_at: OffsetDateTime,
        ) -> MetadataResult<SubscriptionRow> {
            let row = sqlx::query_as::<_, SubscriptionRow>(
                r#"
                INSERT INTO subscriptions (
                    owner_id, name, amount_cents, category, billing_day, notes, created_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?)
                RETURNING *
                "#,
            )
            .bind(new.owner_id)
            .bind(&new.name)
            .bind(new.amount_cents)
            .bind(&new.category)
            .bind(new.billing_day)
            .bind(&new.notes)
            .bind(created_at)
            .fetch_one(&self.pool)
            .await?;
            Ok(row)
        }

        async fn get_subscription(&self, id: i64) -> MetadataResult<Option<SubscriptionRow>> {
            let row =
                sqlx::query_as::<_, SubscriptionRow>("SELECT * FROM subscriptions WHERE id = ?")
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?;
            Ok(row)
        }

        async fn list_subscriptions(&self, owner_id: i64) -> MetadataResult<Vec<SubscriptionRow>> {
            let rows = sqlx::query_as::<_, SubscriptionRow>(
                "SELECT * FROM subscriptions WHERE owner_id = ? AND deleted = 0 ORDER BY name, id",
            )
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn update_subscription(
            &self,
            id: i64,
            update: &UpdateSubscription,
        ) -> MetadataResult<SubscriptionRow> {
            let row = sqlx::query_as::<_, SubscriptionRow>(
                r#"
                UPDATE subscriptions SET
                    name = COALESCE(?, name),
                    amount_cents = COALESCE(?, amount_cents),
                    category = COALESCE(?, category),
                    billing_day = COALESCE(?, billing_day),
                    notes = COALESCE(?, notes)
                WHERE id = ? AND deleted = 0
                RETURNING *
                "#,
            )
            .bind(&update.name)
            .bind(update.amount_cents)
            .bind(&update.category)
            .bind(update.billing_day)
            .bind(&update.notes)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

            row.ok_or_else(|| {
                MetadataError::NotFound(format!("subscriptions id {id} not found or deleted"))
            })
        }
    }

    #[async_trait]
    impl RecordRepo for SqliteStore {
        async fn create_fixed_bill(
            &self,
            new: &NewFixedBill,
            created_at: OffsetDateTime,
        ) -> MetadataResult<FixedBillRow> {
            let row = sqlx::query_as::<_, FixedBillRow>(
                r#"
                INSERT INTO fixed_bills (owner_id, name, amount_cents, category, due_day, created_at)
                VALUES (?, ?, ?, ?, ?, ?)
                RETURNING *
                "#,
            )
            .bind(new.owner_id)
            .bind(&new.name)
            .bind(new.amount_cents)
            .bind(&new.category)
            .bind(new.due_day)
            .bind(created_at)
            .fetch_one(&self.pool)
            .await?;
            Ok(row)
        }

        async fn get_fixed_bill(&self, id: i64) -> MetadataResult<Option<FixedBillRow>> {
            let row = sqlx::query_as::<_, FixedBillRow>("SELECT * FROM fixed_bills WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(row)
        }

        async fn list_fixed_bills(&self, owner_id: i64) -> MetadataResult<Vec<FixedBillRow>> {
            let rows = sqlx::query_as::<_, FixedBillRow>(
                "SELECT * FROM fixed_bills WHERE owner_id = ? AND deleted = 0 ORDER BY due_day, id",
            )
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn create_card(
            &self,
            new: &NewCard,
            created_at: OffsetDateTime,
        ) -> MetadataResult<CardRow> {
            let row = sqlx::query_as::<_, CardRow>(
                r#"
                INSERT INTO cards (owner_id, name, limit_cents, closing_day, due_day, created_at)
                VALUES (?, ?, ?, ?, ?, ?)
                RETURNING *
                "#,
            )
            .bind(new.owner_id)
            .bind(&new.name)
            .bind(new.limit_cents)
            .bind(new.closing_day)
            .bind(new.due_day)
            .bind(created_at)
            .fetch_one(&self.pool)
            .await?;
            Ok(row)
        }

        async fn get_card(&self, id: i64) -> MetadataResult<Option<CardRow>> {
            let row = sqlx::query_as::<_, CardRow>("SELECT * FROM cards WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(row)
        }

        async fn list_cards(&self, owner_id: i64) -> MetadataResult<Vec<CardRow>> {
            let rows = sqlx::query_as::<_, CardRow>(
                "SELECT * FROM cards WHERE owner_id = ? AND deleted = 0 ORDER BY name, id",
            )
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn create_installment_purchase(
            &self,
            new: &NewInstallmentPurchase,
            created_at: OffsetDateTime,
        ) -> MetadataResult<InstallmentPurchaseRow> {
            let row = sqlx::query_as::<_, InstallmentPurchaseRow>(
                r#"
                INSERT INTO installment_purchases (
                    owner_id, description, total_cents, installment_count,
                    installment_cents, category, first_due_on, created_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                RETURNING *
                "#,
            )
            .bind(new.owner_id)
            .bind(&new.description)
            .bind(new.total_cents)
            .bind(new.installment_count)
            .bind(new.installment_cents)
            .bind(&new.category)
            .bind(new.first_due_on)
            .bind(created_at)
            .fetch_one(&self.pool)
            .await?;
            Ok(row)
        }

        async fn get_installment_purchase(
            &self,
            id: i64,
        ) -> MetadataResult<Option<InstallmentPurchaseRow>> {
            let row = sqlx::query_as::<_, InstallmentPurchaseRow>(
                "SELECT * FROM installment_purchases WHERE id = ?",
            )
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
            Ok(row)
        }

        async fn list_installment_purchases(
            &self,
            owner_id: i64,
        ) -> MetadataResult<Vec<InstallmentPurchaseRow>> {
            let rows = sqlx::query_as::<_, InstallmentPurchaseRow>(
                "SELECT * FROM installment_purchases WHERE owner_id = ? AND deleted = 0 ORDER BY first_due_on DESC, id DESC",
            )
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn create_fuel_log(
            &self,
            new: &NewFuelLog,
            created_at: OffsetDateTime,
        ) -> MetadataResult<FuelLogRow> {
            let row = sqlx::query_as::<_, FuelLogRow>(
                r#"
                INSERT INTO fuel_logs (
                    owner_id, description, amount_cents, liters_milli, filled_on, notes, created_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?)
                RETURNING *
                "#,
            )
            .bind(new.owner_id)
            .bind(&new.description)
            .bind(new.amount_cents)
            .bind(new.liters_milli)
            .bind(new.filled_on)
            .bind(&new.notes)
            .bind(created_at)
            .fetch_one(&self.pool)
            .await?;
            Ok(row)
        }

        async fn get_fuel_log(&self, id: i64) -> MetadataResult<Option<FuelLogRow>> {
            let row = sqlx::query_as::<_, FuelLogRow>("SELECT * FROM fuel_logs WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(row)
        }

        async fn list_fuel_logs(&self, owner_id: i64) -> MetadataResult<Vec<FuelLogRow>> {
            let rows = sqlx::query_as::<_, FuelLogRow>(
                "SELECT * FROM fuel_logs WHERE owner_id = ? AND deleted = 0 ORDER BY filled_on DESC, id DESC",
            )
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn create_goal(
            &self,
            new: &NewGoal,
            created_at: OffsetDateTime,
        ) -> MetadataResult<GoalRow> {
            let row = sqlx::query_as::<_, GoalRow>(
                r#"
                INSERT INTO goals (owner_id, name, target_cents, saved_cents, due_on, created_at)
                VALUES (?, ?, ?, ?, ?, ?)
                RETURNING *
                "#,
            )
            .bind(new.owner_id)
            .bind(&new.name)
            .bind(new.target_cents)
            .bind(new.saved_cents)
            .bind(new.due_on)
            .bind(created_at)
            .fetch_one(&self.pool)
            .await?;
            Ok(row)
        }

        async fn get_goal(&self, id: i64) -> MetadataResult<Option<GoalRow>> {
            let row = sqlx::query_as::<_, GoalRow>("SELECT * FROM goals WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(row)
        }

        async fn list_goals(&self, owner_id: i64) -> MetadataResult<Vec<GoalRow>> {
            let rows = sqlx::query_as::<_, GoalRow>(
                "SELECT * FROM goals WHERE owner_id = ? AND deleted = 0 ORDER BY name, id",
            )
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn create_investment(
            &self,
            new: &NewInvestment,
            created_at: OffsetDateTime,
        ) -> MetadataResult<InvestmentRow> {
            let row = sqlx::query_as::<_, InvestmentRow>(
                r#"
                INSERT INTO investments (owner_id, name, amount_cents, category, notes, created_at)
                VALUES (?, ?, ?, ?, ?, ?)
                RETURNING *
                "#,
            )
            .bind(new.owner_id)
            .bind(&new.name)
            .bind(new.amount_cents)
            .bind(&new.category)
            .bind(&new.notes)
            .bind(created_at)
            .fetch_one(&self.pool)
            .await?;
            Ok(row)
        }

        async fn get_investment(&self, id: i64) -> MetadataResult<Option<InvestmentRow>> {
            let row = sqlx::query_as::<_, InvestmentRow>("SELECT * FROM investments WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(row)
        }

        async fn list_investments(&self, owner_id: i64) -> MetadataResult<Vec<InvestmentRow>> {
            let rows = sqlx::query_as::<_, InvestmentRow>(
                "SELECT * FROM investments WHERE owner_id = ? AND deleted = 0 ORDER BY name, id",
            )
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn create_debt(
            &self,
            new: &NewDebt,
            created_at: OffsetDateTime,
        ) -> MetadataResult<DebtRow> {
            let row = sqlx::query_as::<_, DebtRow>(
                r#"
                INSERT INTO debts (owner_id, description, amount_cents, creditor, created_at)
                VALUES (?, ?, ?, ?, ?)
                RETURNING *
                "#,
            )
            .bind(new.owner_id)
            .bind(&new.description)
            .bind(new.amount_cents)
            .bind(&new.creditor)
            .bind(created_at)
            .fetch_one(&self.pool)
            .await?;
            Ok(row)
        }

        async fn get_debt(&self, id: i64) -> MetadataResult<Option<DebtRow>> {
            let row = sqlx::query_as::<_, DebtRow>("SELECT * FROM debts WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(row)
        }

        async fn list_debts(&self, owner_id: i64) -> MetadataResult<Vec<DebtRow>> {
            let rows = sqlx::query_as::<_, DebtRow>(
                "SELECT * FROM debts WHERE owner_id = ? AND deleted = 0 ORDER BY id",
            )
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn create_loan(
            &self,
            new: &NewLoan,
            created_at: OffsetDateTime,
        ) -> MetadataResult<LoanRow> {
            let row = sqlx::query_as::<_, LoanRow>(
                r#"
                INSERT INTO loans (owner_id, description, amount_cents, counterparty, created_at)
                VALUES (?, ?, ?, ?, ?)
                RETURNING *
                "#,
            )
            .bind(new.owner_id)
            .bind(&new.description)
            .bind(new.amount_cents)
            .bind(&new.counterparty)
            .bind(created_at)
            .fetch_one(&self.pool)
            .await?;
            Ok(row)
        }

        async fn get_loan(&self, id: i64) -> MetadataResult<Option<LoanRow>> {
            let row = sqlx::query_as::<_, LoanRow>("SELECT * FROM loans WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(row)
        }

        async fn list_loans(&self, owner_id: i64) -> MetadataResult<Vec<LoanRow>> {
            let rows = sqlx::query_as::<_, LoanRow>(
                "SELECT * FROM loans WHERE owner_id = ? AND deleted = 0 ORDER BY id",
            )
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn create_budget(
            &self,
            new: &NewBudget,
            created_at: OffsetDateTime,
        ) -> MetadataResult<BudgetRow> {
            let row = sqlx::query_as::<_, BudgetRow>(
                r#"
                INSERT INTO budgets (owner_id, name, category, limit_cents, period, created_at)
                VALUES (?, ?, ?, ?, ?, ?)
                RETURNING *
                "#,
            )
            .bind(new.owner_id)
            .bind(&new.name)
            .bind(&new.category)
            .bind(new.limit_cents)
            .bind(&new.period)
            .bind(created_at)
            .fetch_one(&self.pool)
            .await?;
            Ok(row)
        }

        async fn get_budget(&self, id: i64) -> MetadataResult<Option<BudgetRow>> {
            let row = sqlx::query_as::<_, BudgetRow>("SELECT * FROM budgets WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(row)
        }

        async fn list_budgets(&self, owner_id: i64) -> MetadataResult<Vec<BudgetRow>> {
            let rows = sqlx::query_as::<_, BudgetRow>(
                "SELECT * FROM budgets WHERE owner_id = ? AND deleted = 0 ORDER BY period DESC, category",
            )
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn create_asset(
            &self,
            new: &NewAsset,
            created_at: OffsetDateTime,
        ) -> MetadataResult<AssetRow> {
            let row = sqlx::query_as::<_, AssetRow>(
                r#"
                INSERT INTO assets (owner_id, name, value_cents, category, created_at)
                VALUES (?, ?, ?, ?, ?)
                RETURNING *
                "#,
            )
            .bind(new.owner_id)
            .bind(&new.name)
            .bind(new.value_cents)
            .bind(&new.category)
            .bind(created_at)
            .fetch_one(&self.pool)
            .await?;
            Ok(row)
        }

        async fn get_asset(&self, id: i64) -> MetadataResult<Option<AssetRow>> {
            let row = sqlx::query_as::<_, AssetRow>("SELECT * FROM assets WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(row)
        }

        async fn list_assets(&self, owner_id: i64) -> MetadataResult<Vec<AssetRow>> {
            let rows = sqlx::query_as::<_, AssetRow>(
                "SELECT * FROM assets WHERE owner_id = ? AND deleted = 0 ORDER BY name, id",
            )
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }
    }

    #[async_trait]
    impl LifecycleRepo for SqliteStore {
        async fn soft_delete(
            &self,
            kind: EntityKind,
            id: i64,
            actor_id: i64,
            deleted_at: OffsetDateTime,
        ) -> MetadataResult<()> {
            let table = kind.spec().table;

            // Guarded UPDATE: only an active row transitions. The state check
            // afterwards distinguishes a missing row from a double delete.
            let result = sqlx::query(&format!(
                "UPDATE {table} SET deleted = 1, deleted_at = ?, deleted_by = ? WHERE id = ? AND deleted = 0"
            ))
            .bind(deleted_at)
            .bind(actor_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

            if result.rows_affected() == 0 {
                return match self.get_lifecycle(kind, id).await? {
                    None => Err(MetadataError::NotFound(format!("{table} id {id} not found"))),
                    Some(state) if state.deleted => {
                        Err(MetadataError::AlreadyDeleted(format!("{table} id {id}")))
                    }
                    Some(_) => Err(MetadataError::Internal(format!(
                        "soft delete of {table} id {id} matched no row despite active state"
                    ))),
                };
            }

            tracing::debug!(kind = %kind, id, actor_id, "record soft-deleted");
            Ok(())
        }

        async fn restore(&self, kind: EntityKind, id: i64) -> MetadataResult<()> {
            let table = kind.spec().table;

            let result = sqlx::query(&format!(
                "UPDATE {table} SET deleted = 0, deleted_at = NULL, deleted_by = NULL WHERE id = ? AND deleted = 1"
            ))
            .bind(id)
            .execute(&self.pool)
            .await?;

            if result.rows_affected() == 0 {
                return match self.get_lifecycle(kind, id).await? {
                    None => Err(MetadataError::NotFound(format!("{table} id {id} not found"))),
                    Some(state) if !state.deleted => {
                        Err(MetadataError::NotDeleted(format!("{table} id {id}")))
                    }
                    Some(_) => Err(MetadataError::Internal(format!(
                        "restore of {table} id {id} matched no row despite deleted state"
                    ))),
                };
            }

            tracing::debug!(kind = %kind, id, "record restored");
            Ok(())
        }

        async fn purge(
            &self,
            kind: EntityKind,
            id: i64,
            eligible_before: OffsetDateTime,
        ) -> MetadataResult<()> {
            let table = kind.spec().table;

            // Check policy and delete under one transaction so a concurrent
            // restore cannot slip between the check and the erase.
            let mut tx = self.pool.begin().await?;

            let state: Option<LifecycleState> = sqlx::query_as(&format!(
                "SELECT owner_id, deleted, deleted_at, deleted_by FROM {table} WHERE id = ?"
            ))
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

            match state {
                None => {
                    return Err(MetadataError::NotFound(format!("{table} id {id} not found")));
                }
                Some(state) if !state.deleted => {
                    return Err(MetadataError::PolicyViolation(format!(
                        "{table} id {id} is not deleted"
                    )));
                }
                Some(state) => {
                    if let Some(deleted_at) = state.deleted_at
                        && deleted_at > eligible_before
                    {
                        return Err(MetadataError::PolicyViolation(format!(
                            "{table} id {id} was deleted too recently to purge"
                        )));
                    }
                }
            }

            sqlx::query(&format!("DELETE FROM {table} WHERE id = ? AND deleted = 1"))
                .bind(id)
                .execute(&mut *tx)
                .await?;

            tx.commit().await?;

            tracing::info!(kind = %kind, id, "record purged");
            Ok(())
        }

        async fn sweep_purge(
            &self,
            kind: EntityKind,
            eligible_before: OffsetDateTime,
            limit: u32,
        ) -> MetadataResult<u64> {
            let table = kind.spec().table;

            let result = sqlx::query(&format!(
                "DELETE FROM {table} WHERE id IN (
                    SELECT id FROM {table}
                    WHERE deleted = 1 AND deleted_at <= ?
                    ORDER BY deleted_at
                    LIMIT ?
                )"
            ))
            .bind(eligible_before)
            .bind(limit)
            .execute(&self.pool)
            .await?;

            Ok(result.rows_affected())
        }

        async fn get_lifecycle(
            &self,
            kind: EntityKind,
            id: i64,
        ) -> MetadataResult<Option<LifecycleState>> {
            let table = kind.spec().table;
            let state = sqlx::query_as::<_, LifecycleState>(&format!(
                "SELECT owner_id, deleted, deleted_at, deleted_by FROM {table} WHERE id = ?"
            ))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
            Ok(state)
        }
    }

    /// Raw normalized row shape shared by every trash fan-out query.
    type TrashRowRaw = (
        i64,
        Option<String>,
        Option<String>,
        Option<i64>,
        Option<String>,
        Option<String>,
        OffsetDateTime,
    );

    #[async_trait]
    impl TrashRepo for SqliteStore {
        async fn list_trash(
            &self,
            owner_id: i64,
            cutoff: OffsetDateTime,
        ) -> MetadataResult<Vec<TrashEntry>> {
            let mut entries = Vec::new();

            for kind in EntityKind::ALL {
                let spec = kind.spec();
                let col = |name: Option<&'static str>| name.unwrap_or("NULL");

                // Tables that lack a column contribute NULL for it, so every
                // kind decodes through the same normalized shape.
                let sql = format!(
                    "SELECT id, {description} AS description, {name} AS name, \
                     {amount} AS amount_cents, {category} AS category, {notes} AS notes, deleted_at \
                     FROM {table} WHERE owner_id = ? AND deleted = 1 AND deleted_at >= ?",
                    description = col(spec.description_col),
                    name = col(spec.name_col),
                    amount = col(spec.amount_col),
                    category = col(spec.category_col),
                    notes = col(spec.notes_col),
                    table = spec.table,
                );

                let rows: Vec<TrashRowRaw> = sqlx::query_as(&sql)
                    .bind(owner_id)
                    .bind(cutoff)
                    .fetch_all(&self.pool)
                    .await?;

                for (id, description, name, amount_cents, category, notes, deleted_at) in rows {
                    entries.push(TrashEntry {
                        kind,
                        id,
                        label: TrashEntry::label_for(id, description, name),
                        deleted_at,
                        amount_cents,
                        category,
                        notes,
                    });
                }
            }

            // Most recently deleted first; ties resolve by kind then id so the
            // ordering is deterministic.
            entries.sort_by(|a, b| {
                b.deleted_at
                    .cmp(&a.deleted_at)
                    .then_with(|| a.kind.as_str().cmp(b.kind.as_str()))
                    .then_with(|| a.id.cmp(&b.id))
            });

            Ok(entries)
        }
    }

    #[async_trait]
    impl DashboardRepo for SqliteStore {
        async fn refresh_dashboard(
            &self,
            owner_id: i64,
            period: Period,
            refreshed_at: OffsetDateTime,
        ) -> MetadataResult<DashboardSnapshotRow> {
            let start = period.first_day();
            let end = period.last_day();

            let expenses_cents: i64 = sqlx::query_scalar(
                "SELECT COALESCE(SUM(amount_cents), 0) FROM expenses
                 WHERE owner_id = ? AND deleted = 0 AND spent_on BETWEEN ? AND ?",
            )
            .bind(owner_id)
            .bind(start)
            .bind(end)
            .fetch_one(&self.pool)
            .await?;

            let fuel_cents: i64 = sqlx::query_scalar(
                "SELECT COALESCE(SUM(amount_cents), 0) FROM fuel_logs
                 WHERE owner_id = ? AND deleted = 0 AND filled_on BETWEEN ? AND ?",
            )
            .bind(owner_id)
            .bind(start)
            .bind(end)
            .fetch_one(&self.pool)
            .await?;

            // Recurring records contribute their full amount while active.
            let subscriptions_cents: i64 = sqlx::query_scalar(
                "SELECT COALESCE(SUM(amount_cents), 0) FROM subscriptions WHERE owner_id = ? AND deleted = 0",
            )
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await?;

            let fixed_bills_cents: i64 = sqlx::query_scalar(
                "SELECT COALESCE(SUM(amount_cents), 0) FROM fixed_bills WHERE owner_id = ? AND deleted = 0",
            )
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await?;

            let loans_cents: i64 = sqlx::query_scalar(
                "SELECT COALESCE(SUM(amount_cents), 0) FROM loans WHERE owner_id = ? AND deleted = 0",
            )
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await?;

            // Installment schedules are expanded in Rust; month arithmetic on
            // a per-row basis would need dynamic SQLite date modifiers.
            let schedules: Vec<(Date, i64, i64)> = sqlx::query_as(
                "SELECT first_due_on, installment_count, installment_cents
                 FROM installment_purchases WHERE owner_id = ? AND deleted = 0",
            )
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;

            let installments_cents: i64 = schedules
                .iter()
                .map(|(first_due_on, count, cents)| {
                    let elapsed = period.months_since(Period::containing(*first_due_on));
                    if elapsed >= 0 && elapsed < *count { *cents } else { 0 }
                })
                .sum();

            let total_cents = expenses_cents
                + installments_cents
                + fuel_cents
                + subscriptions_cents
                + fixed_bills_cents
                + loans_cents;

            let snapshot = DashboardSnapshotRow {
                owner_id,
                period: period.to_string(),
                expenses_cents,
                installments_cents,
                fuel_cents,
                subscriptions_cents,
                fixed_bills_cents,
                loans_cents,
                total_cents,
                refreshed_at,
            };

            sqlx::query(
                r#"
                INSERT INTO dashboard_snapshots (
                    owner_id, period, expenses_cents, installments_cents, fuel_cents,
                    subscriptions_cents, fixed_bills_cents, loans_cents, total_cents, refreshed_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(owner_id, period) DO UPDATE SET
                    expenses_cents = excluded.expenses_cents,
                    installments_cents = excluded.installments_cents,
                    fuel_cents = excluded.fuel_cents,
                    subscriptions_cents = excluded.subscriptions_cents,
                    fixed_bills_cents = excluded.fixed_bills_cents,
                    loans_cents = excluded.loans_cents,
                    total_cents = excluded.total_cents,
                    refreshed_at = excluded.refreshed_at
                "#,
            )
            .bind(snapshot.owner_id)
            .bind(&snapshot.period)
            .bind(snapshot.expenses_cents)
            .bind(snapshot.installments_cents)
            .bind(snapshot.fuel_cents)
            .bind(snapshot.subscriptions_cents)
            .bind(snapshot.fixed_bills_cents)
            .bind(snapshot.loans_cents)
            .bind(snapshot.total_cents)
            .bind(snapshot.refreshed_at)
            .execute(&self.pool)
            .await?;

            Ok(snapshot)
        }

        async fn get_dashboard(
            &self,
            owner_id: i64,
            period: Period,
        ) -> MetadataResult<Option<DashboardSnapshotRow>> {
            let row = sqlx::query_as::<_, DashboardSnapshotRow>(
                "SELECT * FROM dashboard_snapshots WHERE owner_id = ? AND period = ?",
            )
            .bind(owner_id)
            .bind(period.to_string())
            .fetch_optional(&self.pool)
            .await?;
            Ok(row)
        }
    }
}

/// Schema bootstrap, idempotent. Every entity table carries the uniform
/// lifecycle columns; the `(deleted, deleted_at)` index serves the trash
/// fan-out and the retention sweep.
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS expenses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    owner_id INTEGER NOT NULL,
    description TEXT NOT NULL,
    amount_cents INTEGER NOT NULL,
    category TEXT NOT NULL,
    payment_method TEXT NOT NULL,
    spent_on TEXT NOT NULL,
    notes TEXT,
    created_at TEXT NOT NULL,
    deleted INTEGER NOT NULL DEFAULT 0,
    deleted_at TEXT,
    deleted_by INTEGER
);
CREATE INDEX IF NOT EXISTS idx_expenses_owner ON expenses(owner_id, deleted);
CREATE INDEX IF NOT EXISTS idx_expenses_trash ON expenses(deleted, deleted_at);

CREATE TABLE IF NOT EXISTS subscriptions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    owner_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    amount_cents INTEGER NOT NULL,
    category TEXT,
    billing_day INTEGER NOT NULL,
    notes TEXT,
    created_at TEXT NOT NULL,
    deleted INTEGER NOT NULL DEFAULT 0,
    deleted_at TEXT,
    deleted_by INTEGER
);
CREATE INDEX IF NOT EXISTS idx_subscriptions_owner ON subscriptions(owner_id, deleted);
CREATE INDEX IF NOT EXISTS idx_subscriptions_trash ON subscriptions(deleted, deleted_at);

CREATE TABLE IF NOT EXISTS fixed_bills (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    owner_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    amount_cents INTEGER NOT NULL,
    category TEXT,
    due_day INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    deleted INTEGER NOT NULL DEFAULT 0,
    deleted_at TEXT,
    deleted_by INTEGER
);
CREATE INDEX IF NOT EXISTS idx_fixed_bills_owner ON fixed_bills(owner_id, deleted);
CREATE INDEX IF NOT EXISTS idx_fixed_bills_trash ON fixed_bills(deleted, deleted_at);

CREATE TABLE IF NOT EXISTS cards (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    owner_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    limit_cents INTEGER NOT NULL,
    closing_day INTEGER NOT NULL,
    due_day INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    deleted INTEGER NOT NULL DEFAULT 0,
    deleted_at TEXT,
    deleted_by INTEGER
);
CREATE INDEX IF NOT EXISTS idx_cards_owner ON cards(owner_id, deleted);
CREATE INDEX IF NOT EXISTS idx_cards_trash ON cards(deleted, deleted_at);

CREATE TABLE IF NOT EXISTS installment_purchases (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    owner_id INTEGER NOT NULL,
    description TEXT NOT NULL,
    total_cents INTEGER NOT NULL,
    installment_count INTEGER NOT NULL,
    installment_cents INTEGER NOT NULL,
    category TEXT,
    first_due_on TEXT NOT NULL,
    created_at TEXT NOT NULL,
    deleted INTEGER NOT NULL DEFAULT 0,
    deleted_at TEXT,
    deleted_by INTEGER
);
CREATE INDEX IF NOT EXISTS idx_installment_purchases_owner ON installment_purchases(owner_id, deleted);
CREATE INDEX IF NOT EXISTS idx_installment_purchases_trash ON installment_purchases(deleted, deleted_at);

CREATE TABLE IF NOT EXISTS fuel_logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    owner_id INTEGER NOT NULL,
    description TEXT,
    amount_cents INTEGER NOT NULL,
    liters_milli INTEGER NOT NULL,
    filled_on TEXT NOT NULL,
    notes TEXT,
    created_at TEXT NOT NULL,
    deleted INTEGER NOT NULL DEFAULT 0,
    deleted_at TEXT,
    deleted_by INTEGER
);
CREATE INDEX IF NOT EXISTS idx_fuel_logs_owner ON fuel_logs(owner_id, deleted);
CREATE INDEX IF NOT EXISTS idx_fuel_logs_trash ON fuel_logs(deleted, deleted_at);

CREATE TABLE IF NOT EXISTS goals (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    owner_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    target_cents INTEGER NOT NULL,
    saved_cents INTEGER NOT NULL,
    due_on TEXT,
    created_at TEXT NOT NULL,
    deleted INTEGER NOT NULL DEFAULT 0,
    deleted_at TEXT,
    deleted_by INTEGER
);
CREATE INDEX IF NOT EXISTS idx_goals_owner ON goals(owner_id, deleted);
CREATE INDEX IF NOT EXISTS idx_goals_trash ON goals(deleted, deleted_at);

CREATE TABLE IF NOT EXISTS investments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    owner_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    amount_cents INTEGER NOT NULL,
    category TEXT,
    notes TEXT,
    created_at TEXT NOT NULL,
    deleted INTEGER NOT NULL DEFAULT 0,
    deleted_at TEXT,
    deleted_by INTEGER
);
CREATE INDEX IF NOT EXISTS idx_investments_owner ON investments(owner_id, deleted);
CREATE INDEX IF NOT EXISTS idx_investments_trash ON investments(deleted, deleted_at);

CREATE TABLE IF NOT EXISTS debts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    owner_id INTEGER NOT NULL,
    description TEXT NOT NULL,
    amount_cents INTEGER NOT NULL,
    creditor TEXT NOT NULL,
    created_at TEXT NOT NULL,
    deleted INTEGER NOT NULL DEFAULT 0,
    deleted_at TEXT,
    deleted_by INTEGER
);
CREATE INDEX IF NOT EXISTS idx_debts_owner ON debts(owner_id, deleted);
CREATE INDEX IF NOT EXISTS idx_debts_trash ON debts(deleted, deleted_at);

CREATE TABLE IF NOT EXISTS loans (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    owner_id INTEGER NOT NULL,
    description TEXT NOT NULL,
    amount_cents INTEGER NOT NULL,
    counterparty TEXT NOT NULL,
    created_at TEXT NOT NULL,
    deleted INTEGER NOT NULL DEFAULT 0,
    deleted_at TEXT,
    deleted_by INTEGER
);
CREATE INDEX IF NOT EXISTS idx_loans_owner ON loans(owner_id, deleted);
CREATE INDEX IF NOT EXISTS idx_loans_trash ON loans(deleted, deleted_at);

CREATE TABLE IF NOT EXISTS budgets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    owner_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    category TEXT NOT NULL,
    limit_cents INTEGER NOT NULL,
    period TEXT NOT NULL,
    created_at TEXT NOT NULL,
    deleted INTEGER NOT NULL DEFAULT 0,
    deleted_at TEXT,
    deleted_by INTEGER
);
CREATE INDEX IF NOT EXISTS idx_budgets_owner ON budgets(owner_id, deleted);
CREATE INDEX IF NOT EXISTS idx_budgets_trash ON budgets(deleted, deleted_at);

CREATE TABLE IF NOT EXISTS assets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    owner_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    value_cents INTEGER NOT NULL,
    category TEXT,
    created_at TEXT NOT NULL,
    deleted INTEGER NOT NULL DEFAULT 0,
    deleted_at TEXT,
    deleted_by INTEGER
);
CREATE INDEX IF NOT EXISTS idx_assets_owner ON assets(owner_id, deleted);
CREATE INDEX IF NOT EXISTS idx_assets_trash ON assets(deleted, deleted_at);

CREATE TABLE IF NOT EXISTS dashboard_snapshots (
    owner_id INTEGER NOT NULL,
    period TEXT NOT NULL,
    expenses_cents INTEGER NOT NULL,
    installments_cents INTEGER NOT NULL,
    fuel_cents INTEGER NOT NULL,
    subscriptions_cents INTEGER NOT NULL,
    fixed_bills_cents INTEGER NOT NULL,
    loans_cents INTEGER NOT NULL,
    total_cents INTEGER NOT NULL,
    refreshed_at TEXT NOT NULL,
    PRIMARY KEY (owner_id, period)
);
"#;
