//! Uniform create/get/list repository for the remaining record types.
//!
//! Expenses and subscriptions have richer edit flows and live in their own
//! repos; everything else shares this flat surface. All `list_*` methods
//! return only non-deleted rows for the owner.

use crate::error::MetadataResult;
use crate::models::{
    AssetRow, BudgetRow, CardRow, DebtRow, FixedBillRow, FuelLogRow, GoalRow,
    InstallmentPurchaseRow, InvestmentRow, LoanRow, NewAsset, NewBudget, NewCard, NewDebt,
    NewFixedBill, NewFuelLog, NewGoal, NewInstallmentPurchase, NewInvestment, NewLoan,
};
use async_trait::async_trait;
use time::OffsetDateTime;

/// Repository for the uniform record types.
#[async_trait]
pub trait RecordRepo: Send + Sync {
    async fn create_fixed_bill(
        &self,
        new: &NewFixedBill,
        created_at: OffsetDateTime,
    ) -> MetadataResult<FixedBillRow>;
    async fn get_fixed_bill(&self, id: i64) -> MetadataResult<Option<FixedBillRow>>;
    async fn list_fixed_bills(&self, owner_id: i64) -> MetadataResult<Vec<FixedBillRow>>;

    async fn create_card(
        &self,
        new: &NewCard,
        created_at: OffsetDateTime,
    ) -> MetadataResult<CardRow>;
    async fn get_card(&self, id: i64) -> MetadataResult<Option<CardRow>>;
    async fn list_cards(&self, owner_id: i64) -> MetadataResult<Vec<CardRow>>;

    async fn create_installment_purchase(
        &self,
        new: &NewInstallmentPurchase,
        created_at: OffsetDateTime,
    ) -> MetadataResult<InstallmentPurchaseRow>;
    async fn get_installment_purchase(
        &self,
        id: i64,
    ) -> MetadataResult<Option<InstallmentPurchaseRow>>;
    async fn list_installment_purchases(
        &self,
        owner_id: i64,
    ) -> MetadataResult<Vec<InstallmentPurchaseRow>>;

    async fn create_fuel_log(
        &self,
        new: &NewFuelLog,
        created_at: OffsetDateTime,
    ) -> MetadataResult<FuelLogRow>;
    async fn get_fuel_log(&self, id: i64) -> MetadataResult<Option<FuelLogRow>>;
    async fn list_fuel_logs(&self, owner_id: i64) -> MetadataResult<Vec<FuelLogRow>>;

    async fn create_goal(
        &self,
        new: &NewGoal,
        created_at: OffsetDateTime,
    ) -> MetadataResult<GoalRow>;
    async fn get_goal(&self, id: i64) -> MetadataResult<Option<GoalRow>>;
    async fn list_goals(&self, owner_id: i64) -> MetadataResult<Vec<GoalRow>>;

    async fn create_investment(
        &self,
        new: &NewInvestment,
        created_at: OffsetDateTime,
    ) -> MetadataResult<InvestmentRow>;
    async fn get_investment(&self, id: i64) -> MetadataResult<Option<InvestmentRow>>;
    async fn list_investments(&self, owner_id: i64) -> MetadataResult<Vec<InvestmentRow>>;

    async fn create_debt(
        &self,
        new: &NewDebt,
        created_at: OffsetDateTime,
    ) -> MetadataResult<DebtRow>;
    async fn get_debt(&self, id: i64) -> MetadataResult<Option<DebtRow>>;
    async fn list_debts(&self, owner_id: i64) -> MetadataResult<Vec<DebtRow>>;

    async fn create_loan(
        &self,
        new: &NewLoan,
        created_at: OffsetDateTime,
    ) -> MetadataResult<LoanRow>;
    async fn get_loan(&self, id: i64) -> MetadataResult<Option<LoanRow>>;
    async fn list_loans(&self, owner_id: i64) -> MetadataResult<Vec<LoanRow>>;

    async fn create_budget(
        &self,
        new: &NewBudget,
        created_at: OffsetDateTime,
    ) -> MetadataResult<BudgetRow>;
    async fn get_budget(&self, id: i64) -> MetadataResult<Option<BudgetRow>>;
    async fn list_budgets(&self, owner_id: i64) -> MetadataResult<Vec<BudgetRow>>;

    async fn create_asset(
        &self,
        new: &NewAsset,
        created_at: OffsetDateTime,
    ) -> MetadataResult<AssetRow>;
    async fn get_asset(&self, id: i64) -> MetadataResult<Option<AssetRow>>;
    async fn list_assets(&self, owner_id: i64) -> MetadataResult<Vec<AssetRow>>;
}
