//! Expense repository trait.

use crate::error::MetadataResult;
use crate::models::{ExpenseRow, NewExpense, UpdateExpense};
use async_trait::async_trait;
use time::OffsetDateTime;

/// Repository for expense records.
#[async_trait]
pub trait ExpenseRepo: Send + Sync {
    /// Insert an expense and return the stored row.
    async fn create_expense(
        &self,
        new: &NewExpense,
        created_at: OffsetDateTime,
    ) -> MetadataResult<ExpenseRow>;

    /// Get an expense by id, regardless of lifecycle state.
    async fn get_expense(&self, id: i64) -> MetadataResult<Option<ExpenseRow>>;

    /// List an owner's non-deleted expenses, most recent spend first.
    async fn list_expenses(&self, owner_id: i64) -> MetadataResult<Vec<ExpenseRow>>;

    /// Partially update a non-deleted expense. Lifecycle fields are untouched.
    async fn update_expense(
        &self,
        id: i64,
        update: &UpdateExpense,
    ) -> MetadataResult<ExpenseRow>;
}
