//! Subscription repository trait.

use crate::error::MetadataResult;
use crate::models::{NewSubscription, SubscriptionRow, UpdateSubscription};
use async_trait::async_trait;
use time::OffsetDateTime;

/// Repository for subscription records.
#[async_trait]
pub trait SubscriptionRepo: Send + Sync {
    /// Insert a subscription and return the stored row.
    async fn create_subscription(
        &self,
        new: &NewSubscription,
        created_at: OffsetDateTime,
    ) -> MetadataResult<SubscriptionRow>;

    /// Get a subscription by id, regardless of lifecycle state.
    async fn get_subscription(&self, id: i64) -> MetadataResult<Option<SubscriptionRow>>;

    /// List an owner's non-deleted subscriptions, ordered by name.
    async fn list_subscriptions(&self, owner_id: i64) -> MetadataResult<Vec<SubscriptionRow>>;

    /// Partially update a non-deleted subscription.
    async fn update_subscription(
        &self,
        id: i64,
        update: &UpdateSubscription,
    ) -> MetadataResult<SubscriptionRow>;
}
