//! Subscription repository port (plans and subscriptions).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PlanId, SubscriptionId, Timestamp, UserId};
use crate::domain::subscription::{Subscription, SubscriptionPlan};

/// Repository port for subscription plans and user subscriptions.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Save a new plan.
    async fn save_plan(&self, plan: &SubscriptionPlan) -> Result<(), DomainError>;

    /// Find a plan by its ID. Returns `None` if not found.
    async fn find_plan(&self, id: &PlanId) -> Result<Option<SubscriptionPlan>, DomainError>;

    /// List active plans, cheapest first.
    async fn list_active_plans(&self) -> Result<Vec<SubscriptionPlan>, DomainError>;

    /// Save a new subscription.
    async fn save(&self, subscription: &Subscription) -> Result<(), DomainError>;

    /// Update an existing subscription.
    async fn update(&self, subscription: &Subscription) -> Result<(), DomainError>;

    /// Find a subscription by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &SubscriptionId) -> Result<Option<Subscription>, DomainError>;

    /// Find a user's live (non-expired) subscription, if any.
    async fn find_live_by_user(&self, user_id: &UserId)
        -> Result<Option<Subscription>, DomainError>;

    /// List subscriptions whose period ended on or before `ended_by` and are
    /// not yet expired (expiry sweep).
    async fn list_lapsed(&self, ended_by: Timestamp) -> Result<Vec<Subscription>, DomainError>;
}
