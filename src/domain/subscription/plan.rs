//! Subscription plan entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, PlanId, Timestamp, ValidationError};

/// A purchasable subscription plan.
///
/// Plans are administered out-of-band and referenced by checkout; a paid
/// transaction for a plan opens or extends a subscription period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionPlan {
    pub id: PlanId,

    pub name: String,

    /// Price in minor currency units.
    pub price: i64,

    /// Length of one subscription period in days.
    pub period_days: u32,

    /// Plans can be retired without affecting running subscriptions.
    pub active: bool,

    pub created_at: Timestamp,
}

impl SubscriptionPlan {
    /// Creates a new active plan.
    pub fn create(
        id: PlanId,
        name: impl Into<String>,
        price: i64,
        period_days: u32,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name").into());
        }
        if price < 0 {
            return Err(DomainError::validation("price", "Price must not be negative"));
        }
        if period_days == 0 {
            return Err(DomainError::validation(
                "period_days",
                "Period must be at least one day",
            ));
        }

        Ok(Self {
            id,
            name,
            price,
            period_days,
            active: true,
            created_at: Timestamp::now(),
        })
    }

    /// Retires the plan from new checkouts.
    pub fn retire(&mut self) {
        self.active = false;
    }
}
