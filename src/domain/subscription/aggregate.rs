//! Subscription aggregate entity.
//!
//! A subscription is opened by a plan checkout, activated by the paid
//! transaction and extended by subsequent paid renewals.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, OwnedByUser, PlanId, StateMachine, SubscriptionId, Timestamp, UserId,
};

/// Lifecycle status of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Opened by checkout, awaiting first payment.
    Pending,

    /// Paid and within the current period.
    Active,

    /// Cancelled by the user; access continues until period end.
    Cancelled,

    /// Period lapsed without renewal.
    Expired,
}

impl StateMachine for SubscriptionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SubscriptionStatus::*;
        matches!(
            (self, target),
            (Pending, Active)
                | (Pending, Expired)
                | (Active, Active) // renewal
                | (Active, Cancelled)
                | (Active, Expired)
                | (Cancelled, Active) // renewal after cancel, before period end
                | (Cancelled, Expired)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SubscriptionStatus::*;
        match self {
            Pending => vec![Active, Expired],
            Active => vec![Active, Cancelled, Expired],
            Cancelled => vec![Active, Expired],
            Expired => vec![],
        }
    }
}

/// Subscription aggregate.
///
/// # Invariants
///
/// - one live (non-expired) subscription per user
/// - `current_period_start <= current_period_end`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: SubscriptionId,

    pub user_id: UserId,

    pub plan_id: PlanId,

    pub status: SubscriptionStatus,

    pub current_period_start: Timestamp,

    pub current_period_end: Timestamp,

    pub cancelled_at: Option<Timestamp>,

    pub created_at: Timestamp,

    pub updated_at: Timestamp,
}

impl Subscription {
    /// Opens a pending subscription awaiting its first payment.
    pub fn open(id: SubscriptionId, user_id: UserId, plan_id: PlanId) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            user_id,
            plan_id,
            status: SubscriptionStatus::Pending,
            current_period_start: now,
            current_period_end: now,
            cancelled_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Activates or renews the subscription for one plan period.
    ///
    /// Renewals on a running subscription extend from the current period end;
    /// otherwise the new period starts now.
    pub fn record_payment(&mut self, period_days: u32) -> Result<(), DomainError> {
        let now = Timestamp::now();
        let start = if self.status == SubscriptionStatus::Active
            && now.is_before(&self.current_period_end)
        {
            self.current_period_end
        } else {
            now
        };

        self.status = self.status.transition_to(SubscriptionStatus::Active)?;
        self.current_period_start = start;
        self.current_period_end = start.add_days(period_days as i64);
        self.cancelled_at = None;
        self.updated_at = now;
        Ok(())
    }

    /// Cancels at period end.
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        self.status = self.status.transition_to(SubscriptionStatus::Cancelled)?;
        self.cancelled_at = Some(Timestamp::now());
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Marks the subscription expired once its period lapsed.
    pub fn expire(&mut self) -> Result<(), DomainError> {
        self.status = self.status.transition_to(SubscriptionStatus::Expired)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// True while the subscription grants access.
    ///
    /// Active grants access; Cancelled grants access until period end.
    pub fn has_access(&self, now: Timestamp) -> bool {
        match self.status {
            SubscriptionStatus::Active => !now.is_after(&self.current_period_end),
            SubscriptionStatus::Cancelled => !now.is_after(&self.current_period_end),
            SubscriptionStatus::Pending | SubscriptionStatus::Expired => false,
        }
    }
}

impl OwnedByUser for Subscription {
    fn owner_id(&self) -> &UserId {
        &self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending() -> Subscription {
        Subscription::open(SubscriptionId::new(), UserId::new(), PlanId::new())
    }

    #[test]
    fn open_starts_pending_without_access() {
        let sub = pending();
        assert_eq!(sub.status, SubscriptionStatus::Pending);
        assert!(!sub.has_access(Timestamp::now()));
    }

    #[test]
    fn first_payment_activates_for_one_period() {
        let mut sub = pending();
        sub.record_payment(30).unwrap();

        assert_eq!(sub.status, SubscriptionStatus::Active);
        assert!(sub.has_access(Timestamp::now()));
        assert_eq!(
            sub.current_period_end
                .duration_since(&sub.current_period_start),
            chrono::Duration::days(30)
        );
    }

    #[test]
    fn renewal_extends_from_period_end() {
        let mut sub = pending();
        sub.record_payment(30).unwrap();
        let first_end = sub.current_period_end;

        sub.record_payment(30).unwrap();

        assert_eq!(sub.current_period_start, first_end);
        assert_eq!(sub.current_period_end, first_end.add_days(30));
    }

    #[test]
    fn cancel_keeps_access_until_period_end() {
        let mut sub = pending();
        sub.record_payment(30).unwrap();
        sub.cancel().unwrap();

        assert_eq!(sub.status, SubscriptionStatus::Cancelled);
        assert!(sub.has_access(Timestamp::now()));
        assert!(!sub.has_access(sub.current_period_end.plus_secs(1)));
    }

    #[test]
    fn renewal_after_cancel_reactivates() {
        let mut sub = pending();
        sub.record_payment(30).unwrap();
        sub.cancel().unwrap();
        sub.record_payment(30).unwrap();

        assert_eq!(sub.status, SubscriptionStatus::Active);
        assert_eq!(sub.cancelled_at, None);
    }

    #[test]
    fn expired_subscription_is_terminal() {
        let mut sub = pending();
        sub.record_payment(30).unwrap();
        sub.expire().unwrap();

        assert!(sub.record_payment(30).is_err());
        assert!(!sub.has_access(Timestamp::now()));
    }

    #[test]
    fn pending_cannot_cancel() {
        let mut sub = pending();
        assert!(sub.cancel().is_err());
    }
}
