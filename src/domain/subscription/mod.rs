//! Subscription context - plans and recurring access periods.

mod aggregate;
mod errors;
mod plan;

pub use aggregate::{Subscription, SubscriptionStatus};
pub use errors::SubscriptionError;
pub use plan::SubscriptionPlan;
