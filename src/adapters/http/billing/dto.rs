//! HTTP DTOs for billing endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::billing::{PurchaseItem, Transaction, TransactionStatus};

/// Request to start a checkout.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    /// "course" or "plan".
    pub item_type: String,
    pub item_id: String,
    pub payment_method: String,
}

/// Response for checkout initiation.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResponse {
    pub transaction: TransactionResponse,
    /// Gateway payment page the frontend redirects to.
    pub redirect_url: String,
}

/// Request to attach a proof-of-payment reference.
#[derive(Debug, Clone, Deserialize)]
pub struct AttachProofRequest {
    /// Reference to the uploaded attachment.
    pub reference: String,
}

/// Transaction representation returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionResponse {
    pub id: String,
    pub order_ref: String,
    pub item_type: &'static str,
    pub item_id: String,
    pub amount: i64,
    pub payment_method: String,
    pub status: TransactionStatus,
    pub proof_of_payment: Option<String>,
    pub paid_at: Option<String>,
    pub expires_at: String,
    pub created_at: String,
}

impl From<Transaction> for TransactionResponse {
    fn from(transaction: Transaction) -> Self {
        let (item_type, item_id) = match transaction.item {
            PurchaseItem::Course(id) => ("course", id.to_string()),
            PurchaseItem::Plan(id) => ("plan", id.to_string()),
        };
        Self {
            id: transaction.id.to_string(),
            order_ref: transaction.order_ref,
            item_type,
            item_id,
            amount: transaction.amount,
            payment_method: transaction.payment_method,
            status: transaction.status,
            proof_of_payment: transaction.proof_of_payment,
            paid_at: transaction.paid_at.map(|t| t.to_rfc3339()),
            expires_at: transaction.expires_at.to_rfc3339(),
            created_at: transaction.created_at.to_rfc3339(),
        }
    }
}

/// Transaction list response.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionListResponse {
    pub transactions: Vec<TransactionResponse>,
}

/// Subscription representation returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionResponse {
    pub id: String,
    pub plan_id: String,
    pub status: crate::domain::subscription::SubscriptionStatus,
    pub current_period_start: String,
    pub current_period_end: String,
    pub has_access: bool,
}

impl From<crate::domain::subscription::Subscription> for SubscriptionResponse {
    fn from(subscription: crate::domain::subscription::Subscription) -> Self {
        let has_access = subscription.has_access(crate::domain::foundation::Timestamp::now());
        Self {
            id: subscription.id.to_string(),
            plan_id: subscription.plan_id.to_string(),
            status: subscription.status,
            current_period_start: subscription.current_period_start.to_rfc3339(),
            current_period_end: subscription.current_period_end.to_rfc3339(),
            has_access,
        }
    }
}

/// Subscription plan representation returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct PlanResponse {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub period_days: u32,
}

impl From<crate::domain::subscription::SubscriptionPlan> for PlanResponse {
    fn from(plan: crate::domain::subscription::SubscriptionPlan) -> Self {
        Self {
            id: plan.id.to_string(),
            name: plan.name,
            price: plan.price,
            period_days: plan.period_days,
        }
    }
}

/// Plan list response.
#[derive(Debug, Clone, Serialize)]
pub struct PlanListResponse {
    pub plans: Vec<PlanResponse>,
}

/// Body returned to the gateway for every accepted notification.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookAckResponse {
    pub status: &'static str,
}
