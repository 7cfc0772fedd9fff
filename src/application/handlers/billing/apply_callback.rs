//! ApplyCallbackHandler - worker-side callback processing.
//!
//! Maps the gateway's reported status into the internal transaction status
//! and applies the consequences: granting the purchased item and queueing
//! the confirmation notification on transition to paid.

use std::sync::Arc;

use serde_json::json;

use crate::domain::billing::{
    reconcile_status, BillingError, CallbackOutcome, GatewayNotification, PurchaseItem,
    Transaction, TransactionCancelled, TransactionPaid,
};
use crate::domain::foundation::{EventId, SerializableDomainEvent, SubscriptionId, Timestamp};
use crate::domain::subscription::Subscription;
use crate::ports::{
    EventPublisher, JobKind, JobQueue, QueuedJob, SubscriptionRepository, TransactionRepository,
};

use super::super::enrollment::{GrantEnrollmentCommand, GrantEnrollmentHandler};

/// Result of applying a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyCallbackResult {
    /// Transaction became paid; purchase granted, confirmation queued.
    Paid,
    /// Transaction became cancelled.
    Cancelled,
    /// Nothing changed (still pending, or re-notification).
    Unchanged,
}

/// Handler that applies a verified notification to its transaction.
pub struct ApplyCallbackHandler {
    transactions: Arc<dyn TransactionRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    grant_enrollment: Arc<GrantEnrollmentHandler>,
    job_queue: Arc<dyn JobQueue>,
    event_publisher: Arc<dyn EventPublisher>,
    job_max_attempts: u32,
}

impl ApplyCallbackHandler {
    pub fn new(
        transactions: Arc<dyn TransactionRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
        grant_enrollment: Arc<GrantEnrollmentHandler>,
        job_queue: Arc<dyn JobQueue>,
        event_publisher: Arc<dyn EventPublisher>,
        job_max_attempts: u32,
    ) -> Self {
        Self {
            transactions,
            subscriptions,
            grant_enrollment,
            job_queue,
            event_publisher,
            job_max_attempts,
        }
    }

    pub async fn handle(
        &self,
        notification: &GatewayNotification,
    ) -> Result<ApplyCallbackResult, BillingError> {
        let target = reconcile_status(
            &notification.transaction_status,
            notification.fraud_status.as_deref(),
        );

        let mut transaction = self
            .transactions
            .find_by_order_ref(&notification.order_id)
            .await
            .map_err(|e| BillingError::infrastructure(e.to_string()))?
            .ok_or_else(|| BillingError::not_found_for_order(&notification.order_id))?;

        let metadata = serde_json::to_value(notification)
            .map_err(|e| BillingError::infrastructure(e.to_string()))?;
        let outcome = transaction.apply_gateway_status(target, metadata)?;

        self.transactions
            .update(&transaction)
            .await
            .map_err(|e| BillingError::infrastructure(e.to_string()))?;

        match outcome {
            CallbackOutcome::BecamePaid => {
                self.grant_purchase(&transaction).await?;
                self.queue_confirmation(&transaction).await?;

                let event = TransactionPaid {
                    event_id: EventId::new(),
                    transaction_id: transaction.id,
                    user_id: transaction.user_id,
                    item: transaction.item,
                    amount: transaction.amount,
                    order_ref: transaction.order_ref.clone(),
                    occurred_at: Timestamp::now(),
                };
                self.event_publisher
                    .publish(event.to_envelope())
                    .await
                    .map_err(|e| BillingError::infrastructure(e.to_string()))?;

                tracing::info!(
                    order_ref = %transaction.order_ref,
                    amount = transaction.amount,
                    "transaction paid"
                );
                Ok(ApplyCallbackResult::Paid)
            }
            CallbackOutcome::BecameCancelled => {
                let event = TransactionCancelled {
                    event_id: EventId::new(),
                    transaction_id: transaction.id,
                    user_id: transaction.user_id,
                    order_ref: transaction.order_ref.clone(),
                    gateway_status: notification.transaction_status.clone(),
                    occurred_at: Timestamp::now(),
                };
                self.event_publisher
                    .publish(event.to_envelope())
                    .await
                    .map_err(|e| BillingError::infrastructure(e.to_string()))?;

                tracing::info!(
                    order_ref = %transaction.order_ref,
                    gateway_status = %notification.transaction_status,
                    "transaction cancelled"
                );
                Ok(ApplyCallbackResult::Cancelled)
            }
            CallbackOutcome::Unchanged => Ok(ApplyCallbackResult::Unchanged),
        }
    }

    /// Grants the purchased item. Idempotent so job retries are safe.
    async fn grant_purchase(&self, transaction: &Transaction) -> Result<(), BillingError> {
        match transaction.item {
            PurchaseItem::Course(course_id) => {
                self.grant_enrollment
                    .handle(GrantEnrollmentCommand {
                        user_id: transaction.user_id,
                        course_id,
                    })
                    .await
                    .map_err(|e| BillingError::infrastructure(e.to_string()))?;
            }
            PurchaseItem::Plan(plan_id) => {
                let plan = self
                    .subscriptions
                    .find_plan(&plan_id)
                    .await
                    .map_err(|e| BillingError::infrastructure(e.to_string()))?
                    .ok_or_else(|| {
                        BillingError::infrastructure(format!("Plan {} no longer exists", plan_id))
                    })?;

                let mut subscription = match self
                    .subscriptions
                    .find_live_by_user(&transaction.user_id)
                    .await
                    .map_err(|e| BillingError::infrastructure(e.to_string()))?
                {
                    Some(subscription) => subscription,
                    // The checkout-time pending subscription can be gone if
                    // it expired between checkout and payment; open a new one.
                    None => {
                        let subscription =
                            Subscription::open(SubscriptionId::new(), transaction.user_id, plan_id);
                        self.subscriptions
                            .save(&subscription)
                            .await
                            .map_err(|e| BillingError::infrastructure(e.to_string()))?;
                        subscription
                    }
                };

                subscription.record_payment(plan.period_days)?;
                self.subscriptions
                    .update(&subscription)
                    .await
                    .map_err(|e| BillingError::infrastructure(e.to_string()))?;
            }
        }
        Ok(())
    }

    async fn queue_confirmation(&self, transaction: &Transaction) -> Result<(), BillingError> {
        let job = QueuedJob::new(
            JobKind::SendPaymentConfirmation,
            json!({
                "transaction_id": transaction.id,
                "order_ref": transaction.order_ref,
                "email": transaction.customer_email,
                "amount": transaction.amount,
            }),
            self.job_max_attempts,
        );
        self.job_queue
            .enqueue(job)
            .await
            .map_err(|e| BillingError::infrastructure(e.to_string()))?;
        Ok(())
    }
}
