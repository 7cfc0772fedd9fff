//! Transaction aggregate - a payment record for a purchase.
//!
//! A transaction links a user to the item being purchased (a course or a
//! subscription plan) and tracks the payment lifecycle driven by the
//! payment gateway.
//!
//! # Design Decisions
//!
//! - **Money in minor units**: amounts are i64 minor currency units, never floats
//! - **Polymorphic item**: the purchased item is a typed enum, persisted as
//!   (kind, uuid) columns
//! - **Gateway metadata**: the raw notification body is retained as JSON for
//!   manual reconciliation

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::foundation::{
    CourseId, DomainError, ErrorCode, OwnedByUser, PlanId, StateMachine, Timestamp, TransactionId,
    UserId,
};

/// Payment lifecycle status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Awaiting payment confirmation from the gateway.
    Pending,

    /// Payment confirmed. The purchased item has been granted.
    Paid,

    /// Payment denied, cancelled or expired at the gateway.
    Cancelled,

    /// Never paid and past its local expiry window.
    Expired,
}

impl StateMachine for TransactionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use TransactionStatus::*;
        matches!(
            (self, target),
            // Gateway re-notifications of "pending" are a permitted no-op.
            (Pending, Pending) | (Pending, Paid) | (Pending, Cancelled) | (Pending, Expired)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use TransactionStatus::*;
        match self {
            Pending => vec![Pending, Paid, Cancelled, Expired],
            Paid | Cancelled | Expired => vec![],
        }
    }
}

/// The item a transaction purchases.
///
/// Either a one-off course purchase or a subscription plan period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum PurchaseItem {
    Course(CourseId),
    Plan(PlanId),
}

impl PurchaseItem {
    /// Stable kind discriminator used for persistence.
    pub fn kind(&self) -> &'static str {
        match self {
            PurchaseItem::Course(_) => "course",
            PurchaseItem::Plan(_) => "plan",
        }
    }

    /// UUID of the referenced item.
    pub fn item_uuid(&self) -> uuid::Uuid {
        match self {
            PurchaseItem::Course(id) => *id.as_uuid(),
            PurchaseItem::Plan(id) => *id.as_uuid(),
        }
    }

    /// Rebuilds the item from its persisted (kind, uuid) pair.
    pub fn from_parts(kind: &str, id: uuid::Uuid) -> Result<Self, DomainError> {
        match kind {
            "course" => Ok(PurchaseItem::Course(CourseId::from_uuid(id))),
            "plan" => Ok(PurchaseItem::Plan(PlanId::from_uuid(id))),
            other => Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid purchase item kind: {}", other),
            )),
        }
    }
}

/// Outcome of applying a gateway-reported status to a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// The transaction just transitioned to Paid.
    BecamePaid,
    /// The transaction just transitioned to Cancelled.
    BecameCancelled,
    /// No state change (still pending, or re-notification of current state).
    Unchanged,
}

/// Transaction aggregate.
///
/// # Invariants
///
/// - `amount` is non-negative
/// - `order_ref` is globally unique (the key the gateway reports back)
/// - status transitions follow the state machine: only `Pending` moves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier for this transaction.
    pub id: TransactionId,

    /// User who owns this transaction.
    pub user_id: UserId,

    /// The purchased item.
    pub item: PurchaseItem,

    /// Amount in minor currency units.
    pub amount: i64,

    /// Payment method reported at checkout (e.g. "bank_transfer").
    pub payment_method: String,

    /// Customer email captured at checkout, used for the confirmation
    /// notification.
    pub customer_email: String,

    /// Current lifecycle status.
    pub status: TransactionStatus,

    /// Order reference sent to (and reported back by) the gateway.
    pub order_ref: String,

    /// Raw gateway metadata from the most recent notification.
    pub gateway_metadata: Option<JsonValue>,

    /// Reference to an uploaded proof-of-payment attachment, if any.
    pub proof_of_payment: Option<String>,

    /// When payment was confirmed.
    pub paid_at: Option<Timestamp>,

    /// When this pending transaction stops being payable.
    pub expires_at: Timestamp,

    /// When the transaction was created.
    pub created_at: Timestamp,

    /// When the transaction was last updated.
    pub updated_at: Timestamp,
}

impl Transaction {
    /// Creates a new pending transaction awaiting payment.
    pub fn create_pending(
        id: TransactionId,
        user_id: UserId,
        item: PurchaseItem,
        amount: i64,
        payment_method: impl Into<String>,
        customer_email: impl Into<String>,
        order_ref: impl Into<String>,
        expires_at: Timestamp,
    ) -> Result<Self, DomainError> {
        if amount < 0 {
            return Err(DomainError::validation(
                "amount",
                "Amount must not be negative",
            ));
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            user_id,
            item,
            amount,
            payment_method: payment_method.into(),
            customer_email: customer_email.into(),
            status: TransactionStatus::Pending,
            order_ref: order_ref.into(),
            gateway_metadata: None,
            proof_of_payment: None,
            paid_at: None,
            expires_at,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies a gateway-reported status, retaining the notification body as
    /// metadata.
    ///
    /// Re-notifications of the current state are a no-op. Once a transaction
    /// has left `Pending`, any conflicting gateway status is rejected - those
    /// cases require manual reconciliation.
    pub fn apply_gateway_status(
        &mut self,
        target: TransactionStatus,
        metadata: JsonValue,
    ) -> Result<CallbackOutcome, DomainError> {
        if target == self.status {
            self.gateway_metadata = Some(metadata);
            self.updated_at = Timestamp::now();
            return Ok(CallbackOutcome::Unchanged);
        }

        if self.status != TransactionStatus::Pending {
            return Err(DomainError::new(
                ErrorCode::TransactionFinal,
                format!(
                    "Transaction {} is {:?}; gateway reported {:?}",
                    self.order_ref, self.status, target
                ),
            ));
        }

        self.status = self.status.transition_to(target)?;
        self.gateway_metadata = Some(metadata);
        let now = Timestamp::now();
        self.updated_at = now;

        match target {
            TransactionStatus::Paid => {
                self.paid_at = Some(now);
                Ok(CallbackOutcome::BecamePaid)
            }
            TransactionStatus::Cancelled => Ok(CallbackOutcome::BecameCancelled),
            TransactionStatus::Pending | TransactionStatus::Expired => {
                Ok(CallbackOutcome::Unchanged)
            }
        }
    }

    /// Marks a pending transaction as expired (local expiry sweep).
    pub fn mark_expired(&mut self) -> Result<(), DomainError> {
        self.status = self.status.transition_to(TransactionStatus::Expired)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Attaches a proof-of-payment reference.
    pub fn attach_proof(&mut self, reference: impl Into<String>) -> Result<(), DomainError> {
        let reference = reference.into();
        if reference.is_empty() {
            return Err(DomainError::validation(
                "proof_of_payment",
                "Attachment reference cannot be empty",
            ));
        }
        self.proof_of_payment = Some(reference);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// True if the transaction is pending and past its expiry window.
    pub fn is_payable_expired(&self, now: Timestamp) -> bool {
        self.status == TransactionStatus::Pending && now.is_after(&self.expires_at)
    }
}

impl OwnedByUser for Transaction {
    fn owner_id(&self) -> &UserId {
        &self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pending_course_transaction() -> Transaction {
        Transaction::create_pending(
            TransactionId::new(),
            UserId::new(),
            PurchaseItem::Course(CourseId::new()),
            150_000,
            "bank_transfer",
            "student@example.com",
            "LF-TEST-1",
            Timestamp::now().add_hours(24),
        )
        .unwrap()
    }

    #[test]
    fn create_pending_starts_in_pending_status() {
        let tx = pending_course_transaction();
        assert_eq!(tx.status, TransactionStatus::Pending);
        assert!(tx.paid_at.is_none());
        assert!(tx.gateway_metadata.is_none());
    }

    #[test]
    fn create_pending_rejects_negative_amount() {
        let result = Transaction::create_pending(
            TransactionId::new(),
            UserId::new(),
            PurchaseItem::Plan(PlanId::new()),
            -1,
            "credit_card",
            "student@example.com",
            "LF-TEST-2",
            Timestamp::now().add_hours(24),
        );
        assert!(result.is_err());
    }

    #[test]
    fn apply_paid_sets_paid_at_and_reports_became_paid() {
        let mut tx = pending_course_transaction();

        let outcome = tx
            .apply_gateway_status(TransactionStatus::Paid, json!({"transaction_status": "settlement"}))
            .unwrap();

        assert_eq!(outcome, CallbackOutcome::BecamePaid);
        assert_eq!(tx.status, TransactionStatus::Paid);
        assert!(tx.paid_at.is_some());
        assert!(tx.gateway_metadata.is_some());
    }

    #[test]
    fn apply_cancelled_reports_became_cancelled() {
        let mut tx = pending_course_transaction();

        let outcome = tx
            .apply_gateway_status(TransactionStatus::Cancelled, json!({"transaction_status": "deny"}))
            .unwrap();

        assert_eq!(outcome, CallbackOutcome::BecameCancelled);
        assert_eq!(tx.status, TransactionStatus::Cancelled);
        assert!(tx.paid_at.is_none());
    }

    #[test]
    fn pending_renotification_is_a_noop_but_keeps_metadata() {
        let mut tx = pending_course_transaction();

        let outcome = tx
            .apply_gateway_status(TransactionStatus::Pending, json!({"transaction_status": "pending"}))
            .unwrap();

        assert_eq!(outcome, CallbackOutcome::Unchanged);
        assert_eq!(tx.status, TransactionStatus::Pending);
        assert_eq!(
            tx.gateway_metadata.as_ref().unwrap()["transaction_status"],
            "pending"
        );
    }

    #[test]
    fn renotification_of_paid_state_is_a_noop() {
        let mut tx = pending_course_transaction();
        tx.apply_gateway_status(TransactionStatus::Paid, json!({})).unwrap();

        let outcome = tx
            .apply_gateway_status(TransactionStatus::Paid, json!({"second": true}))
            .unwrap();

        assert_eq!(outcome, CallbackOutcome::Unchanged);
    }

    #[test]
    fn conflicting_status_after_paid_is_rejected() {
        let mut tx = pending_course_transaction();
        tx.apply_gateway_status(TransactionStatus::Paid, json!({})).unwrap();

        let result = tx.apply_gateway_status(TransactionStatus::Cancelled, json!({}));

        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code, ErrorCode::TransactionFinal);
        assert_eq!(tx.status, TransactionStatus::Paid);
    }

    #[test]
    fn mark_expired_only_from_pending() {
        let mut tx = pending_course_transaction();
        assert!(tx.mark_expired().is_ok());
        assert_eq!(tx.status, TransactionStatus::Expired);

        let mut paid = pending_course_transaction();
        paid.apply_gateway_status(TransactionStatus::Paid, json!({})).unwrap();
        assert!(paid.mark_expired().is_err());
    }

    #[test]
    fn is_payable_expired_checks_status_and_window() {
        let mut tx = pending_course_transaction();
        let past_expiry = tx.expires_at.plus_secs(1);

        assert!(tx.is_payable_expired(past_expiry));
        assert!(!tx.is_payable_expired(Timestamp::now()));

        tx.apply_gateway_status(TransactionStatus::Paid, json!({})).unwrap();
        assert!(!tx.is_payable_expired(past_expiry));
    }

    #[test]
    fn attach_proof_rejects_empty_reference() {
        let mut tx = pending_course_transaction();
        assert!(tx.attach_proof("").is_err());
        assert!(tx.attach_proof("uploads/receipt-1.png").is_ok());
        assert_eq!(tx.proof_of_payment.as_deref(), Some("uploads/receipt-1.png"));
    }

    #[test]
    fn purchase_item_roundtrips_through_parts() {
        let course = PurchaseItem::Course(CourseId::new());
        let rebuilt = PurchaseItem::from_parts(course.kind(), course.item_uuid()).unwrap();
        assert_eq!(course, rebuilt);

        let plan = PurchaseItem::Plan(PlanId::new());
        let rebuilt = PurchaseItem::from_parts(plan.kind(), plan.item_uuid()).unwrap();
        assert_eq!(plan, rebuilt);
    }

    #[test]
    fn purchase_item_rejects_unknown_kind() {
        let result = PurchaseItem::from_parts("bundle", uuid::Uuid::new_v4());
        assert!(result.is_err());
    }

    #[test]
    fn paid_cancelled_expired_are_terminal() {
        assert!(TransactionStatus::Paid.is_terminal());
        assert!(TransactionStatus::Cancelled.is_terminal());
        assert!(TransactionStatus::Expired.is_terminal());
        assert!(!TransactionStatus::Pending.is_terminal());
    }
}
