//! CreateCheckoutHandler - opens a pending transaction and a gateway
//! payment session.

use std::sync::Arc;

use crate::domain::billing::{
    BillingError, CheckoutCreated, PurchaseItem, Transaction,
};
use crate::domain::foundation::{
    CourseId, EventId, PlanId, SerializableDomainEvent, SubscriptionId, Timestamp, TransactionId,
    UserId,
};
use crate::domain::subscription::Subscription;
use crate::ports::{
    CourseRepository, CreatePaymentRequest, EnrollmentRepository, EventPublisher, PaymentGateway,
    SubscriptionRepository, TransactionRepository,
};

use super::super::user::ProgressionService;

/// The item being checked out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutItem {
    Course(CourseId),
    Plan(PlanId),
}

/// Command to start a checkout.
#[derive(Debug, Clone)]
pub struct CreateCheckoutCommand {
    pub user_id: UserId,
    pub email: String,
    pub item: CheckoutItem,
    pub payment_method: String,
}

/// Result of a checkout.
#[derive(Debug, Clone)]
pub struct CreateCheckoutResult {
    pub transaction: Transaction,
    /// URL the frontend redirects the customer to.
    pub redirect_url: String,
}

/// Handler for checkout creation.
pub struct CreateCheckoutHandler {
    courses: Arc<dyn CourseRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    transactions: Arc<dyn TransactionRepository>,
    gateway: Arc<dyn PaymentGateway>,
    progression: Arc<ProgressionService>,
    event_publisher: Arc<dyn EventPublisher>,
    expiry_hours: u64,
}

impl CreateCheckoutHandler {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        courses: Arc<dyn CourseRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
        transactions: Arc<dyn TransactionRepository>,
        gateway: Arc<dyn PaymentGateway>,
        progression: Arc<ProgressionService>,
        event_publisher: Arc<dyn EventPublisher>,
        expiry_hours: u64,
    ) -> Self {
        Self {
            courses,
            enrollments,
            subscriptions,
            transactions,
            gateway,
            progression,
            event_publisher,
            expiry_hours,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateCheckoutCommand,
    ) -> Result<CreateCheckoutResult, BillingError> {
        let (item, amount, item_name) = self.resolve_item(&cmd).await?;

        let transaction_id = TransactionId::new();
        let order_ref = format!("LF-{}", transaction_id.as_uuid().simple());
        let expires_at = Timestamp::now().add_hours(self.expiry_hours as i64);

        let transaction = Transaction::create_pending(
            transaction_id,
            cmd.user_id,
            item,
            amount,
            cmd.payment_method.clone(),
            cmd.email.clone(),
            order_ref.clone(),
            expires_at,
        )?;
        self.transactions.save(&transaction).await.map_err(|e| {
            BillingError::infrastructure(format!("Failed to save transaction: {}", e))
        })?;

        // A plan checkout opens the pending subscription the payment will
        // later activate.
        if let PurchaseItem::Plan(plan_id) = item {
            if self
                .subscriptions
                .find_live_by_user(&cmd.user_id)
                .await
                .map_err(|e| BillingError::infrastructure(e.to_string()))?
                .is_none()
            {
                let subscription = Subscription::open(SubscriptionId::new(), cmd.user_id, plan_id);
                self.subscriptions
                    .save(&subscription)
                    .await
                    .map_err(|e| BillingError::infrastructure(e.to_string()))?;
            }
        }

        self.progression
            .attach_email(&cmd.user_id, &cmd.email)
            .await
            .map_err(|e| BillingError::infrastructure(e.to_string()))?;

        let session = self
            .gateway
            .create_payment(CreatePaymentRequest {
                order_ref: order_ref.clone(),
                amount,
                customer_email: cmd.email.clone(),
                item_name,
            })
            .await
            .map_err(|e| BillingError::gateway_failed(e.to_string()))?;

        let event = CheckoutCreated {
            event_id: EventId::new(),
            transaction_id: transaction.id,
            user_id: transaction.user_id,
            item,
            amount,
            order_ref,
            occurred_at: Timestamp::now(),
        };
        self.event_publisher
            .publish(event.to_envelope())
            .await
            .map_err(|e| BillingError::infrastructure(e.to_string()))?;

        Ok(CreateCheckoutResult {
            transaction,
            redirect_url: session.redirect_url,
        })
    }

    async fn resolve_item(
        &self,
        cmd: &CreateCheckoutCommand,
    ) -> Result<(PurchaseItem, i64, String), BillingError> {
        match cmd.item {
            CheckoutItem::Course(course_id) => {
                let course = self
                    .courses
                    .find_by_id(&course_id)
                    .await
                    .map_err(|e| BillingError::infrastructure(e.to_string()))?
                    .ok_or_else(|| BillingError::item_not_purchasable("course does not exist"))?;

                if !course.is_purchasable() {
                    return Err(BillingError::item_not_purchasable(
                        "course is not published",
                    ));
                }
                if course.is_free() {
                    return Err(BillingError::item_not_purchasable(
                        "free courses are enrolled directly",
                    ));
                }
                if self
                    .enrollments
                    .find_by_user_and_course(&cmd.user_id, &course_id)
                    .await
                    .map_err(|e| BillingError::infrastructure(e.to_string()))?
                    .is_some()
                {
                    return Err(BillingError::item_not_purchasable(
                        "user is already enrolled in this course",
                    ));
                }

                Ok((PurchaseItem::Course(course_id), course.price, course.title))
            }
            CheckoutItem::Plan(plan_id) => {
                let plan = self
                    .subscriptions
                    .find_plan(&plan_id)
                    .await
                    .map_err(|e| BillingError::infrastructure(e.to_string()))?
                    .ok_or_else(|| BillingError::item_not_purchasable("plan does not exist"))?;

                if !plan.active {
                    return Err(BillingError::item_not_purchasable("plan has been retired"));
                }

                Ok((PurchaseItem::Plan(plan_id), plan.price, plan.name))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::gateway::MockPaymentGateway;
    use crate::adapters::memory::{
        InMemoryCourses, InMemoryEnrollments, InMemoryProfiles, InMemorySubscriptions,
        InMemoryTransactions,
    };
    use crate::domain::billing::TransactionStatus;
    use crate::domain::catalog::{Course, CourseLevel};
    use crate::domain::subscription::SubscriptionPlan;

    struct Fixture {
        handler: CreateCheckoutHandler,
        courses: Arc<InMemoryCourses>,
        subscriptions: Arc<InMemorySubscriptions>,
        transactions: Arc<InMemoryTransactions>,
    }

    fn fixture() -> Fixture {
        let courses = Arc::new(InMemoryCourses::new());
        let enrollments = Arc::new(InMemoryEnrollments::new());
        let subscriptions = Arc::new(InMemorySubscriptions::new());
        let transactions = Arc::new(InMemoryTransactions::new());
        let handler = CreateCheckoutHandler::new(
            courses.clone(),
            enrollments,
            subscriptions.clone(),
            transactions.clone(),
            Arc::new(MockPaymentGateway::new()),
            Arc::new(ProgressionService::new(Arc::new(InMemoryProfiles::new()))),
            Arc::new(InMemoryEventBus::new()),
            24,
        );
        Fixture {
            handler,
            courses,
            subscriptions,
            transactions,
        }
    }

    async fn seed_published_course(fixture: &Fixture, price: i64) -> Course {
        let mut course = Course::create(
            CourseId::new(),
            UserId::new(),
            "Tokio Internals",
            "tokio-internals",
            "",
            price,
            CourseLevel::Advanced,
        )
        .unwrap();
        course.publish().unwrap();
        fixture.courses.save(&course).await.unwrap();
        course
    }

    #[tokio::test]
    async fn course_checkout_opens_pending_transaction() {
        let fixture = fixture();
        let course = seed_published_course(&fixture, 250_000).await;
        let user = UserId::new();

        let result = fixture
            .handler
            .handle(CreateCheckoutCommand {
                user_id: user,
                email: "student@example.com".to_string(),
                item: CheckoutItem::Course(course.id),
                payment_method: "bank_transfer".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result.transaction.status, TransactionStatus::Pending);
        assert_eq!(result.transaction.amount, 250_000);
        assert!(result.redirect_url.starts_with("https://gateway.test/pay/"));

        let stored = fixture
            .transactions
            .find_by_order_ref(&result.transaction.order_ref)
            .await
            .unwrap();
        assert!(stored.is_some());
    }

    #[tokio::test]
    async fn free_course_checkout_is_rejected() {
        let fixture = fixture();
        let course = seed_published_course(&fixture, 0).await;

        let err = fixture
            .handler
            .handle(CreateCheckoutCommand {
                user_id: UserId::new(),
                email: "student@example.com".to_string(),
                item: CheckoutItem::Course(course.id),
                payment_method: "bank_transfer".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, BillingError::ItemNotPurchasable { .. }));
    }

    #[tokio::test]
    async fn plan_checkout_opens_pending_subscription() {
        let fixture = fixture();
        let plan = SubscriptionPlan::create(PlanId::new(), "Monthly", 99_000, 30).unwrap();
        fixture.subscriptions.save_plan(&plan).await.unwrap();
        let user = UserId::new();

        fixture
            .handler
            .handle(CreateCheckoutCommand {
                user_id: user,
                email: "student@example.com".to_string(),
                item: CheckoutItem::Plan(plan.id),
                payment_method: "credit_card".to_string(),
            })
            .await
            .unwrap();

        let subscription = fixture
            .subscriptions
            .find_live_by_user(&user)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(subscription.plan_id, plan.id);
    }

    #[tokio::test]
    async fn unknown_plan_is_rejected() {
        let fixture = fixture();
        let err = fixture
            .handler
            .handle(CreateCheckoutCommand {
                user_id: UserId::new(),
                email: "student@example.com".to_string(),
                item: CheckoutItem::Plan(PlanId::new()),
                payment_method: "credit_card".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, BillingError::ItemNotPurchasable { .. }));
    }
}
