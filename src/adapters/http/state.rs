//! Shared application state for HTTP handlers.
//!
//! Cloned per request; all dependencies are Arc-wrapped ports. Application
//! handlers are constructed on demand from the shared state.

use std::sync::Arc;

use crate::application::handlers::article::{
    ArchiveArticleHandler, CreateArticleHandler, PublishArticleHandler, UpdateArticleHandler,
};
use crate::application::handlers::billing::{CreateCheckoutHandler, ReceiveCallbackHandler};
use crate::application::handlers::catalog::{
    ArchiveCourseHandler, CreateCourseHandler, PublishCourseHandler, UpdateCourseHandler,
};
use crate::application::handlers::enrollment::{
    EnrollFreeHandler, GrantEnrollmentHandler, SubmitReportHandler, UpdateProgressHandler,
};
use crate::application::handlers::mentoring::{
    CancelSessionHandler, CompleteSessionHandler, ConfirmSessionHandler, RequestSessionHandler,
};
use crate::application::handlers::scholarship::{
    ApplyScholarshipHandler, CloseScholarshipHandler, CreateScholarshipHandler,
    DecideApplicationHandler,
};
use crate::application::handlers::user::{ProgressionService, UpdateProfileHandler};
use crate::domain::billing::NotificationVerifier;
use crate::ports::{
    ArticleRepository, CourseRepository, EnrollmentRepository, EventPublisher, JobQueue,
    MentoringSessionRepository, PaymentGateway, ProfileRepository, ScholarshipRepository,
    SubscriptionRepository, TransactionRepository, WebhookEventRepository,
};

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct AppState {
    pub courses: Arc<dyn CourseRepository>,
    pub enrollments: Arc<dyn EnrollmentRepository>,
    pub mentoring_sessions: Arc<dyn MentoringSessionRepository>,
    pub scholarships: Arc<dyn ScholarshipRepository>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
    pub transactions: Arc<dyn TransactionRepository>,
    pub articles: Arc<dyn ArticleRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub webhook_events: Arc<dyn WebhookEventRepository>,
    pub job_queue: Arc<dyn JobQueue>,
    pub payment_gateway: Arc<dyn PaymentGateway>,
    pub event_publisher: Arc<dyn EventPublisher>,
    pub notification_verifier: Arc<NotificationVerifier>,
    pub progression: Arc<ProgressionService>,
    /// Hours a pending transaction stays payable.
    pub payment_expiry_hours: u64,
    /// Attempt ceiling for queued jobs.
    pub job_max_attempts: u32,
}

impl AppState {
    // Catalog

    pub fn create_course_handler(&self) -> CreateCourseHandler {
        CreateCourseHandler::new(self.courses.clone())
    }

    pub fn update_course_handler(&self) -> UpdateCourseHandler {
        UpdateCourseHandler::new(self.courses.clone())
    }

    pub fn publish_course_handler(&self) -> PublishCourseHandler {
        PublishCourseHandler::new(self.courses.clone())
    }

    pub fn archive_course_handler(&self) -> ArchiveCourseHandler {
        ArchiveCourseHandler::new(self.courses.clone())
    }

    // Enrollment

    pub fn grant_enrollment_handler(&self) -> Arc<GrantEnrollmentHandler> {
        Arc::new(GrantEnrollmentHandler::new(
            self.enrollments.clone(),
            self.progression.clone(),
            self.event_publisher.clone(),
        ))
    }

    pub fn enroll_free_handler(&self) -> EnrollFreeHandler {
        EnrollFreeHandler::new(self.courses.clone(), self.grant_enrollment_handler())
    }

    pub fn update_progress_handler(&self) -> UpdateProgressHandler {
        UpdateProgressHandler::new(
            self.enrollments.clone(),
            self.progression.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn submit_report_handler(&self) -> SubmitReportHandler {
        SubmitReportHandler::new(
            self.enrollments.clone(),
            self.progression.clone(),
            self.event_publisher.clone(),
        )
    }

    // Mentoring

    pub fn request_session_handler(&self) -> RequestSessionHandler {
        RequestSessionHandler::new(self.mentoring_sessions.clone())
    }

    pub fn confirm_session_handler(&self) -> ConfirmSessionHandler {
        ConfirmSessionHandler::new(self.mentoring_sessions.clone())
    }

    pub fn complete_session_handler(&self) -> CompleteSessionHandler {
        CompleteSessionHandler::new(self.mentoring_sessions.clone(), self.progression.clone())
    }

    pub fn cancel_session_handler(&self) -> CancelSessionHandler {
        CancelSessionHandler::new(self.mentoring_sessions.clone())
    }

    // Scholarship

    pub fn create_scholarship_handler(&self) -> CreateScholarshipHandler {
        CreateScholarshipHandler::new(self.scholarships.clone(), self.courses.clone())
    }

    pub fn close_scholarship_handler(&self) -> CloseScholarshipHandler {
        CloseScholarshipHandler::new(self.scholarships.clone())
    }

    pub fn apply_scholarship_handler(&self) -> ApplyScholarshipHandler {
        ApplyScholarshipHandler::new(self.scholarships.clone())
    }

    pub fn decide_application_handler(&self) -> DecideApplicationHandler {
        DecideApplicationHandler::new(
            self.scholarships.clone(),
            self.grant_enrollment_handler(),
            self.progression.clone(),
        )
    }

    // Billing

    pub fn create_checkout_handler(&self) -> CreateCheckoutHandler {
        CreateCheckoutHandler::new(
            self.courses.clone(),
            self.enrollments.clone(),
            self.subscriptions.clone(),
            self.transactions.clone(),
            self.payment_gateway.clone(),
            self.progression.clone(),
            self.event_publisher.clone(),
            self.payment_expiry_hours,
        )
    }

    pub fn receive_callback_handler(&self) -> ReceiveCallbackHandler {
        ReceiveCallbackHandler::new(
            self.notification_verifier.clone(),
            self.transactions.clone(),
            self.webhook_events.clone(),
            self.job_queue.clone(),
            self.job_max_attempts,
        )
    }

    // Article

    pub fn create_article_handler(&self) -> CreateArticleHandler {
        CreateArticleHandler::new(self.articles.clone())
    }

    pub fn update_article_handler(&self) -> UpdateArticleHandler {
        UpdateArticleHandler::new(self.articles.clone())
    }

    pub fn publish_article_handler(&self) -> PublishArticleHandler {
        PublishArticleHandler::new(self.articles.clone())
    }

    pub fn archive_article_handler(&self) -> ArchiveArticleHandler {
        ArchiveArticleHandler::new(self.articles.clone())
    }

    // Profile

    pub fn update_profile_handler(&self) -> UpdateProfileHandler {
        UpdateProfileHandler::new(self.profiles.clone(), self.progression.clone())
    }
}
