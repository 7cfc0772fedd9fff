//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! One repository per aggregate, plus:
//! - `WebhookEventRepository` - gateway notification idempotency tracking
//! - `JobQueue` - persisted background jobs with bounded retries
//!
//! ## Integration Ports
//!
//! - `PaymentGateway` - gateway checkout API
//! - `Mailer` - outbound notification email
//! - `EventPublisher` - domain event publication
//! - `TokenVerifier` - bearer token validation

mod article_repository;
mod course_repository;
mod enrollment_repository;
mod event_publisher;
mod job_queue;
mod mailer;
mod mentoring_repository;
mod payment_gateway;
mod profile_repository;
mod scholarship_repository;
mod subscription_repository;
mod token_verifier;
mod transaction_repository;
mod webhook_event_repository;

pub use article_repository::ArticleRepository;
pub use course_repository::CourseRepository;
pub use enrollment_repository::EnrollmentRepository;
pub use event_publisher::EventPublisher;
pub use job_queue::{JobKind, JobQueue, JobStatus, QueuedJob};
pub use mailer::{EmailMessage, Mailer, MailerError};
pub use mentoring_repository::MentoringSessionRepository;
pub use payment_gateway::{CreatePaymentRequest, GatewayError, PaymentGateway, PaymentSession};
pub use profile_repository::ProfileRepository;
pub use scholarship_repository::ScholarshipRepository;
pub use subscription_repository::SubscriptionRepository;
pub use token_verifier::TokenVerifier;
pub use transaction_repository::TransactionRepository;
pub use webhook_event_repository::{
    SaveResult, WebhookDisposition, WebhookEventRecord, WebhookEventRepository, WebhookResult,
};
