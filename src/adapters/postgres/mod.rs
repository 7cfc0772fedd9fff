//! PostgreSQL adapter - sqlx repositories, job queue and webhook store.

mod article_repository;
mod course_repository;
mod enrollment_repository;
mod job_queue;
mod mentoring_repository;
mod pool;
mod profile_repository;
mod scholarship_repository;
mod subscription_repository;
mod transaction_repository;
mod webhook_event_repository;

pub use article_repository::PostgresArticleRepository;
pub use course_repository::PostgresCourseRepository;
pub use enrollment_repository::PostgresEnrollmentRepository;
pub use job_queue::PostgresJobQueue;
pub use mentoring_repository::PostgresMentoringSessionRepository;
pub use pool::connect_pool;
pub use profile_repository::PostgresProfileRepository;
pub use scholarship_repository::PostgresScholarshipRepository;
pub use subscription_repository::PostgresSubscriptionRepository;
pub use transaction_repository::PostgresTransactionRepository;
pub use webhook_event_repository::PostgresWebhookEventRepository;
