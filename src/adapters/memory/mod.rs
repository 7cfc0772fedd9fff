//! In-memory adapter implementations.
//!
//! Used by unit and integration tests, and by local development without a
//! database. Each store is a Mutex-guarded Vec mirroring the constraints the
//! Postgres adapters enforce (unique slugs, one enrollment per user+course,
//! first-writer-wins webhook records).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::article::Article;
use crate::domain::billing::Transaction;
use crate::domain::catalog::Course;
use crate::domain::enrollment::{Enrollment, EnrollmentStatus};
use crate::domain::foundation::{
    ApplicationId, ArticleId, CourseId, DomainError, EnrollmentId, ErrorCode, JobId,
    MentoringSessionId, PlanId, ScholarshipId, SubscriptionId, Timestamp, TransactionId, UserId,
};
use crate::domain::mentoring::{MentoringSession, SessionStatus};
use crate::domain::scholarship::{Scholarship, ScholarshipApplication, ScholarshipStatus};
use crate::domain::subscription::{Subscription, SubscriptionPlan, SubscriptionStatus};
use crate::domain::user::{Achievement, AchievementKind, Profile};
use crate::ports::{
    ArticleRepository, CourseRepository, EnrollmentRepository, JobQueue, JobStatus,
    MentoringSessionRepository, ProfileRepository, QueuedJob, SaveResult, ScholarshipRepository,
    SubscriptionRepository, TransactionRepository, WebhookEventRecord, WebhookEventRepository,
};

fn db_error(message: impl Into<String>) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, message)
}

/// In-memory course store.
#[derive(Default)]
pub struct InMemoryCourses {
    courses: Mutex<Vec<Course>>,
}

impl InMemoryCourses {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CourseRepository for InMemoryCourses {
    async fn save(&self, course: &Course) -> Result<(), DomainError> {
        let mut courses = self.courses.lock().unwrap();
        if courses.iter().any(|c| c.slug == course.slug) {
            return Err(DomainError::new(ErrorCode::SlugTaken, "Slug is already taken")
                .with_detail("slug", course.slug.clone()));
        }
        courses.push(course.clone());
        Ok(())
    }

    async fn update(&self, course: &Course) -> Result<(), DomainError> {
        let mut courses = self.courses.lock().unwrap();
        match courses.iter_mut().find(|c| c.id == course.id) {
            Some(c) => {
                *c = course.clone();
                Ok(())
            }
            None => Err(db_error("Course not found")),
        }
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, DomainError> {
        Ok(self.courses.lock().unwrap().iter().find(|c| &c.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Course>, DomainError> {
        Ok(self
            .courses
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.slug == slug)
            .cloned())
    }

    async fn list_published(&self) -> Result<Vec<Course>, DomainError> {
        Ok(self
            .courses
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.is_purchasable())
            .cloned()
            .collect())
    }

    async fn list_by_mentor(&self, mentor_id: &UserId) -> Result<Vec<Course>, DomainError> {
        Ok(self
            .courses
            .lock()
            .unwrap()
            .iter()
            .filter(|c| &c.mentor_id == mentor_id)
            .cloned()
            .collect())
    }
}

/// In-memory enrollment store.
#[derive(Default)]
pub struct InMemoryEnrollments {
    enrollments: Mutex<Vec<Enrollment>>,
}

impl InMemoryEnrollments {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryEnrollments {
    async fn save(&self, enrollment: &Enrollment) -> Result<(), DomainError> {
        let mut enrollments = self.enrollments.lock().unwrap();
        if enrollments
            .iter()
            .any(|e| e.user_id == enrollment.user_id && e.course_id == enrollment.course_id)
        {
            return Err(DomainError::new(
                ErrorCode::AlreadyEnrolled,
                "User is already enrolled in this course",
            ));
        }
        enrollments.push(enrollment.clone());
        Ok(())
    }

    async fn update(&self, enrollment: &Enrollment) -> Result<(), DomainError> {
        let mut enrollments = self.enrollments.lock().unwrap();
        match enrollments.iter_mut().find(|e| e.id == enrollment.id) {
            Some(e) => {
                *e = enrollment.clone();
                Ok(())
            }
            None => Err(db_error("Enrollment not found")),
        }
    }

    async fn find_by_id(&self, id: &EnrollmentId) -> Result<Option<Enrollment>, DomainError> {
        Ok(self
            .enrollments
            .lock()
            .unwrap()
            .iter()
            .find(|e| &e.id == id)
            .cloned())
    }

    async fn find_by_user_and_course(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<Option<Enrollment>, DomainError> {
        Ok(self
            .enrollments
            .lock()
            .unwrap()
            .iter()
            .find(|e| &e.user_id == user_id && &e.course_id == course_id)
            .cloned())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Enrollment>, DomainError> {
        Ok(self
            .enrollments
            .lock()
            .unwrap()
            .iter()
            .filter(|e| &e.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn count_completed_by_user(&self, user_id: &UserId) -> Result<u64, DomainError> {
        Ok(self
            .enrollments
            .lock()
            .unwrap()
            .iter()
            .filter(|e| &e.user_id == user_id && e.status == EnrollmentStatus::Completed)
            .count() as u64)
    }

    async fn list_report_due(&self, due_by: Timestamp) -> Result<Vec<Enrollment>, DomainError> {
        Ok(self
            .enrollments
            .lock()
            .unwrap()
            .iter()
            .filter(|e| {
                e.status == EnrollmentStatus::Active
                    && e.next_report_due.is_some_and(|due| !due.is_after(&due_by))
            })
            .cloned()
            .collect())
    }
}

/// In-memory mentoring session store.
#[derive(Default)]
pub struct InMemoryMentoringSessions {
    sessions: Mutex<Vec<MentoringSession>>,
}

impl InMemoryMentoringSessions {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MentoringSessionRepository for InMemoryMentoringSessions {
    async fn save(&self, session: &MentoringSession) -> Result<(), DomainError> {
        self.sessions.lock().unwrap().push(session.clone());
        Ok(())
    }

    async fn update(&self, session: &MentoringSession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.lock().unwrap();
        match sessions.iter_mut().find(|s| s.id == session.id) {
            Some(s) => {
                *s = session.clone();
                Ok(())
            }
            None => Err(db_error("Session not found")),
        }
    }

    async fn find_by_id(
        &self,
        id: &MentoringSessionId,
    ) -> Result<Option<MentoringSession>, DomainError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| &s.id == id)
            .cloned())
    }

    async fn list_for_participant(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<MentoringSession>, DomainError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.is_participant(user_id))
            .cloned()
            .collect())
    }

    async fn count_completed_for_student(&self, user_id: &UserId) -> Result<u64, DomainError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| &s.student_id == user_id && s.status == SessionStatus::Completed)
            .count() as u64)
    }
}

/// In-memory scholarship store.
#[derive(Default)]
pub struct InMemoryScholarships {
    scholarships: Mutex<Vec<Scholarship>>,
    applications: Mutex<Vec<ScholarshipApplication>>,
}

impl InMemoryScholarships {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScholarshipRepository for InMemoryScholarships {
    async fn save(&self, scholarship: &Scholarship) -> Result<(), DomainError> {
        self.scholarships.lock().unwrap().push(scholarship.clone());
        Ok(())
    }

    async fn update(&self, scholarship: &Scholarship) -> Result<(), DomainError> {
        let mut scholarships = self.scholarships.lock().unwrap();
        match scholarships.iter_mut().find(|s| s.id == scholarship.id) {
            Some(s) => {
                *s = scholarship.clone();
                Ok(())
            }
            None => Err(db_error("Scholarship not found")),
        }
    }

    async fn find_by_id(&self, id: &ScholarshipId) -> Result<Option<Scholarship>, DomainError> {
        Ok(self
            .scholarships
            .lock()
            .unwrap()
            .iter()
            .find(|s| &s.id == id)
            .cloned())
    }

    async fn list_open(&self) -> Result<Vec<Scholarship>, DomainError> {
        Ok(self
            .scholarships
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.status == ScholarshipStatus::Open)
            .cloned()
            .collect())
    }

    async fn save_application(
        &self,
        application: &ScholarshipApplication,
    ) -> Result<(), DomainError> {
        let mut applications = self.applications.lock().unwrap();
        if applications.iter().any(|a| {
            a.scholarship_id == application.scholarship_id && a.user_id == application.user_id
        }) {
            return Err(DomainError::new(
                ErrorCode::AlreadyApplied,
                "User already applied to this scholarship",
            ));
        }
        applications.push(application.clone());
        Ok(())
    }

    async fn update_application(
        &self,
        application: &ScholarshipApplication,
    ) -> Result<(), DomainError> {
        let mut applications = self.applications.lock().unwrap();
        match applications.iter_mut().find(|a| a.id == application.id) {
            Some(a) => {
                *a = application.clone();
                Ok(())
            }
            None => Err(db_error("Application not found")),
        }
    }

    async fn find_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<ScholarshipApplication>, DomainError> {
        Ok(self
            .applications
            .lock()
            .unwrap()
            .iter()
            .find(|a| &a.id == id)
            .cloned())
    }

    async fn find_application_by_user(
        &self,
        scholarship_id: &ScholarshipId,
        user_id: &UserId,
    ) -> Result<Option<ScholarshipApplication>, DomainError> {
        Ok(self
            .applications
            .lock()
            .unwrap()
            .iter()
            .find(|a| &a.scholarship_id == scholarship_id && &a.user_id == user_id)
            .cloned())
    }

    async fn list_applications(
        &self,
        scholarship_id: &ScholarshipId,
    ) -> Result<Vec<ScholarshipApplication>, DomainError> {
        Ok(self
            .applications
            .lock()
            .unwrap()
            .iter()
            .filter(|a| &a.scholarship_id == scholarship_id)
            .cloned()
            .collect())
    }
}

/// In-memory subscription store.
#[derive(Default)]
pub struct InMemorySubscriptions {
    plans: Mutex<Vec<SubscriptionPlan>>,
    subscriptions: Mutex<Vec<Subscription>>,
}

impl InMemorySubscriptions {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptions {
    async fn save_plan(&self, plan: &SubscriptionPlan) -> Result<(), DomainError> {
        self.plans.lock().unwrap().push(plan.clone());
        Ok(())
    }

    async fn find_plan(&self, id: &PlanId) -> Result<Option<SubscriptionPlan>, DomainError> {
        Ok(self.plans.lock().unwrap().iter().find(|p| &p.id == id).cloned())
    }

    async fn list_active_plans(&self) -> Result<Vec<SubscriptionPlan>, DomainError> {
        let mut plans: Vec<_> = self
            .plans
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.active)
            .cloned()
            .collect();
        plans.sort_by_key(|p| p.price);
        Ok(plans)
    }

    async fn save(&self, subscription: &Subscription) -> Result<(), DomainError> {
        self.subscriptions.lock().unwrap().push(subscription.clone());
        Ok(())
    }

    async fn update(&self, subscription: &Subscription) -> Result<(), DomainError> {
        let mut subscriptions = self.subscriptions.lock().unwrap();
        match subscriptions.iter_mut().find(|s| s.id == subscription.id) {
            Some(s) => {
                *s = subscription.clone();
                Ok(())
            }
            None => Err(db_error("Subscription not found")),
        }
    }

    async fn find_by_id(&self, id: &SubscriptionId) -> Result<Option<Subscription>, DomainError> {
        Ok(self
            .subscriptions
            .lock()
            .unwrap()
            .iter()
            .find(|s| &s.id == id)
            .cloned())
    }

    async fn find_live_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Subscription>, DomainError> {
        Ok(self
            .subscriptions
            .lock()
            .unwrap()
            .iter()
            .find(|s| &s.user_id == user_id && s.status != SubscriptionStatus::Expired)
            .cloned())
    }

    async fn list_lapsed(&self, ended_by: Timestamp) -> Result<Vec<Subscription>, DomainError> {
        Ok(self
            .subscriptions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| {
                matches!(
                    s.status,
                    SubscriptionStatus::Active | SubscriptionStatus::Cancelled
                ) && !s.current_period_end.is_after(&ended_by)
            })
            .cloned()
            .collect())
    }
}

/// In-memory transaction store.
#[derive(Default)]
pub struct InMemoryTransactions {
    transactions: Mutex<Vec<Transaction>>,
}

impl InMemoryTransactions {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionRepository for InMemoryTransactions {
    async fn save(&self, transaction: &Transaction) -> Result<(), DomainError> {
        let mut transactions = self.transactions.lock().unwrap();
        if transactions.iter().any(|t| t.order_ref == transaction.order_ref) {
            return Err(db_error("Duplicate order reference"));
        }
        transactions.push(transaction.clone());
        Ok(())
    }

    async fn update(&self, transaction: &Transaction) -> Result<(), DomainError> {
        let mut transactions = self.transactions.lock().unwrap();
        match transactions.iter_mut().find(|t| t.id == transaction.id) {
            Some(t) => {
                *t = transaction.clone();
                Ok(())
            }
            None => Err(db_error("Transaction not found")),
        }
    }

    async fn find_by_id(&self, id: &TransactionId) -> Result<Option<Transaction>, DomainError> {
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .find(|t| &t.id == id)
            .cloned())
    }

    async fn find_by_order_ref(
        &self,
        order_ref: &str,
    ) -> Result<Option<Transaction>, DomainError> {
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.order_ref == order_ref)
            .cloned())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Transaction>, DomainError> {
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .filter(|t| &t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_pending_expired(
        &self,
        expired_by: Timestamp,
    ) -> Result<Vec<Transaction>, DomainError> {
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.is_payable_expired(expired_by))
            .cloned()
            .collect())
    }
}

/// In-memory article store.
#[derive(Default)]
pub struct InMemoryArticles {
    articles: Mutex<Vec<Article>>,
}

impl InMemoryArticles {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArticleRepository for InMemoryArticles {
    async fn save(&self, article: &Article) -> Result<(), DomainError> {
        let mut articles = self.articles.lock().unwrap();
        if articles.iter().any(|a| a.slug == article.slug) {
            return Err(DomainError::new(ErrorCode::SlugTaken, "Slug is already taken")
                .with_detail("slug", article.slug.clone()));
        }
        articles.push(article.clone());
        Ok(())
    }

    async fn update(&self, article: &Article) -> Result<(), DomainError> {
        let mut articles = self.articles.lock().unwrap();
        match articles.iter_mut().find(|a| a.id == article.id) {
            Some(a) => {
                *a = article.clone();
                Ok(())
            }
            None => Err(db_error("Article not found")),
        }
    }

    async fn find_by_id(&self, id: &ArticleId) -> Result<Option<Article>, DomainError> {
        Ok(self
            .articles
            .lock()
            .unwrap()
            .iter()
            .find(|a| &a.id == id)
            .cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Article>, DomainError> {
        Ok(self
            .articles
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.slug == slug)
            .cloned())
    }

    async fn list_published(&self) -> Result<Vec<Article>, DomainError> {
        Ok(self
            .articles
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.status == crate::domain::article::ArticleStatus::Published)
            .cloned()
            .collect())
    }

    async fn list_by_author(&self, author_id: &UserId) -> Result<Vec<Article>, DomainError> {
        Ok(self
            .articles
            .lock()
            .unwrap()
            .iter()
            .filter(|a| &a.author_id == author_id)
            .cloned()
            .collect())
    }
}

/// In-memory profile and achievement store.
#[derive(Default)]
pub struct InMemoryProfiles {
    profiles: Mutex<Vec<Profile>>,
    achievements: Mutex<Vec<Achievement>>,
}

impl InMemoryProfiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test helper: snapshot of a user's profile.
    pub fn profile_of(&self, user_id: &UserId) -> Option<Profile> {
        self.profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| &p.user_id == user_id)
            .cloned()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfiles {
    async fn save(&self, profile: &Profile) -> Result<(), DomainError> {
        self.profiles.lock().unwrap().push(profile.clone());
        Ok(())
    }

    async fn update(&self, profile: &Profile) -> Result<(), DomainError> {
        let mut profiles = self.profiles.lock().unwrap();
        match profiles.iter_mut().find(|p| p.user_id == profile.user_id) {
            Some(p) => {
                *p = profile.clone();
                Ok(())
            }
            None => Err(db_error("Profile not found")),
        }
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        Ok(self.profile_of(user_id))
    }

    async fn award_achievement(&self, achievement: &Achievement) -> Result<bool, DomainError> {
        let mut achievements = self.achievements.lock().unwrap();
        if achievements
            .iter()
            .any(|a| a.user_id == achievement.user_id && a.kind == achievement.kind)
        {
            return Ok(false);
        }
        achievements.push(achievement.clone());
        Ok(true)
    }

    async fn has_achievement(
        &self,
        user_id: &UserId,
        kind: AchievementKind,
    ) -> Result<bool, DomainError> {
        Ok(self
            .achievements
            .lock()
            .unwrap()
            .iter()
            .any(|a| &a.user_id == user_id && a.kind == kind))
    }

    async fn list_achievements(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Achievement>, DomainError> {
        Ok(self
            .achievements
            .lock()
            .unwrap()
            .iter()
            .filter(|a| &a.user_id == user_id)
            .cloned()
            .collect())
    }
}

/// In-memory webhook notification store (first-writer-wins).
#[derive(Default)]
pub struct InMemoryWebhookEvents {
    records: Mutex<Vec<WebhookEventRecord>>,
}

impl InMemoryWebhookEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test helper: number of recorded notifications.
    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl WebhookEventRepository for InMemoryWebhookEvents {
    async fn find_by_key(
        &self,
        event_key: &str,
    ) -> Result<Option<WebhookEventRecord>, DomainError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.event_key == event_key)
            .cloned())
    }

    async fn save(&self, record: WebhookEventRecord) -> Result<SaveResult, DomainError> {
        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.event_key == record.event_key) {
            return Ok(SaveResult::AlreadyExists);
        }
        records.push(record);
        Ok(SaveResult::Inserted)
    }

    async fn delete_before(&self, cutoff: Timestamp) -> Result<u64, DomainError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| !r.received_at.is_before(&cutoff));
        Ok((before - records.len()) as u64)
    }
}

/// In-memory job queue.
#[derive(Default)]
pub struct InMemoryJobQueue {
    jobs: Mutex<Vec<QueuedJob>>,
}

impl InMemoryJobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test helper: snapshot of all jobs.
    pub fn jobs(&self) -> Vec<QueuedJob> {
        self.jobs.lock().unwrap().clone()
    }

    /// Test helper: jobs of one kind.
    pub fn jobs_of_kind(&self, kind: crate::ports::JobKind) -> Vec<QueuedJob> {
        self.jobs
            .lock()
            .unwrap()
            .iter()
            .filter(|j| j.kind == kind)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl JobQueue for InMemoryJobQueue {
    async fn enqueue(&self, job: QueuedJob) -> Result<JobId, DomainError> {
        let id = job.id;
        self.jobs.lock().unwrap().push(job);
        Ok(id)
    }

    async fn fetch_due(&self, limit: u32) -> Result<Vec<QueuedJob>, DomainError> {
        let now = Timestamp::now();
        Ok(self
            .jobs
            .lock()
            .unwrap()
            .iter()
            .filter(|j| j.status == JobStatus::Pending && !j.run_at.is_after(&now))
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn mark_succeeded(&self, id: JobId) -> Result<(), DomainError> {
        let mut jobs = self.jobs.lock().unwrap();
        match jobs.iter_mut().find(|j| j.id == id) {
            Some(job) => {
                job.status = JobStatus::Succeeded;
                job.attempts += 1;
                Ok(())
            }
            None => Err(db_error("Job not found")),
        }
    }

    async fn mark_retry(
        &self,
        id: JobId,
        error: &str,
        retry_at: Timestamp,
    ) -> Result<(), DomainError> {
        let mut jobs = self.jobs.lock().unwrap();
        match jobs.iter_mut().find(|j| j.id == id) {
            Some(job) => {
                job.attempts += 1;
                job.last_error = Some(error.to_string());
                job.run_at = retry_at;
                Ok(())
            }
            None => Err(db_error("Job not found")),
        }
    }

    async fn mark_dead(&self, id: JobId, error: &str) -> Result<(), DomainError> {
        let mut jobs = self.jobs.lock().unwrap();
        match jobs.iter_mut().find(|j| j.id == id) {
            Some(job) => {
                job.status = JobStatus::Dead;
                job.attempts += 1;
                job.last_error = Some(error.to_string());
                Ok(())
            }
            None => Err(db_error("Job not found")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::CourseLevel;
    use crate::ports::JobKind;
    use serde_json::json;

    #[tokio::test]
    async fn courses_enforce_slug_uniqueness() {
        let repo = InMemoryCourses::new();
        let mentor = UserId::new();
        let a = Course::create(CourseId::new(), mentor, "A", "same-slug", "", 0, CourseLevel::Beginner)
            .unwrap();
        let b = Course::create(CourseId::new(), mentor, "B", "same-slug", "", 0, CourseLevel::Beginner)
            .unwrap();

        repo.save(&a).await.unwrap();
        let err = repo.save(&b).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SlugTaken);
    }

    #[tokio::test]
    async fn webhook_store_is_first_writer_wins() {
        let repo = InMemoryWebhookEvents::new();
        let record = WebhookEventRecord::accepted("LF-1:settlement:200", "LF-1", json!({}));

        assert_eq!(repo.save(record.clone()).await.unwrap(), SaveResult::Inserted);
        assert_eq!(repo.save(record).await.unwrap(), SaveResult::AlreadyExists);
        assert_eq!(repo.record_count(), 1);
    }

    #[tokio::test]
    async fn job_queue_fetches_only_due_pending_jobs() {
        let queue = InMemoryJobQueue::new();

        let due = QueuedJob::new(JobKind::SendPaymentConfirmation, json!({}), 5);
        let mut later = QueuedJob::new(JobKind::SendReportReminder, json!({}), 5);
        later.run_at = Timestamp::now().add_days(1);

        queue.enqueue(due.clone()).await.unwrap();
        queue.enqueue(later).await.unwrap();

        let fetched = queue.fetch_due(10).await.unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].id, due.id);
    }

    #[tokio::test]
    async fn job_retry_and_dead_track_attempts() {
        let queue = InMemoryJobQueue::new();
        let job = QueuedJob::new(JobKind::ProcessPaymentCallback, json!({}), 2);
        let id = queue.enqueue(job).await.unwrap();

        queue
            .mark_retry(id, "mail timeout", Timestamp::now().plus_secs(60))
            .await
            .unwrap();
        queue.mark_dead(id, "mail timeout").await.unwrap();

        let jobs = queue.jobs();
        assert_eq!(jobs[0].attempts, 2);
        assert_eq!(jobs[0].status, JobStatus::Dead);
        assert_eq!(jobs[0].last_error.as_deref(), Some("mail timeout"));
    }
}
