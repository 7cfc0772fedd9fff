//! Enrollment aggregate entity.
//!
//! An enrollment joins a user to a course and tracks completion progress
//! plus the progress-report schedule. Enrollments are created by the billing
//! flow (paid course transaction), by a scholarship award, or directly for
//! free courses.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    CourseId, DomainError, EnrollmentId, OwnedByUser, StateMachine, Timestamp, UserId,
};

/// Days between successive progress reports.
pub const REPORT_CADENCE_DAYS: i64 = 7;

/// Grace period after the due date before a report counts as overdue.
pub const REPORT_GRACE_DAYS: i64 = 2;

/// Lifecycle status of an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    /// Student is taking the course.
    Active,

    /// Progress reached 100 percent.
    Completed,

    /// Access withdrawn by an administrator.
    Revoked,
}

impl StateMachine for EnrollmentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use EnrollmentStatus::*;
        matches!((self, target), (Active, Completed) | (Active, Revoked))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use EnrollmentStatus::*;
        match self {
            Active => vec![Completed, Revoked],
            Completed | Revoked => vec![],
        }
    }
}

/// Where an enrollment currently stands in its report schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportState {
    /// Next report due date is in the future.
    Upcoming,

    /// Due date has passed but the grace period has not.
    Due,

    /// Past due date and grace period.
    Overdue,

    /// No report scheduled (completed or revoked enrollment).
    NotScheduled,
}

/// Enrollment aggregate.
///
/// # Invariants
///
/// - (user_id, course_id) is unique
/// - `progress` is 0-100 and never decreases
/// - reaching 100 percent completes the enrollment and clears the report
///   schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: EnrollmentId,

    /// Student who owns this enrollment.
    pub user_id: UserId,

    pub course_id: CourseId,

    pub status: EnrollmentStatus,

    /// Completion progress, 0-100.
    pub progress: u8,

    /// When the next progress report is due. None once completed or revoked.
    pub next_report_due: Option<Timestamp>,

    pub enrolled_at: Timestamp,

    pub completed_at: Option<Timestamp>,

    pub updated_at: Timestamp,
}

impl Enrollment {
    /// Creates a new active enrollment with the first report due one cadence
    /// after enrollment.
    pub fn create(id: EnrollmentId, user_id: UserId, course_id: CourseId) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            user_id,
            course_id,
            status: EnrollmentStatus::Active,
            progress: 0,
            next_report_due: Some(now.add_days(REPORT_CADENCE_DAYS)),
            enrolled_at: now,
            completed_at: None,
            updated_at: now,
        }
    }

    /// Updates completion progress.
    ///
    /// Progress is monotonic: a value lower than the current one is rejected.
    /// Reaching 100 completes the enrollment.
    ///
    /// Returns `true` if this update completed the enrollment.
    pub fn update_progress(&mut self, progress: u8) -> Result<bool, DomainError> {
        if self.status != EnrollmentStatus::Active {
            return Err(DomainError::new(
                crate::domain::foundation::ErrorCode::InvalidStateTransition,
                format!("Cannot update progress of {:?} enrollment", self.status),
            ));
        }
        if progress > 100 {
            return Err(DomainError::validation(
                "progress",
                "Progress must be between 0 and 100",
            ));
        }
        if progress < self.progress {
            return Err(DomainError::validation(
                "progress",
                format!(
                    "Progress cannot decrease (current {}, got {})",
                    self.progress, progress
                ),
            ));
        }

        self.progress = progress;
        self.updated_at = Timestamp::now();

        if progress == 100 {
            self.status = self.status.transition_to(EnrollmentStatus::Completed)?;
            self.completed_at = Some(self.updated_at);
            self.next_report_due = None;
            return Ok(true);
        }
        Ok(false)
    }

    /// Records a submitted progress report and advances the schedule.
    ///
    /// The next due date is one cadence after the *later* of the previous due
    /// date and the submission time: early submissions do not compress the
    /// cadence, and a late submission does not leave the next report already
    /// overdue.
    pub fn submit_report(&mut self, submitted_at: Timestamp) -> Result<ReportState, DomainError> {
        if self.status != EnrollmentStatus::Active {
            return Err(DomainError::new(
                crate::domain::foundation::ErrorCode::InvalidStateTransition,
                format!("Cannot submit a report for {:?} enrollment", self.status),
            ));
        }
        let due = self.next_report_due.unwrap_or(submitted_at);
        let state = report_state_at(Some(due), submitted_at);

        let anchor = if submitted_at.is_after(&due) { submitted_at } else { due };
        self.next_report_due = Some(anchor.add_days(REPORT_CADENCE_DAYS));
        self.updated_at = submitted_at;
        Ok(state)
    }

    /// Report schedule state at the given instant.
    pub fn report_state(&self, now: Timestamp) -> ReportState {
        report_state_at(self.next_report_due, now)
    }

    /// Withdraws access (administrative action).
    pub fn revoke(&mut self) -> Result<(), DomainError> {
        self.status = self.status.transition_to(EnrollmentStatus::Revoked)?;
        self.next_report_due = None;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

fn report_state_at(due: Option<Timestamp>, now: Timestamp) -> ReportState {
    let Some(due) = due else {
        return ReportState::NotScheduled;
    };
    if now.is_before(&due) {
        ReportState::Upcoming
    } else if now.is_after(&due.add_days(REPORT_GRACE_DAYS)) {
        ReportState::Overdue
    } else {
        ReportState::Due
    }
}

impl OwnedByUser for Enrollment {
    fn owner_id(&self) -> &UserId {
        &self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enrollment() -> Enrollment {
        Enrollment::create(EnrollmentId::new(), UserId::new(), CourseId::new())
    }

    #[test]
    fn create_schedules_first_report_one_cadence_out() {
        let e = enrollment();
        let due = e.next_report_due.unwrap();
        assert_eq!(
            due.duration_since(&e.enrolled_at),
            chrono::Duration::days(REPORT_CADENCE_DAYS)
        );
        assert_eq!(e.status, EnrollmentStatus::Active);
        assert_eq!(e.progress, 0);
    }

    #[test]
    fn progress_updates_monotonically() {
        let mut e = enrollment();
        assert_eq!(e.update_progress(40).unwrap(), false);
        assert_eq!(e.progress, 40);

        let result = e.update_progress(30);
        assert!(result.is_err());
        assert_eq!(e.progress, 40);
    }

    #[test]
    fn progress_above_hundred_is_rejected() {
        let mut e = enrollment();
        assert!(e.update_progress(101).is_err());
    }

    #[test]
    fn reaching_hundred_completes_and_clears_schedule() {
        let mut e = enrollment();
        let completed = e.update_progress(100).unwrap();

        assert!(completed);
        assert_eq!(e.status, EnrollmentStatus::Completed);
        assert!(e.completed_at.is_some());
        assert_eq!(e.next_report_due, None);
        assert_eq!(e.report_state(Timestamp::now()), ReportState::NotScheduled);
    }

    #[test]
    fn completed_enrollment_rejects_further_progress() {
        let mut e = enrollment();
        e.update_progress(100).unwrap();
        assert!(e.update_progress(100).is_err());
    }

    #[test]
    fn report_state_tracks_due_and_grace_window() {
        let e = enrollment();
        let due = e.next_report_due.unwrap();

        assert_eq!(e.report_state(due.add_days(-1)), ReportState::Upcoming);
        assert_eq!(e.report_state(due), ReportState::Due);
        assert_eq!(e.report_state(due.add_days(REPORT_GRACE_DAYS)), ReportState::Due);
        assert_eq!(
            e.report_state(due.add_days(REPORT_GRACE_DAYS).plus_secs(1)),
            ReportState::Overdue
        );
    }

    #[test]
    fn early_report_advances_from_previous_due_date() {
        let mut e = enrollment();
        let due = e.next_report_due.unwrap();

        // Submitted three days early: the cadence anchors on the due date.
        let state = e.submit_report(due.add_days(-3)).unwrap();

        assert_eq!(state, ReportState::Upcoming);
        assert_eq!(e.next_report_due.unwrap(), due.add_days(REPORT_CADENCE_DAYS));
    }

    #[test]
    fn late_report_advances_from_submission_time() {
        let mut e = enrollment();
        let due = e.next_report_due.unwrap();

        // Submitted five days late: the next report is still a full cadence out.
        let submitted = due.add_days(5);
        let state = e.submit_report(submitted).unwrap();

        assert_eq!(state, ReportState::Overdue);
        assert_eq!(
            e.next_report_due.unwrap(),
            submitted.add_days(REPORT_CADENCE_DAYS)
        );
    }

    #[test]
    fn report_submitted_within_grace_is_due_not_overdue() {
        let mut e = enrollment();
        let due = e.next_report_due.unwrap();

        let state = e.submit_report(due.add_days(1)).unwrap();
        assert_eq!(state, ReportState::Due);
    }

    #[test]
    fn revoke_clears_schedule_and_blocks_reports() {
        let mut e = enrollment();
        e.revoke().unwrap();

        assert_eq!(e.status, EnrollmentStatus::Revoked);
        assert_eq!(e.next_report_due, None);
        assert!(e.submit_report(Timestamp::now()).is_err());
        assert!(e.update_progress(10).is_err());
    }

    #[test]
    fn completed_and_revoked_are_terminal() {
        assert!(EnrollmentStatus::Completed.is_terminal());
        assert!(EnrollmentStatus::Revoked.is_terminal());
        assert!(!EnrollmentStatus::Active.is_terminal());
    }
}
