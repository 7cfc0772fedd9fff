//! Scholarship program and application aggregates.
//!
//! A scholarship grants free access to a course. Administrators open a
//! program with a quota and an application window; students apply once per
//! program; approval creates the enrollment entitlement.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ApplicationId, CourseId, DomainError, ErrorCode, OwnedByUser, ScholarshipId, StateMachine,
    Timestamp, UserId, ValidationError,
};

/// Whether a scholarship program accepts applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScholarshipStatus {
    Open,
    Closed,
}

impl StateMachine for ScholarshipStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ScholarshipStatus::*;
        matches!((self, target), (Open, Closed) | (Closed, Open))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ScholarshipStatus::*;
        match self {
            Open => vec![Closed],
            Closed => vec![Open],
        }
    }
}

/// Scholarship program aggregate.
///
/// # Invariants
///
/// - `quota` is the maximum number of approvals, > 0
/// - applications are only accepted while Open and inside the window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scholarship {
    pub id: ScholarshipId,

    pub name: String,

    pub description: String,

    /// Course the scholarship grants access to.
    pub course_id: CourseId,

    /// Maximum number of approved applications.
    pub quota: u32,

    /// Approvals granted so far.
    pub awarded: u32,

    pub opens_at: Timestamp,

    pub closes_at: Timestamp,

    pub status: ScholarshipStatus,

    pub created_at: Timestamp,

    pub updated_at: Timestamp,
}

impl Scholarship {
    /// Creates a new open scholarship program.
    pub fn create(
        id: ScholarshipId,
        name: impl Into<String>,
        description: impl Into<String>,
        course_id: CourseId,
        quota: u32,
        opens_at: Timestamp,
        closes_at: Timestamp,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name").into());
        }
        if quota == 0 {
            return Err(DomainError::validation("quota", "Quota must be positive"));
        }
        if !closes_at.is_after(&opens_at) {
            return Err(DomainError::validation(
                "closes_at",
                "Close date must be after open date",
            ));
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            name,
            description: description.into(),
            course_id,
            quota,
            awarded: 0,
            opens_at,
            closes_at,
            status: ScholarshipStatus::Open,
            created_at: now,
            updated_at: now,
        })
    }

    /// True when applications are currently accepted.
    pub fn accepts_applications(&self, now: Timestamp) -> bool {
        self.status == ScholarshipStatus::Open
            && !now.is_before(&self.opens_at)
            && !now.is_after(&self.closes_at)
            && self.awarded < self.quota
    }

    /// Validates that an application can be submitted now.
    pub fn check_accepting(&self, now: Timestamp) -> Result<(), DomainError> {
        if self.status != ScholarshipStatus::Open || now.is_after(&self.closes_at) {
            return Err(DomainError::new(
                ErrorCode::ScholarshipClosed,
                "Scholarship is not accepting applications",
            ));
        }
        if now.is_before(&self.opens_at) {
            return Err(DomainError::new(
                ErrorCode::ScholarshipClosed,
                "Scholarship has not opened yet",
            ));
        }
        if self.awarded >= self.quota {
            return Err(DomainError::new(
                ErrorCode::QuotaExhausted,
                "Scholarship quota has been exhausted",
            ));
        }
        Ok(())
    }

    /// Records an approval against the quota.
    pub fn record_award(&mut self) -> Result<(), DomainError> {
        if self.awarded >= self.quota {
            return Err(DomainError::new(
                ErrorCode::QuotaExhausted,
                "Scholarship quota has been exhausted",
            ));
        }
        self.awarded += 1;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Closes the program to further applications.
    pub fn close(&mut self) -> Result<(), DomainError> {
        self.status = self.status.transition_to(ScholarshipStatus::Closed)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Reopens a closed program.
    pub fn reopen(&mut self) -> Result<(), DomainError> {
        self.status = self.status.transition_to(ScholarshipStatus::Open)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

/// Review status of a scholarship application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Submitted,
    Approved,
    Rejected,
}

impl StateMachine for ApplicationStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ApplicationStatus::*;
        matches!((self, target), (Submitted, Approved) | (Submitted, Rejected))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ApplicationStatus::*;
        match self {
            Submitted => vec![Approved, Rejected],
            Approved | Rejected => vec![],
        }
    }
}

/// A student's application to a scholarship program.
///
/// One application per user per program, enforced at the database level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScholarshipApplication {
    pub id: ApplicationId,

    pub scholarship_id: ScholarshipId,

    pub user_id: UserId,

    /// Motivation essay submitted with the application.
    pub essay: String,

    pub status: ApplicationStatus,

    pub submitted_at: Timestamp,

    pub decided_at: Option<Timestamp>,

    /// Administrator who decided the application.
    pub decided_by: Option<UserId>,
}

impl ScholarshipApplication {
    /// Submits a new application.
    pub fn submit(
        id: ApplicationId,
        scholarship_id: ScholarshipId,
        user_id: UserId,
        essay: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let essay = essay.into();
        if essay.trim().is_empty() {
            return Err(ValidationError::empty_field("essay").into());
        }

        Ok(Self {
            id,
            scholarship_id,
            user_id,
            essay,
            status: ApplicationStatus::Submitted,
            submitted_at: Timestamp::now(),
            decided_at: None,
            decided_by: None,
        })
    }

    /// Approves the application.
    pub fn approve(&mut self, decided_by: UserId) -> Result<(), DomainError> {
        self.status = self.status.transition_to(ApplicationStatus::Approved)?;
        self.decided_at = Some(Timestamp::now());
        self.decided_by = Some(decided_by);
        Ok(())
    }

    /// Rejects the application.
    pub fn reject(&mut self, decided_by: UserId) -> Result<(), DomainError> {
        self.status = self.status.transition_to(ApplicationStatus::Rejected)?;
        self.decided_at = Some(Timestamp::now());
        self.decided_by = Some(decided_by);
        Ok(())
    }
}

impl OwnedByUser for ScholarshipApplication {
    fn owner_id(&self) -> &UserId {
        &self.user_id
    }
}
