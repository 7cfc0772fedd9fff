//! Course aggregate entity.
//!
//! A course is authored by a mentor, priced in minor currency units and
//! published into the public catalog. Enrollment is granted through billing
//! (paid transaction) or through a scholarship award.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    CourseId, DomainError, OwnedByUser, StateMachine, Timestamp, UserId, ValidationError,
};

/// Difficulty level shown in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

/// Publication status of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseStatus {
    /// Being authored, invisible to students.
    Draft,

    /// Listed in the catalog and purchasable.
    Published,

    /// Removed from the catalog. Existing enrollments keep access.
    Archived,
}

impl StateMachine for CourseStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use CourseStatus::*;
        matches!(
            (self, target),
            (Draft, Published) | (Published, Archived) | (Archived, Published)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use CourseStatus::*;
        match self {
            Draft => vec![Published],
            Published => vec![Archived],
            Archived => vec![Published],
        }
    }
}

/// Course aggregate.
///
/// # Invariants
///
/// - `slug` is lowercase kebab-case and unique across the catalog
/// - `price` is non-negative minor currency units (0 = free course)
/// - only `Published` courses are purchasable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,

    /// Mentor who owns and authors this course.
    pub mentor_id: UserId,

    pub title: String,

    /// URL-safe unique identifier used by the frontend.
    pub slug: String,

    pub description: String,

    /// Price in minor currency units; 0 marks a free course.
    pub price: i64,

    pub level: CourseLevel,

    pub status: CourseStatus,

    pub created_at: Timestamp,

    pub updated_at: Timestamp,
}

impl Course {
    /// Creates a new draft course.
    pub fn create(
        id: CourseId,
        mentor_id: UserId,
        title: impl Into<String>,
        slug: impl Into<String>,
        description: impl Into<String>,
        price: i64,
        level: CourseLevel,
    ) -> Result<Self, DomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title").into());
        }

        let slug = slug.into();
        validate_slug(&slug)?;

        if price < 0 {
            return Err(DomainError::validation("price", "Price must not be negative"));
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            mentor_id,
            title,
            slug,
            description: description.into(),
            price,
            level,
            status: CourseStatus::Draft,
            created_at: now,
            updated_at: now,
        })
    }

    /// Publishes the course into the catalog.
    pub fn publish(&mut self) -> Result<(), DomainError> {
        self.status = self.status.transition_to(CourseStatus::Published)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Archives the course, removing it from the catalog.
    pub fn archive(&mut self) -> Result<(), DomainError> {
        self.status = self.status.transition_to(CourseStatus::Archived)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Updates the mutable catalog metadata.
    pub fn update_details(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        price: i64,
        level: CourseLevel,
    ) -> Result<(), DomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title").into());
        }
        if price < 0 {
            return Err(DomainError::validation("price", "Price must not be negative"));
        }

        self.title = title;
        self.description = description.into();
        self.price = price;
        self.level = level;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// True when the course is free of charge.
    pub fn is_free(&self) -> bool {
        self.price == 0
    }

    /// True when the course can be purchased.
    pub fn is_purchasable(&self) -> bool {
        self.status == CourseStatus::Published
    }
}

impl OwnedByUser for Course {
    fn owner_id(&self) -> &UserId {
        &self.mentor_id
    }
}

fn validate_slug(slug: &str) -> Result<(), DomainError> {
    if slug.is_empty() {
        return Err(ValidationError::empty_field("slug").into());
    }
    let well_formed = slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !slug.starts_with('-')
        && !slug.ends_with('-');
    if !well_formed {
        return Err(ValidationError::invalid_format(
            "slug",
            "must be lowercase kebab-case",
        )
        .into());
    }
    Ok(())
}
