//! Achievements awarded for learning milestones.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AchievementId, Timestamp, UserId};

/// The fixed set of awardable achievements.
///
/// Each kind is awarded at most once per user (database unique constraint on
/// (user_id, kind)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementKind {
    /// First course enrollment.
    FirstEnrollment,

    /// First completed course.
    CourseCompleted,

    /// Five completed courses.
    FiveCoursesCompleted,

    /// Three completed mentoring sessions.
    MentorSessionStreak,

    /// Approved scholarship application.
    ScholarshipAwarded,
}

impl AchievementKind {
    /// Stable discriminator used for persistence.
    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementKind::FirstEnrollment => "first_enrollment",
            AchievementKind::CourseCompleted => "course_completed",
            AchievementKind::FiveCoursesCompleted => "five_courses_completed",
            AchievementKind::MentorSessionStreak => "mentor_session_streak",
            AchievementKind::ScholarshipAwarded => "scholarship_awarded",
        }
    }

    /// Rebuilds the kind from its persisted discriminator.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "first_enrollment" => Some(AchievementKind::FirstEnrollment),
            "course_completed" => Some(AchievementKind::CourseCompleted),
            "five_courses_completed" => Some(AchievementKind::FiveCoursesCompleted),
            "mentor_session_streak" => Some(AchievementKind::MentorSessionStreak),
            "scholarship_awarded" => Some(AchievementKind::ScholarshipAwarded),
            _ => None,
        }
    }

    /// Human-readable title shown in the profile.
    pub fn title(&self) -> &'static str {
        match self {
            AchievementKind::FirstEnrollment => "First Steps",
            AchievementKind::CourseCompleted => "Course Conqueror",
            AchievementKind::FiveCoursesCompleted => "Serial Learner",
            AchievementKind::MentorSessionStreak => "Well Mentored",
            AchievementKind::ScholarshipAwarded => "Scholar",
        }
    }
}

/// An achievement awarded to a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub user_id: UserId,
    pub kind: AchievementKind,
    pub awarded_at: Timestamp,
}

impl Achievement {
    /// Awards an achievement now.
    pub fn award(user_id: UserId, kind: AchievementKind) -> Self {
        Self {
            id: AchievementId::new(),
            user_id,
            kind,
            awarded_at: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [AchievementKind; 5] = [
        AchievementKind::FirstEnrollment,
        AchievementKind::CourseCompleted,
        AchievementKind::FiveCoursesCompleted,
        AchievementKind::MentorSessionStreak,
        AchievementKind::ScholarshipAwarded,
    ];

    #[test]
    fn kinds_roundtrip_through_discriminator() {
        for kind in ALL {
            assert_eq!(AchievementKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn unknown_discriminator_parses_to_none() {
        assert_eq!(AchievementKind::parse("speedrunner"), None);
    }

    #[test]
    fn award_stamps_user_and_kind() {
        let user = UserId::new();
        let achievement = Achievement::award(user, AchievementKind::CourseCompleted);
        assert_eq!(achievement.user_id, user);
        assert_eq!(achievement.kind, AchievementKind::CourseCompleted);
    }

    #[test]
    fn titles_are_distinct() {
        let titles: std::collections::HashSet<_> = ALL.iter().map(|k| k.title()).collect();
        assert_eq!(titles.len(), ALL.len());
    }
}
