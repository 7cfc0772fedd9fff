//! Strongly-typed identifier value objects.
//!
//! Every aggregate gets its own UUID-backed id newtype so that, for example,
//! a `CourseId` can never be passed where an `EnrollmentId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random id.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an id from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_id!(
    /// Identifier of a platform user (subject claim of the auth token).
    UserId
);

uuid_id!(
    /// Unique identifier for a course in the catalog.
    CourseId
);

uuid_id!(
    /// Unique identifier for an enrollment (user ↔ course join record).
    EnrollmentId
);

uuid_id!(
    /// Unique identifier for a mentoring session.
    MentoringSessionId
);

uuid_id!(
    /// Unique identifier for a scholarship program.
    ScholarshipId
);

uuid_id!(
    /// Unique identifier for a scholarship application.
    ApplicationId
);

uuid_id!(
    /// Unique identifier for a subscription plan.
    PlanId
);

uuid_id!(
    /// Unique identifier for a user's subscription.
    SubscriptionId
);

uuid_id!(
    /// Unique identifier for a payment transaction.
    TransactionId
);

uuid_id!(
    /// Unique identifier for an article.
    ArticleId
);

uuid_id!(
    /// Unique identifier for an awarded achievement.
    AchievementId
);

uuid_id!(
    /// Unique identifier for a queued background job.
    JobId
);
