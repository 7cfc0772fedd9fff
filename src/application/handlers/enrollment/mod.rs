//! Enrollment context handlers.

mod enroll_free;
mod grant_enrollment;
mod submit_report;
mod update_progress;

pub use enroll_free::{EnrollFreeCommand, EnrollFreeHandler};
pub use grant_enrollment::{
    GrantEnrollmentCommand, GrantEnrollmentHandler, GrantEnrollmentResult,
};
pub use submit_report::{SubmitReportCommand, SubmitReportHandler, SubmitReportResult};
pub use update_progress::{UpdateProgressCommand, UpdateProgressHandler};
