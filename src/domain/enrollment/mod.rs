//! Enrollment context - user ↔ course join records with progress tracking
//! and the progress-report schedule.

mod aggregate;
mod errors;
mod events;

pub use aggregate::{
    Enrollment, EnrollmentStatus, ReportState, REPORT_CADENCE_DAYS, REPORT_GRACE_DAYS,
};
pub use errors::EnrollmentError;
pub use events::{EnrollmentCompleted, EnrollmentCreated, ProgressReportSubmitted};
