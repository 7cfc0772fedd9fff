//! Scholarship context handlers.

mod apply_scholarship;
mod close_scholarship;
mod create_scholarship;
mod decide_application;

pub use apply_scholarship::{ApplyScholarshipCommand, ApplyScholarshipHandler};
pub use close_scholarship::{CloseScholarshipCommand, CloseScholarshipHandler};
pub use create_scholarship::{CreateScholarshipCommand, CreateScholarshipHandler};
pub use decide_application::{Decision, DecideApplicationCommand, DecideApplicationHandler};
