//! Mentoring context - one-on-one sessions between mentors and students.

mod errors;
mod session;

pub use errors::MentoringError;
pub use session::{MentoringSession, SessionStatus};
