//! Scholarship context - programs granting free course access.

mod aggregate;
mod errors;

pub use aggregate::{
    ApplicationStatus, Scholarship, ScholarshipApplication, ScholarshipStatus,
};
pub use errors::ScholarshipError;
