//! Learnforge - learning management platform backend.
//!
//! Course catalog, enrollments, mentoring sessions, scholarships,
//! subscriptions, payment transactions and user progression, exposed as a
//! JSON REST API.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
