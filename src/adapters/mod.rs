//! Adapters - implementations of the ports against real infrastructure.
//!
//! - `http` - axum REST surface
//! - `postgres` - sqlx repositories, job queue and webhook store
//! - `gateway` - payment gateway checkout client
//! - `email` - HTTP mail API client
//! - `auth` - JWT token verifier
//! - `jobs` - background worker and maintenance sweeps
//! - `events` - event publishers
//! - `memory` - in-memory stores for tests and local development

pub mod auth;
pub mod email;
pub mod events;
pub mod gateway;
pub mod http;
pub mod jobs;
pub mod memory;
pub mod postgres;
