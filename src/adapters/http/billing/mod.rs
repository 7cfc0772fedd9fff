//! Billing HTTP module.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{
    checkout_routes, plan_routes, subscription_routes, transaction_routes, webhook_routes,
};
