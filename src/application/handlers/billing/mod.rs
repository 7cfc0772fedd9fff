//! Billing context handlers - checkout and webhook callback processing.

mod apply_callback;
mod create_checkout;
mod receive_callback;

pub use apply_callback::{ApplyCallbackHandler, ApplyCallbackResult};
pub use create_checkout::{
    CheckoutItem, CreateCheckoutCommand, CreateCheckoutHandler, CreateCheckoutResult,
};
pub use receive_callback::{ReceiveCallbackCommand, ReceiveCallbackHandler};
