//! Mentoring context handlers.

mod cancel_session;
mod complete_session;
mod confirm_session;
mod request_session;

pub use cancel_session::{CancelSessionCommand, CancelSessionHandler};
pub use complete_session::{CompleteSessionCommand, CompleteSessionHandler};
pub use confirm_session::{ConfirmSessionCommand, ConfirmSessionHandler};
pub use request_session::{RequestSessionCommand, RequestSessionHandler};
