//! Background job infrastructure - worker, handlers and maintenance sweeps.

mod handlers;
mod maintenance;
mod worker;

pub use handlers::{PaymentConfirmationJob, ProcessCallbackJob, ReportReminderJob};
pub use maintenance::MaintenanceService;
pub use worker::{JobDispatcher, JobError, JobHandler, JobWorker};
