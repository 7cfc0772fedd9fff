//! Capturing mock mailer for tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::ports::{EmailMessage, Mailer, MailerError};

/// Mailer that records messages instead of sending them.
///
/// Can be configured to fail a number of leading attempts, which is how the
/// worker's retry policy is exercised in tests.
#[derive(Default)]
pub struct MockMailer {
    sent: Mutex<Vec<EmailMessage>>,
    fail_first: AtomicU32,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails the first `n` send attempts with a transient error.
    pub fn failing_first(n: u32) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_first: AtomicU32::new(n),
        }
    }

    /// Messages captured so far.
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), MailerError> {
        let remaining = self.fail_first.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_first.store(remaining - 1, Ordering::SeqCst);
            return Err(MailerError::RequestFailed("simulated outage".to_string()));
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}
