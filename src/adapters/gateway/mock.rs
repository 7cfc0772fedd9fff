//! Mock payment gateway for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::ports::{CreatePaymentRequest, GatewayError, PaymentGateway, PaymentSession};

/// Gateway that returns canned sessions and records requests.
#[derive(Default)]
pub struct MockPaymentGateway {
    requests: Mutex<Vec<CreatePaymentRequest>>,
    fail: bool,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gateway that rejects every request.
    pub fn failing() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Requests captured so far.
    pub fn requests(&self) -> Vec<CreatePaymentRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_payment(
        &self,
        request: CreatePaymentRequest,
    ) -> Result<PaymentSession, GatewayError> {
        if self.fail {
            return Err(GatewayError::Rejected("simulated rejection".to_string()));
        }
        let token = format!("snap-{}", request.order_ref);
        let redirect_url = format!("https://gateway.test/pay/{}", token);
        self.requests.lock().unwrap().push(request);
        Ok(PaymentSession {
            token,
            redirect_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_session_derived_from_order_ref() {
        let gateway = MockPaymentGateway::new();
        let session = gateway
            .create_payment(CreatePaymentRequest {
                order_ref: "LF-1".to_string(),
                amount: 1000,
                customer_email: "a@example.com".to_string(),
                item_name: "Course".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(session.token, "snap-LF-1");
        assert_eq!(gateway.requests().len(), 1);
    }

    #[tokio::test]
    async fn failing_gateway_rejects() {
        let gateway = MockPaymentGateway::failing();
        let result = gateway
            .create_payment(CreatePaymentRequest {
                order_ref: "LF-1".to_string(),
                amount: 1000,
                customer_email: "a@example.com".to_string(),
                item_name: "Course".to_string(),
            })
            .await;
        assert!(matches!(result, Err(GatewayError::Rejected(_))));
    }
}
