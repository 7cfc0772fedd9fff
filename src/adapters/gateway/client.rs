//! HTTP client for the payment gateway checkout API.
//!
//! Opens payment sessions against the gateway's snap-style endpoint. The
//! server key doubles as HTTP basic auth username, per the gateway's API
//! convention.

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::config::PaymentConfig;
use crate::ports::{CreatePaymentRequest, GatewayError, PaymentGateway, PaymentSession};

/// Payment gateway adapter backed by the checkout HTTP API.
pub struct GatewayClient {
    client: reqwest::Client,
    base_url: String,
    server_key: Secret<String>,
}

#[derive(Debug, Serialize)]
struct SnapTransactionBody<'a> {
    transaction_details: TransactionDetails<'a>,
    customer_details: CustomerDetails<'a>,
    item_details: Vec<ItemDetails<'a>>,
}

#[derive(Debug, Serialize)]
struct TransactionDetails<'a> {
    order_id: &'a str,
    gross_amount: i64,
}

#[derive(Debug, Serialize)]
struct CustomerDetails<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct ItemDetails<'a> {
    id: &'a str,
    name: &'a str,
    price: i64,
    quantity: u32,
}

#[derive(Debug, Deserialize)]
struct SnapTransactionResponse {
    token: String,
    redirect_url: String,
}

#[derive(Debug, Deserialize)]
struct SnapErrorResponse {
    #[serde(default)]
    error_messages: Vec<String>,
}

impl GatewayClient {
    /// Creates a client from the payment configuration.
    pub fn new(config: &PaymentConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            server_key: config.server_key.clone(),
        }
    }
}

#[async_trait]
impl PaymentGateway for GatewayClient {
    async fn create_payment(
        &self,
        request: CreatePaymentRequest,
    ) -> Result<PaymentSession, GatewayError> {
        let body = SnapTransactionBody {
            transaction_details: TransactionDetails {
                order_id: &request.order_ref,
                gross_amount: request.amount,
            },
            customer_details: CustomerDetails {
                email: &request.customer_email,
            },
            item_details: vec![ItemDetails {
                id: &request.order_ref,
                name: &request.item_name,
                price: request.amount,
                quantity: 1,
            }],
        };

        let response = self
            .client
            .post(format!("{}/snap/v1/transactions", self.base_url))
            .basic_auth(self.server_key.expose_secret(), Some(""))
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let session: SnapTransactionResponse = response
                .json()
                .await
                .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
            Ok(PaymentSession {
                token: session.token,
                redirect_url: session.redirect_url,
            })
        } else if status.is_client_error() {
            let error: SnapErrorResponse = response.json().await.unwrap_or(SnapErrorResponse {
                error_messages: vec![status.to_string()],
            });
            Err(GatewayError::Rejected(error.error_messages.join("; ")))
        } else {
            Err(GatewayError::RequestFailed(format!(
                "gateway returned {}",
                status
            )))
        }
    }
}
