use async_trait::async_trait;
use meridian_core::gateway::{ChargeVerification, CheckoutSession, GatewayError, PaymentGateway};
use serde::{Deserialize, Serialize};

use crate::app_config::PaystackConfig;

/// HTTP client for the Paystack transaction API: initialize (hosted
/// checkout) and verify. Webhook signature checking lives in the core
/// gateway module; this type only makes outbound calls.
pub struct PaystackClient {
    http: reqwest::Client,
    config: PaystackConfig,
}

#[derive(Debug, Serialize)]
struct InitializeRequest<'a> {
    email: &'a str,
    /// Minor currency units.
    amount: i64,
    reference: &'a str,
    metadata: serde_json::Value,
    callback_url: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    status: bool,
    message: Option<String>,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct InitializeData {
    authorization_url: String,
}

#[derive(Debug, Deserialize)]
struct VerifyData {
    status: String,
    #[serde(default)]
    amount: i64,
    gateway_response: Option<String>,
    customer: Option<VerifyCustomer>,
}

#[derive(Debug, Deserialize)]
struct VerifyCustomer {
    email: Option<String>,
}

impl PaystackClient {
    pub fn new(config: PaystackConfig) -> Self {
        Self { http: reqwest::Client::new(), config }
    }
}

#[async_trait]
impl PaymentGateway for PaystackClient {
    async fn initialize(
        &self,
        amount_minor: i64,
        reference: &str,
        email: &str,
        metadata: serde_json::Value,
    ) -> Result<CheckoutSession, GatewayError> {
        let resp = self
            .http
            .post(format!("{}/transaction/initialize", self.config.base_url))
            .bearer_auth(&self.config.secret_key)
            .json(&InitializeRequest {
                email,
                amount: amount_minor,
                reference,
                metadata,
                callback_url: &self.config.callback_url,
            })
            .send()
            .await
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;

        let body: ApiResponse<InitializeData> =
            resp.json().await.map_err(|e| GatewayError::Unavailable(e.to_string()))?;

        match body.data {
            Some(data) if body.status => Ok(CheckoutSession { checkout_url: data.authorization_url }),
            _ => Err(GatewayError::Rejected(
                body.message.unwrap_or_else(|| "initialization returned no checkout url".to_string()),
            )),
        }
    }

    async fn verify(&self, reference: &str) -> Result<ChargeVerification, GatewayError> {
        let resp = self
            .http
            .get(format!("{}/transaction/verify/{}", self.config.base_url, reference))
            .bearer_auth(&self.config.secret_key)
            .send()
            .await
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;

        let body: ApiResponse<VerifyData> =
            resp.json().await.map_err(|e| GatewayError::Unavailable(e.to_string()))?;

        // Anything but an affirmative success from the provider is reported
        // as a failed verification, never as an error: the caller renders a
        // failed-shaped result and leaves the booking untouched.
        match body.data {
            Some(data) if body.status => {
                let success = data.status == "success";
                Ok(ChargeVerification {
                    success,
                    amount_minor: data.amount,
                    customer_email: data.customer.and_then(|c| c.email),
                    gateway_message: data.gateway_response,
                })
            }
            _ => Ok(ChargeVerification {
                success: false,
                amount_minor: 0,
                customer_email: None,
                gateway_message: body.message,
            }),
        }
    }
}
