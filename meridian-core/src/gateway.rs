use async_trait::async_trait;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha512;

/// Webhook event names the reconciliation engine reacts to; everything else
/// is acknowledged and ignored.
pub const EVENT_CHARGE_SUCCESS: &str = "charge.success";
pub const EVENT_CHARGE_FAILED: &str = "charge.failed";

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Provider unreachable or responded with a transport-level failure.
    #[error("payment provider unreachable: {0}")]
    Unavailable(String),

    /// Provider reachable but rejected the operation.
    #[error("payment provider rejected the request: {0}")]
    Rejected(String),
}

/// Result of initializing a hosted-checkout transaction.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    pub checkout_url: String,
}

/// Provider-reported state of a charge, from the verify (pull) endpoint.
#[derive(Debug, Clone)]
pub struct ChargeVerification {
    pub success: bool,
    pub amount_minor: i64,
    pub customer_email: Option<String>,
    pub gateway_message: Option<String>,
}

/// The hosted-checkout payment provider, abstracted to its three contracts:
/// initialize, verify, and (inbound, handled elsewhere) signed webhooks.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Start a transaction for `amount_minor` (minor currency units) keyed
    /// by the booking reference; returns the hosted checkout URL the
    /// customer is redirected to.
    async fn initialize(
        &self,
        amount_minor: i64,
        reference: &str,
        email: &str,
        metadata: serde_json::Value,
    ) -> Result<CheckoutSession, GatewayError>;

    /// Pull the charge state for `reference`.
    async fn verify(&self, reference: &str) -> Result<ChargeVerification, GatewayError>;
}

/// Inbound webhook envelope. Only `reference` and `amount` from the charge
/// payload participate in reconciliation.
#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    pub event: String,
    pub data: ChargeEvent,
}

#[derive(Debug, Deserialize)]
pub struct ChargeEvent {
    pub reference: String,
    /// Minor currency units, as charged by the provider.
    #[serde(default)]
    pub amount: i64,
}

/// Verify the provider's HMAC-SHA512 hex signature over the raw request
/// body. Any state change on a mismatch would let a forged webhook confirm
/// payments, so callers must reject before parsing.
pub fn verify_webhook_signature(secret: &str, body: &[u8], signature: &str) -> bool {
    let mut mac = match Hmac::<Sha512>::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return false,
    };
    mac.update(body);
    let expected = hex::encode(mac.finalize().into_bytes());
    expected == signature
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(secret: &str, body: &[u8]) -> String {
        let mut mac = Hmac::<Sha512>::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(body);
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn accepts_matching_signature() {
        let body = br#"{"event":"charge.success","data":{"reference":"MRD-ABC123","amount":1000000}}"#;
        let signature = sign("sk_test_secret", body);
        assert!(verify_webhook_signature("sk_test_secret", body, &signature));
    }

    #[test]
    fn rejects_wrong_secret_or_tampered_body() {
        let body = br#"{"event":"charge.success","data":{"reference":"MRD-ABC123","amount":1000000}}"#;
        let signature = sign("sk_test_secret", body);

        assert!(!verify_webhook_signature("sk_other_secret", body, &signature));
        let tampered = br#"{"event":"charge.success","data":{"reference":"MRD-ABC123","amount":1}}"#;
        assert!(!verify_webhook_signature("sk_test_secret", tampered, &signature));
    }

    #[test]
    fn parses_charge_event() {
        let body = r#"{"event":"charge.success","data":{"reference":"MRD-ABC123","amount":1000000,"currency":"NGN"}}"#;
        let event: WebhookEvent = serde_json::from_str(body).unwrap();
        assert_eq!(event.event, EVENT_CHARGE_SUCCESS);
        assert_eq!(event.data.reference, "MRD-ABC123");
        assert_eq!(event.data.amount, 1_000_000);
    }
}
