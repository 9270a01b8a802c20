use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
#[error("ticket notification failed: {0}")]
pub struct NotifyError(pub String);

/// Fire-and-forget ticket delivery, keyed by booking reference. The sink
/// looks the booking up itself and emails the lead passenger; a failure
/// here is logged by the caller and never rolls back a payment transition.
#[async_trait]
pub trait TicketNotifier: Send + Sync {
    async fn send_ticket(&self, reference: &str) -> Result<(), NotifyError>;
}
