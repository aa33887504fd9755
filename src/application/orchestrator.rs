use crate::domain::payment::{Amount, Payment, PaymentStatus};
use crate::domain::ports::{PaymentProviderBox, PaymentStoreBox};
use crate::error::{PaymentError, Result};
use tracing::{error, info, instrument};

/// Coordinates payment creation, provider submission and status updates.
///
/// Holds no state of its own between calls: every step is a round trip to the
/// store or the provider, performed in order and awaited before the next one.
pub struct PaymentOrchestrator {
    store: PaymentStoreBox,
    provider: PaymentProviderBox,
}

impl PaymentOrchestrator {
    /// Creates a new `PaymentOrchestrator`.
    ///
    /// # Arguments
    ///
    /// * `store` - Durable storage for payment records.
    /// * `provider` - The external authority that approves or rejects payments.
    pub fn new(store: PaymentStoreBox, provider: PaymentProviderBox) -> Self {
        Self { store, provider }
    }

    /// Creates a payment for `order_id` and submits it to the provider.
    ///
    /// The record is persisted as `PENDING` before the provider is called and
    /// persisted again with the provider's decision. If the provider fails, or
    /// answers without a final decision, the error is returned and the stored
    /// record stays `PENDING`.
    #[instrument(skip(self, amount, customer_id), fields(amount = %amount))]
    pub async fn create(
        &self,
        order_id: &str,
        amount: Amount,
        customer_id: Option<String>,
    ) -> Result<Payment> {
        info!("Creating payment");
        let payment = self
            .store
            .save(Payment::pending(order_id, amount, customer_id)?)
            .await?;
        let payment_id = payment
            .id()
            .ok_or_else(|| PaymentError::internal("Store returned a payment without an id"))?
            .to_string();
        info!(payment_id = %payment_id, status = %payment.status(), "Payment saved");

        info!(payment_id = %payment_id, "Submitting payment to provider");
        let status = match self.provider.process_payment(&payment).await {
            Ok(status) => status,
            Err(e) => {
                error!(payment_id = %payment_id, error = %e, "Payment provider failed, payment left PENDING");
                return Err(match e {
                    PaymentError::ProviderProcessing(_) => e,
                    other => PaymentError::ProviderProcessing(other.to_string()),
                });
            }
        };
        if !status.is_terminal() {
            error!(payment_id = %payment_id, %status, "Payment provider returned no decision");
            return Err(PaymentError::ProviderProcessing(format!(
                "provider returned non-terminal status {status} for payment {payment_id}"
            )));
        }
        info!(payment_id = %payment_id, %status, "Payment provider answered");

        self.store.save(payment.with_status(status)).await
    }

    /// Overwrites the status of an existing payment.
    ///
    /// Any status may replace any other; a replayed notification can move an
    /// already rejected payment back to approved.
    #[instrument(skip(self))]
    pub async fn update_status(&self, payment_id: &str, status: PaymentStatus) -> Result<Payment> {
        let payment = self
            .store
            .find_by_id(payment_id)
            .await?
            .ok_or_else(|| PaymentError::NotFound(payment_id.to_string()))?;

        let previous = payment.status();
        let updated = self
            .store
            .update(payment_id, payment.with_status(status))
            .await?;
        info!(%previous, current = %updated.status(), "Payment status updated");
        Ok(updated)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Payment>> {
        self.store.find_by_id(id).await
    }

    pub async fn find_by_order_id(&self, order_id: &str) -> Result<Option<Payment>> {
        self.store.find_by_order_id(order_id).await
    }

    /// Every stored payment, in no particular order.
    pub async fn list(&self) -> Result<Vec<Payment>> {
        self.store.find_all().await
    }
}
