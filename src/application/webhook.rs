use super::orchestrator::PaymentOrchestrator;
use crate::domain::payment::{Payment, PaymentStatus};
use crate::domain::ports::OrderConfirmationBox;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

pub const STATUS_UPDATED_MESSAGE: &str = "Payment status updated successfully";

/// An asynchronous status update pushed by the payment provider.
///
/// The provider sends `{id, pedido_id, status, valor}`; the English field
/// names are accepted as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookNotification {
    #[serde(rename = "id")]
    pub payment_id: String,
    #[serde(rename = "pedido_id", alias = "order_id")]
    pub order_id: String,
    pub status: PaymentStatus,
    #[serde(rename = "valor", alias = "amount")]
    pub amount: Decimal,
}

/// What happened to the order confirmation after a status update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationOutcome {
    /// The notified status was not `APPROVED`; no confirmation was attempted.
    NotRequired,
    Confirmed,
    /// Confirmation was attempted and failed. The payment update still stands.
    Failed(String),
}

/// Acknowledgment returned once a notification's status update is durable.
///
/// Only `success`, `message` and `data` are part of the wire representation;
/// `confirmation` is there for callers that need to know about the side effect.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookAck {
    pub success: bool,
    pub message: String,
    pub data: Payment,
    #[serde(skip)]
    pub confirmation: ConfirmationOutcome,
}

pub struct WebhookHandler {
    payments: Arc<PaymentOrchestrator>,
    orders: OrderConfirmationBox,
}

impl WebhookHandler {
    pub fn new(payments: Arc<PaymentOrchestrator>, orders: OrderConfirmationBox) -> Self {
        Self { payments, orders }
    }

    /// Applies a status notification and, for approvals, confirms the order.
    ///
    /// A failed status update is returned as an error so the sender retries
    /// delivery. A failed order confirmation is logged and reported in
    /// [`WebhookAck::confirmation`] but never turns the acknowledgment into a
    /// failure.
    #[instrument(skip_all, fields(payment_id = %notification.payment_id, status = %notification.status))]
    pub async fn handle(&self, notification: WebhookNotification) -> Result<WebhookAck> {
        info!("Received payment status notification");

        let updated = match self
            .payments
            .update_status(&notification.payment_id, notification.status)
            .await
        {
            Ok(payment) => payment,
            Err(e) => {
                error!(error = %e, "Failed to update payment status");
                return Err(e);
            }
        };

        let confirmation = if updated.is_approved() {
            if updated.order_id() != notification.order_id {
                warn!(
                    stored_order_id = updated.order_id(),
                    notified_order_id = %notification.order_id,
                    "Notification order id differs from the stored payment"
                );
            }
            self.confirm_order(&notification.order_id).await
        } else {
            ConfirmationOutcome::NotRequired
        };

        Ok(WebhookAck {
            success: true,
            message: STATUS_UPDATED_MESSAGE.to_string(),
            data: updated,
            confirmation,
        })
    }

    async fn confirm_order(&self, order_id: &str) -> ConfirmationOutcome {
        info!(order_id, "Payment approved, confirming order");
        match self.orders.confirm_order(order_id).await {
            Ok(()) => {
                info!(order_id, "Order confirmed");
                ConfirmationOutcome::Confirmed
            }
            Err(e) => {
                error!(order_id, error = %e, "Order confirmation failed");
                ConfirmationOutcome::Failed(e.to_string())
            }
        }
    }
}
