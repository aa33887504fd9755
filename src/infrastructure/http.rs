//! HTTP clients for the payment provider and the order service.
//!
//! Both clients own a `reqwest::Client` built with the configured timeout;
//! the orchestration layer never sets timeouts of its own.

use crate::domain::payment::{Payment, PaymentStatus};
use crate::domain::ports::{OrderConfirmation, PaymentProvider};
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| PaymentError::InternalError(Box::new(e)))
}

/// Body posted to the provider's `/pagamentos` endpoint.
#[derive(Debug, Serialize)]
struct ProviderRequest<'a> {
    id: &'a str,
    #[serde(rename = "pedido_id")]
    order_id: &'a str,
    #[serde(rename = "valor", with = "rust_decimal::serde::float")]
    amount: Decimal,
}

#[derive(Debug, Deserialize)]
struct ProviderResponse {
    status: PaymentStatus,
}

/// Payment provider reached over HTTP.
#[derive(Clone)]
pub struct HttpPaymentProvider {
    base_url: String,
    client: Client,
}

impl HttpPaymentProvider {
    pub fn new(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    async fn submit(&self, payment: &Payment) -> std::result::Result<PaymentStatus, String> {
        let url = format!("{}/pagamentos", self.base_url);
        let body = ProviderRequest {
            id: payment.id().unwrap_or_default(),
            order_id: payment.order_id(),
            amount: payment.amount().value(),
        };

        let response = self.client.post(&url).json(&body).send().await.map_err(|e| {
            if e.is_connect() {
                error!(url = %url, "Could not connect to payment provider");
            }
            format!("request failed: {e}")
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("provider responded with status {status}"));
        }

        response
            .json::<ProviderResponse>()
            .await
            .map(|r| r.status)
            .map_err(|e| format!("invalid provider response: {e}"))
    }
}

#[async_trait]
impl PaymentProvider for HttpPaymentProvider {
    async fn process_payment(&self, payment: &Payment) -> Result<PaymentStatus> {
        match self.submit(payment).await {
            Ok(status) => {
                info!(order_id = payment.order_id(), %status, "Payment provider answered");
                Ok(status)
            }
            Err(reason) => {
                error!(order_id = payment.order_id(), %reason, "Error processing payment");
                Err(PaymentError::ProviderProcessing(reason))
            }
        }
    }
}

/// Order service confirmation endpoint reached over HTTP.
#[derive(Clone)]
pub struct HttpOrderConfirmation {
    base_url: String,
    client: Client,
}

impl HttpOrderConfirmation {
    pub fn new(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }
}

#[async_trait]
impl OrderConfirmation for HttpOrderConfirmation {
    async fn confirm_order(&self, order_id: &str) -> Result<()> {
        let url = format!("{}/pedidos/{}/confirmar", self.base_url, order_id);
        info!(order_id, url = %url, "Confirming order");

        let failure = |reason: String| PaymentError::OrderConfirmation {
            order_id: order_id.to_string(),
            reason,
        };

        let response = self
            .client
            .put(&url)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| failure(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(failure(format!("order service responded with status {status}")));
        }
        Ok(())
    }
}
