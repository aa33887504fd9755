use super::payment::{Payment, PaymentStatus};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Durable keyed storage for payments.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Writes a payment. Records without an id get one assigned; records that
    /// already carry an id are written as a new revision of that key.
    async fn save(&self, payment: Payment) -> Result<Payment>;
    /// Rewrites the status of an existing payment. Fails with `NotFound` when
    /// `id` is unknown.
    async fn update(&self, id: &str, payment: Payment) -> Result<Payment>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Payment>>;
    async fn find_by_order_id(&self, order_id: &str) -> Result<Option<Payment>>;
    async fn find_all(&self) -> Result<Vec<Payment>>;
}

/// External authority deciding whether a payment is approved.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    async fn process_payment(&self, payment: &Payment) -> Result<PaymentStatus>;
}

/// External authority that marks an order confirmed.
#[async_trait]
pub trait OrderConfirmation: Send + Sync {
    async fn confirm_order(&self, order_id: &str) -> Result<()>;
}

pub type PaymentStoreBox = Box<dyn PaymentStore>;
pub type PaymentProviderBox = Box<dyn PaymentProvider>;
pub type OrderConfirmationBox = Box<dyn OrderConfirmation>;

#[async_trait]
impl<T: PaymentStore + ?Sized> PaymentStore for Arc<T> {
    async fn save(&self, payment: Payment) -> Result<Payment> {
        (**self).save(payment).await
    }

    async fn update(&self, id: &str, payment: Payment) -> Result<Payment> {
        (**self).update(id, payment).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Payment>> {
        (**self).find_by_id(id).await
    }

    async fn find_by_order_id(&self, order_id: &str) -> Result<Option<Payment>> {
        (**self).find_by_order_id(order_id).await
    }

    async fn find_all(&self) -> Result<Vec<Payment>> {
        (**self).find_all().await
    }
}
