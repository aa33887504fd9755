use crate::domain::payment::Payment;
use crate::domain::ports::PaymentStore;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    payments: HashMap<String, Payment>,
    /// Order id to the id of the first payment saved for it.
    by_order: HashMap<String, String>,
}

/// A thread-safe in-memory store for payments.
///
/// Uses `Arc<RwLock<..>>` around a map keyed by payment id plus an order index.
/// Clones share the same tables. Ideal for testing or single-process runs where
/// persistence is not required.
#[derive(Default, Clone)]
pub struct InMemoryPaymentStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryPaymentStore {
    /// Creates a new, empty in-memory payment store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn save(&self, payment: Payment) -> Result<Payment> {
        let mut tables = self.tables.write().await;
        let previous = payment.id().and_then(|id| tables.payments.get(id));
        let payment = payment.prepare_for_save(Utc::now(), previous);

        let id = payment
            .id()
            .ok_or_else(|| PaymentError::internal("Prepared payment has no id"))?
            .to_string();
        tables
            .by_order
            .entry(payment.order_id().to_string())
            .or_insert_with(|| id.clone());
        tables.payments.insert(id, payment.clone());
        Ok(payment)
    }

    async fn update(&self, id: &str, payment: Payment) -> Result<Payment> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .payments
            .get_mut(id)
            .ok_or_else(|| PaymentError::NotFound(id.to_string()))?;

        let updated = stored.clone().apply_update(&payment, Utc::now());
        *stored = updated.clone();
        Ok(updated)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Payment>> {
        let tables = self.tables.read().await;
        Ok(tables.payments.get(id).cloned())
    }

    async fn find_by_order_id(&self, order_id: &str) -> Result<Option<Payment>> {
        let tables = self.tables.read().await;
        Ok(tables
            .by_order
            .get(order_id)
            .and_then(|id| tables.payments.get(id))
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Payment>> {
        let tables = self.tables.read().await;
        Ok(tables.payments.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::{Amount, PaymentStatus};
    use rust_decimal_macros::dec;

    fn pending(order_id: &str) -> Payment {
        Payment::pending(order_id, Amount::new(dec!(100.0)).unwrap(), None).unwrap()
    }

    #[tokio::test]
    async fn test_save_assigns_identity() {
        let store = InMemoryPaymentStore::new();

        let saved = store.save(pending("order-1")).await.unwrap();
        let id = saved.id().unwrap();
        assert!(!id.is_empty());
        assert!(saved.created_at().is_some());
        assert_eq!(saved.created_at(), saved.updated_at());

        let retrieved = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(retrieved, saved);
        assert!(store.find_by_id("unknown").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_with_id_writes_a_revision() {
        let store = InMemoryPaymentStore::new();
        let first = store.save(pending("order-1")).await.unwrap();

        let second = store
            .save(first.clone().with_status(PaymentStatus::Approved))
            .await
            .unwrap();

        assert_eq!(second.id(), first.id());
        assert_eq!(second.created_at(), first.created_at());
        assert_eq!(second.status(), PaymentStatus::Approved);
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let store = InMemoryPaymentStore::new();
        let result = store.update("missing", pending("order-1")).await;
        assert!(matches!(result, Err(PaymentError::NotFound(_))));
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_only_changes_status() {
        let store = InMemoryPaymentStore::new();
        let saved = store.save(pending("order-1")).await.unwrap();
        let id = saved.id().unwrap().to_string();

        let incoming = Payment::pending("other-order", Amount::new(dec!(1)).unwrap(), None)
            .unwrap()
            .with_status(PaymentStatus::Rejected);
        let updated = store.update(&id, incoming).await.unwrap();

        assert_eq!(updated.order_id(), "order-1");
        assert_eq!(updated.amount().value(), dec!(100.0));
        assert_eq!(updated.status(), PaymentStatus::Rejected);
    }

    #[tokio::test]
    async fn test_find_by_order_id_returns_first_payment() {
        let store = InMemoryPaymentStore::new();
        let first = store.save(pending("order-1")).await.unwrap();
        store.save(pending("order-1")).await.unwrap();
        store.save(pending("order-2")).await.unwrap();

        let found = store.find_by_order_id("order-1").await.unwrap().unwrap();
        assert_eq!(found.id(), first.id());
        assert!(store.find_by_order_id("order-3").await.unwrap().is_none());
    }
}
