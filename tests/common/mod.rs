//! Recording test doubles for the payment ports.
#![allow(dead_code)]

use async_trait::async_trait;
use order_payments::domain::payment::{Amount, Payment, PaymentStatus};
use order_payments::domain::ports::{OrderConfirmation, PaymentProvider, PaymentStore};
use order_payments::error::{PaymentError, Result};
use order_payments::infrastructure::in_memory::InMemoryPaymentStore;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Save(PaymentStatus),
    Update(String, PaymentStatus),
}

/// In-memory store that records every write it receives.
///
/// `without_ids` builds a store that returns saved records without an id.
#[derive(Default, Clone)]
pub struct RecordingStore {
    inner: InMemoryPaymentStore,
    calls: Arc<Mutex<Vec<StoreCall>>>,
    omit_ids: bool,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_ids() -> Self {
        Self {
            omit_ids: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn inner(&self) -> &InMemoryPaymentStore {
        &self.inner
    }

    fn record(&self, call: StoreCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl PaymentStore for RecordingStore {
    async fn save(&self, payment: Payment) -> Result<Payment> {
        self.record(StoreCall::Save(payment.status()));
        if self.omit_ids {
            return Ok(payment);
        }
        self.inner.save(payment).await
    }

    async fn update(&self, id: &str, payment: Payment) -> Result<Payment> {
        self.record(StoreCall::Update(id.to_string(), payment.status()));
        self.inner.update(id, payment).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Payment>> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_order_id(&self, order_id: &str) -> Result<Option<Payment>> {
        self.inner.find_by_order_id(order_id).await
    }

    async fn find_all(&self) -> Result<Vec<Payment>> {
        self.inner.find_all().await
    }
}

/// Provider double with a fixed answer; `None` fails every call.
#[derive(Clone)]
pub struct ScriptedProvider {
    answer: Option<PaymentStatus>,
    calls: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<Payment>>>,
}

impl ScriptedProvider {
    pub fn answering(status: PaymentStatus) -> Self {
        Self {
            answer: Some(status),
            calls: Arc::default(),
            seen: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            calls: Arc::default(),
            seen: Arc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Payments submitted so far, as the provider received them.
    pub fn seen(&self) -> Vec<Payment> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentProvider for ScriptedProvider {
    async fn process_payment(&self, payment: &Payment) -> Result<PaymentStatus> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(payment.clone());
        self.answer
            .ok_or_else(|| PaymentError::ProviderProcessing("connection refused".to_string()))
    }
}

/// Order service double that records confirmed order ids.
#[derive(Default, Clone)]
pub struct RecordingOrders {
    confirmed: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl RecordingOrders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Order ids passed to `confirm_order`, including failed attempts.
    pub fn confirmed(&self) -> Vec<String> {
        self.confirmed.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderConfirmation for RecordingOrders {
    async fn confirm_order(&self, order_id: &str) -> Result<()> {
        self.confirmed.lock().unwrap().push(order_id.to_string());
        if self.fail {
            return Err(PaymentError::OrderConfirmation {
                order_id: order_id.to_string(),
                reason: "order service unavailable".to_string(),
            });
        }
        Ok(())
    }
}

pub fn amount(value: Decimal) -> Amount {
    Amount::new(value).unwrap()
}

/// Stores a `PENDING` payment under a known id.
pub async fn seed_payment<S: PaymentStore>(
    store: &S,
    id: &str,
    order_id: &str,
    value: Decimal,
) -> Payment {
    let payment = Payment::pending(order_id, amount(value), None)
        .unwrap()
        .with_id(id);
    store.save(payment).await.unwrap()
}
