use crate::domain::payment::Payment;
use crate::domain::ports::PaymentStore;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use chrono::Utc;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options, WriteBatch};
use std::path::Path;
use std::sync::Arc;

/// Column Family for storing payment records, keyed by payment id.
pub const CF_PAYMENTS: &str = "payments";
/// Column Family mapping an order id to the first payment saved for it.
pub const CF_ORDER_INDEX: &str = "order_index";

/// A persistent payment store implementation using RocksDB.
///
/// Records are stored as JSON in the `payments` column family. The
/// `order_index` column family backs lookups by order id.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the required column families ("payments" and "order_index") exist.
    ///
    /// # Arguments
    ///
    /// * `path` - The filesystem path where the database will be stored.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_payments = ColumnFamilyDescriptor::new(CF_PAYMENTS, Options::default());
        let cf_order_index = ColumnFamilyDescriptor::new(CF_ORDER_INDEX, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_payments, cf_order_index])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| PaymentError::internal(format!("Column family '{name}' not found")))
    }

    fn read(&self, id: &str) -> Result<Option<Payment>> {
        let cf = self.cf(CF_PAYMENTS)?;
        match self.db.get_cf(cf, id.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl PaymentStore for RocksDBStore {
    async fn save(&self, payment: Payment) -> Result<Payment> {
        let previous = match payment.id() {
            Some(id) => self.read(id)?,
            None => None,
        };
        let payment = payment.prepare_for_save(Utc::now(), previous.as_ref());
        let id = payment
            .id()
            .ok_or_else(|| PaymentError::internal("Prepared payment has no id"))?;

        let payments = self.cf(CF_PAYMENTS)?;
        let order_index = self.cf(CF_ORDER_INDEX)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(payments, id.as_bytes(), serde_json::to_vec(&payment)?);
        if self
            .db
            .get_pinned_cf(order_index, payment.order_id().as_bytes())?
            .is_none()
        {
            batch.put_cf(order_index, payment.order_id().as_bytes(), id.as_bytes());
        }
        self.db.write(batch)?;

        Ok(payment)
    }

    async fn update(&self, id: &str, payment: Payment) -> Result<Payment> {
        let stored = self
            .read(id)?
            .ok_or_else(|| PaymentError::NotFound(id.to_string()))?;
        let updated = stored.apply_update(&payment, Utc::now());

        let cf = self.cf(CF_PAYMENTS)?;
        self.db.put_cf(cf, id.as_bytes(), serde_json::to_vec(&updated)?)?;

        Ok(updated)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Payment>> {
        self.read(id)
    }

    async fn find_by_order_id(&self, order_id: &str) -> Result<Option<Payment>> {
        let cf = self.cf(CF_ORDER_INDEX)?;
        match self.db.get_cf(cf, order_id.as_bytes())? {
            Some(id) => {
                let id =
                    String::from_utf8(id).map_err(|e| PaymentError::InternalError(Box::new(e)))?;
                self.read(&id)
            }
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> Result<Vec<Payment>> {
        let cf = self.cf(CF_PAYMENTS)?;

        let mut payments = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            payments.push(serde_json::from_slice(&value)?);
        }

        Ok(payments)
    }
}
