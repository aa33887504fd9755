//! Composition root: turns an [`AppConfig`] into ready-to-use services.

use crate::application::orchestrator::PaymentOrchestrator;
use crate::application::webhook::WebhookHandler;
use crate::config::AppConfig;
use crate::domain::ports::{PaymentProviderBox, PaymentStoreBox};
use crate::error::Result;
use crate::infrastructure::http::{self, HttpOrderConfirmation, HttpPaymentProvider};
use crate::infrastructure::in_memory::InMemoryPaymentStore;
use crate::infrastructure::mock::MockPaymentProvider;
use std::sync::Arc;
use tracing::info;

pub struct Services {
    pub payments: Arc<PaymentOrchestrator>,
    pub webhooks: WebhookHandler,
}

pub fn build(config: &AppConfig) -> Result<Services> {
    let store = build_store(config)?;
    let client = http::build_client(config.http_timeout())?;

    let provider: PaymentProviderBox = match &config.provider_url {
        Some(url) => {
            info!(url = %url, "Using HTTP payment provider");
            Box::new(HttpPaymentProvider::new(url.as_str(), client.clone()))
        }
        None => {
            info!(behavior = ?config.mock_provider, "No provider URL configured, using mock payment provider");
            Box::new(MockPaymentProvider::new(config.mock_provider))
        }
    };
    let orders = Box::new(HttpOrderConfirmation::new(
        config.order_api_url.as_str(),
        client,
    ));

    let payments = Arc::new(PaymentOrchestrator::new(store, provider));
    let webhooks = WebhookHandler::new(payments.clone(), orders);
    Ok(Services { payments, webhooks })
}

fn build_store(config: &AppConfig) -> Result<PaymentStoreBox> {
    match &config.db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(path) => {
            info!(path = %path.display(), "Using RocksDB payment store");
            Ok(Box::new(crate::infrastructure::rocksdb::RocksDBStore::open(
                path,
            )?))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => {
            tracing::warn!(
                "Persistent storage requested via --db-path, but the 'storage-rocksdb' feature is not enabled. Falling back to in-memory storage."
            );
            Ok(Box::new(InMemoryPaymentStore::new()))
        }
        None => Ok(Box::new(InMemoryPaymentStore::new())),
    }
}
