use crate::domain::payment::{Payment, PaymentStatus};
use crate::domain::ports::PaymentProvider;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use tracing::debug;

/// Fixed answer given by [`MockPaymentProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum MockBehavior {
    #[default]
    Approve,
    Reject,
    /// Fails every call as if the provider were unreachable.
    Fail,
}

/// In-process stand-in for the payment provider, used when no provider URL is
/// configured.
#[derive(Debug, Clone, Default)]
pub struct MockPaymentProvider {
    behavior: MockBehavior,
}

impl MockPaymentProvider {
    pub fn new(behavior: MockBehavior) -> Self {
        Self { behavior }
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn process_payment(&self, payment: &Payment) -> Result<PaymentStatus> {
        debug!(
            payment_id = payment.id().unwrap_or_default(),
            behavior = ?self.behavior,
            "Mock provider processing payment"
        );
        match self.behavior {
            MockBehavior::Approve => Ok(PaymentStatus::Approved),
            MockBehavior::Reject => Ok(PaymentStatus::Rejected),
            MockBehavior::Fail => Err(PaymentError::ProviderProcessing(
                "mock provider unavailable".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::Amount;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_mock_behaviors() {
        let payment = Payment::pending("order-1", Amount::new(dec!(1)).unwrap(), None).unwrap();

        let approve = MockPaymentProvider::default();
        assert_eq!(
            approve.process_payment(&payment).await.unwrap(),
            PaymentStatus::Approved
        );

        let reject = MockPaymentProvider::new(MockBehavior::Reject);
        assert_eq!(
            reject.process_payment(&payment).await.unwrap(),
            PaymentStatus::Rejected
        );

        let fail = MockPaymentProvider::new(MockBehavior::Fail);
        assert!(matches!(
            fail.process_payment(&payment).await,
            Err(PaymentError::ProviderProcessing(_))
        ));
    }
}
