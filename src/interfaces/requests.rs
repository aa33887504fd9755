use crate::application::webhook::WebhookNotification;
use crate::domain::payment::Amount;
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Boundary checks run before a request reaches the orchestrator.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatePaymentRequest {
    #[serde(alias = "pedido_id")]
    pub order_id: String,
    #[serde(alias = "valor")]
    pub amount: Decimal,
    #[serde(default)]
    pub customer_id: Option<String>,
}

impl CreatePaymentRequest {
    /// The validated amount, ready for [`crate::application::orchestrator::PaymentOrchestrator::create`].
    pub fn amount(&self) -> Result<Amount> {
        Amount::new(self.amount)
    }
}

impl Validate for CreatePaymentRequest {
    fn validate(&self) -> Result<()> {
        require_non_empty("order_id", &self.order_id)?;
        if let Some(customer_id) = &self.customer_id {
            require_non_empty("customer_id", customer_id)?;
        }
        self.amount().map(|_| ())
    }
}

impl Validate for WebhookNotification {
    fn validate(&self) -> Result<()> {
        require_non_empty("id", &self.payment_id)?;
        require_non_empty("order_id", &self.order_id)?;
        if self.amount <= Decimal::ZERO {
            return Err(PaymentError::ValidationError(
                "amount must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(PaymentError::ValidationError(format!(
            "{field} must not be empty"
        )))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::PaymentStatus;
    use rust_decimal_macros::dec;

    #[test]
    fn test_create_request_validation() {
        let valid = CreatePaymentRequest {
            order_id: "123".to_string(),
            amount: dec!(100.50),
            customer_id: None,
        };
        assert!(valid.validate().is_ok());

        let empty_order = CreatePaymentRequest {
            order_id: " ".to_string(),
            ..valid.clone()
        };
        assert!(matches!(
            empty_order.validate(),
            Err(PaymentError::ValidationError(_))
        ));

        let zero_amount = CreatePaymentRequest {
            amount: dec!(0),
            ..valid
        };
        assert!(zero_amount.validate().is_err());
    }

    #[test]
    fn test_create_request_from_json() {
        let request: CreatePaymentRequest =
            serde_json::from_str(r#"{"order_id": "123", "amount": 100.50}"#).unwrap();
        assert_eq!(request.amount, dec!(100.5));
        assert_eq!(request.customer_id, None);

        let original: CreatePaymentRequest =
            serde_json::from_str(r#"{"pedido_id": "123", "valor": 100.50}"#).unwrap();
        assert_eq!(original, request);
    }

    #[test]
    fn test_notification_validation() {
        let notification = WebhookNotification {
            payment_id: "payment-123".to_string(),
            order_id: "order-456".to_string(),
            status: PaymentStatus::Approved,
            amount: dec!(100.50),
        };
        assert!(notification.validate().is_ok());

        let missing_id = WebhookNotification {
            payment_id: String::new(),
            ..notification.clone()
        };
        assert!(missing_id.validate().is_err());

        let negative = WebhookNotification {
            amount: dec!(-1),
            ..notification
        };
        assert!(negative.validate().is_err());
    }
}
