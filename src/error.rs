use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum PaymentError {
    #[error("Payment {0} not found")]
    #[diagnostic(code(payments::not_found))]
    NotFound(String),

    #[error("Payment provider could not process payment: {0}")]
    #[diagnostic(
        code(payments::provider_unavailable),
        help("the payment stays PENDING until the provider answers")
    )]
    ProviderProcessing(String),

    #[error("Order {order_id} could not be confirmed: {reason}")]
    #[diagnostic(code(payments::order_confirmation))]
    OrderConfirmation { order_id: String, reason: String },

    #[error("Validation error: {0}")]
    #[diagnostic(code(payments::validation))]
    ValidationError(String),

    #[error("Internal error: {0}")]
    #[diagnostic(code(payments::internal))]
    InternalError(Box<dyn std::error::Error + Send + Sync>),

    #[error("CSV error: {0}")]
    #[diagnostic(code(payments::csv))]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    #[diagnostic(code(payments::io))]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    #[diagnostic(code(payments::json))]
    JsonError(#[from] serde_json::Error),

    #[cfg(feature = "storage-rocksdb")]
    #[error("RocksDB error: {0}")]
    #[diagnostic(code(payments::rocksdb))]
    RocksDbError(#[from] rocksdb::Error),
}

/// Coarse classification used by hosting layers to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotFound,
    ServiceUnavailable,
    BadRequest,
    Internal,
}

impl ErrorCategory {
    pub fn status_code(self) -> u16 {
        match self {
            ErrorCategory::NotFound => 404,
            ErrorCategory::ServiceUnavailable => 503,
            ErrorCategory::BadRequest => 400,
            ErrorCategory::Internal => 500,
        }
    }
}

impl PaymentError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PaymentError::NotFound(_) => ErrorCategory::NotFound,
            PaymentError::ProviderProcessing(_) | PaymentError::OrderConfirmation { .. } => {
                ErrorCategory::ServiceUnavailable
            }
            PaymentError::ValidationError(_) | PaymentError::CsvError(_) => {
                ErrorCategory::BadRequest
            }
            _ => ErrorCategory::Internal,
        }
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        PaymentError::InternalError(Box::new(std::io::Error::other(message.into())))
    }
}

pub type Result<T> = std::result::Result<T, PaymentError>;
