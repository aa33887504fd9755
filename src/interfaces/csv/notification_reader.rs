use crate::application::webhook::WebhookNotification;
use crate::error::{PaymentError, Result};
use std::io::Read;

/// Reads webhook notifications from a CSV source.
///
/// Expects the header `id,order_id,status,amount`. Whitespace around fields is
/// trimmed and short rows are reported per row instead of aborting the stream.
pub struct NotificationReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> NotificationReader<R> {
    /// Creates a new `NotificationReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes notifications.
    pub fn notifications(self) -> impl Iterator<Item = Result<WebhookNotification>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PaymentError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::PaymentStatus;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reader_valid_stream() {
        let data = "id, order_id, status, amount\n\
                    payment-1, order-1, APPROVED, 100.50\n\
                    payment-2, order-2, REJECTED, 3";
        let reader = NotificationReader::new(data.as_bytes());
        let results: Vec<Result<WebhookNotification>> = reader.notifications().collect();

        assert_eq!(results.len(), 2);
        let first = results[0].as_ref().unwrap();
        assert_eq!(first.payment_id, "payment-1");
        assert_eq!(first.status, PaymentStatus::Approved);
        assert_eq!(first.amount, dec!(100.50));
        assert_eq!(
            results[1].as_ref().unwrap().status,
            PaymentStatus::Rejected
        );
    }

    #[test]
    fn test_reader_malformed_line() {
        let data = "id, order_id, status, amount\n\
                    payment-1, order-1, PAID, 1.0\n\
                    payment-2, order-2, PENDING, 2.0";
        let reader = NotificationReader::new(data.as_bytes());
        let results: Vec<Result<WebhookNotification>> = reader.notifications().collect();

        assert!(matches!(results[0], Err(PaymentError::CsvError(_))));
        assert!(results[1].is_ok());
    }
}
