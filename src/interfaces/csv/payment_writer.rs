use crate::domain::payment::Payment;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct PaymentRow<'a> {
    id: &'a str,
    order_id: &'a str,
    customer_id: &'a str,
    amount: Decimal,
    status: &'static str,
    created_at: String,
    updated_at: String,
}

impl<'a> From<&'a Payment> for PaymentRow<'a> {
    fn from(payment: &'a Payment) -> Self {
        Self {
            id: payment.id().unwrap_or_default(),
            order_id: payment.order_id(),
            customer_id: payment.customer_id().unwrap_or_default(),
            amount: payment.amount().value(),
            status: payment.status().as_str(),
            created_at: payment
                .created_at()
                .map(|t| t.to_rfc3339())
                .unwrap_or_default(),
            updated_at: payment
                .updated_at()
                .map(|t| t.to_rfc3339())
                .unwrap_or_default(),
        }
    }
}

/// Writes payments as CSV rows with a header line.
pub struct PaymentWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> PaymentWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// Writes every payment and flushes the sink. An empty input still
    /// produces the header line.
    pub fn write_payments<'a, I>(&mut self, payments: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Payment>,
    {
        let mut wrote_any = false;
        for payment in payments {
            self.writer.serialize(PaymentRow::from(payment))?;
            wrote_any = true;
        }
        if !wrote_any {
            self.writer.write_record([
                "id",
                "order_id",
                "customer_id",
                "amount",
                "status",
                "created_at",
                "updated_at",
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
