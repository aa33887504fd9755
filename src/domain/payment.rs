use crate::error::PaymentError;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A strictly positive monetary amount.
///
/// Deserialization goes through [`Amount::new`], so a zero or negative value can
/// never reach a [`Payment`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, PaymentError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(PaymentError::ValidationError(
                "Amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PaymentError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    Pending,
    Approved,
    Rejected,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Approved => "APPROVED",
            PaymentStatus::Rejected => "REJECTED",
        }
    }

    /// Whether a provider answer with this status is a final decision.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PaymentStatus::Pending)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(PaymentStatus::Pending),
            "APPROVED" => Ok(PaymentStatus::Approved),
            "REJECTED" => Ok(PaymentStatus::Rejected),
            other => Err(PaymentError::ValidationError(format!(
                "Unknown payment status '{other}'"
            ))),
        }
    }
}

/// Partially specified payment data.
///
/// Every field is optional; [`Payment::from_draft`] copies the present ones and
/// rejects drafts that lack an order id or amount. Stored records are read back
/// through this type.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PaymentDraft {
    pub id: Option<String>,
    pub order_id: Option<String>,
    pub customer_id: Option<String>,
    pub amount: Option<Decimal>,
    pub status: Option<PaymentStatus>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// One payment attempt for one order.
///
/// Fields are private: the order id and amount never change after construction,
/// the id is only filled in by a store, and status changes go through
/// [`Payment::with_status`] so the update timestamp is always refreshed.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(try_from = "PaymentDraft")]
pub struct Payment {
    id: Option<String>,
    order_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer_id: Option<String>,
    amount: Amount,
    status: PaymentStatus,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl Payment {
    /// A fresh, never persisted payment in the `PENDING` state.
    pub fn pending(
        order_id: impl Into<String>,
        amount: Amount,
        customer_id: Option<String>,
    ) -> Result<Self, PaymentError> {
        let order_id = order_id.into();
        if order_id.trim().is_empty() {
            return Err(PaymentError::ValidationError(
                "Order id must not be empty".to_string(),
            ));
        }
        Ok(Self {
            id: None,
            order_id,
            customer_id,
            amount,
            status: PaymentStatus::Pending,
            created_at: None,
            updated_at: None,
        })
    }

    pub fn from_draft(draft: PaymentDraft) -> Result<Self, PaymentError> {
        let order_id = draft.order_id.ok_or_else(|| {
            PaymentError::ValidationError("Payment is missing an order id".to_string())
        })?;
        let amount = draft.amount.ok_or_else(|| {
            PaymentError::ValidationError("Payment is missing an amount".to_string())
        })?;

        let mut payment = Self::pending(order_id, Amount::new(amount)?, draft.customer_id)?;
        if let Some(status) = draft.status {
            payment.status = status;
        }
        payment.id = draft.id.filter(|id| !id.is_empty());
        payment.created_at = draft.created_at;
        payment.updated_at = draft.updated_at;
        Ok(payment)
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn customer_id(&self) -> Option<&str> {
        self.customer_id.as_deref()
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn is_approved(&self) -> bool {
        self.status == PaymentStatus::Approved
    }

    /// Copies a store-assigned identifier onto this record.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Moves the payment to `status` and refreshes `updated_at`.
    ///
    /// Any status may replace any other. The new timestamp is strictly later
    /// than the previous one even when the clock has not advanced.
    pub fn with_status(mut self, status: PaymentStatus) -> Self {
        self.status = status;
        self.updated_at = Some(next_timestamp(self.updated_at));
        self
    }

    /// Stamps a record before a store writes it: a new id when none is set,
    /// and creation/update timestamps when missing. `previous` is the stored
    /// revision under the same id, whose creation time is kept.
    pub(crate) fn prepare_for_save(
        mut self,
        now: DateTime<Utc>,
        previous: Option<&Payment>,
    ) -> Self {
        if self.id.is_none() {
            self.id = Some(uuid::Uuid::new_v4().to_string());
        }
        if let Some(created_at) = previous.and_then(|p| p.created_at) {
            self.created_at = Some(created_at);
        }
        let created_at = *self.created_at.get_or_insert(now);
        if self.updated_at.is_none() {
            self.updated_at = Some(created_at);
        }
        self
    }

    /// Applies the mutable part of `incoming` (status and update time) to this
    /// stored record. Id, order id, customer and amount are left untouched.
    pub(crate) fn apply_update(mut self, incoming: &Payment, now: DateTime<Utc>) -> Self {
        self.status = incoming.status;
        self.updated_at = Some(incoming.updated_at.unwrap_or(now));
        self
    }
}

impl TryFrom<PaymentDraft> for Payment {
    type Error = PaymentError;

    fn try_from(draft: PaymentDraft) -> Result<Self, Self::Error> {
        Self::from_draft(draft)
    }
}

fn next_timestamp(previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = Utc::now();
    match previous {
        Some(prev) if now <= prev => prev + Duration::microseconds(1),
        _ => now,
    }
}
