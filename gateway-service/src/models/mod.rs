use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Final status of a processing attempt.
///
/// `Rejected` is the fail-safe default: it is recorded whenever the
/// acquiring bank answered without an explicit verdict. A payment is
/// never marked `Authorized` or `Declined` without an affirmative or
/// negative signal from the bank.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Authorized,
    Declined,
    Rejected,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Authorized => "authorized",
            PaymentStatus::Declined => "declined",
            PaymentStatus::Rejected => "rejected",
        }
    }
}

/// The derived outcome of a processing attempt, before it is stored.
///
/// Only the last four digits of the card survive past the bank call;
/// the full number and the CVV are never part of this shape.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PaymentOutcome {
    pub status: PaymentStatus,
    pub last_four_card_digits: String,
    pub expiry_month: u32,
    pub expiry_year: i32,
    pub currency: String,
    pub amount: i64,
}

/// A stored payment record. Identifier and timestamps are assigned by
/// the repository at write time, never by callers, and the record is
/// immutable once created.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Payment {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub outcome: PaymentOutcome,
}
