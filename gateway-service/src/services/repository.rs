use crate::models::{Payment, PaymentOutcome};
use anyhow::Result;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Process-local payment store.
///
/// Identifier and creation/update timestamps are assigned here, at the
/// moment of storage, never by callers. Reads see prior writes within
/// the process; durability across restarts is out of contract, matching
/// the reference deployment's in-memory database.
#[derive(Clone, Default)]
pub struct PaymentRepository {
    payments: Arc<DashMap<Uuid, Payment>>,
}

impl PaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a derived outcome, assigning a fresh identifier and both
    /// timestamps. Returns the record as persisted.
    pub async fn save(&self, outcome: PaymentOutcome) -> Result<Payment> {
        let now = Utc::now();
        let payment = Payment {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            outcome,
        };

        self.payments.insert(payment.id, payment.clone());
        Ok(payment)
    }

    /// Point lookup by identifier. Absence is `None`, not an error.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>> {
        Ok(self.payments.get(&id).map(|entry| entry.value().clone()))
    }
}
