//! Payment orchestration.
//!
//! Sequences bank authorization, status derivation and persistence for
//! one submission, and answers retrievals by identifier. Exactly one
//! authorization attempt is made per processing call; duplicate
//! submissions are the merchant's concern.

use crate::dtos::ProcessPaymentRequest;
use crate::models::{Payment, PaymentOutcome, PaymentStatus};
use crate::services::acquirer::{
    AcquirerClient, AcquirerError, BankAuthorization, BankPaymentRequest,
};
use crate::services::metrics::record_payment;
use crate::services::repository::PaymentRepository;
use service_core::error::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ProcessError {
    /// The authorization call never completed; the payment is
    /// indeterminate and nothing was persisted.
    #[error(transparent)]
    Acquirer(#[from] AcquirerError),

    /// A status was derived but the record could not be stored.
    #[error("failed to persist payment outcome: {0}")]
    Storage(#[source] anyhow::Error),
}

impl From<ProcessError> for AppError {
    fn from(error: ProcessError) -> Self {
        match error {
            ProcessError::Acquirer(err) => AppError::BadRequest(anyhow::Error::new(err)),
            ProcessError::Storage(err) => AppError::Storage(err),
        }
    }
}

#[derive(Clone)]
pub struct PaymentProcessor {
    acquirer: AcquirerClient,
    repository: PaymentRepository,
}

impl PaymentProcessor {
    pub fn new(acquirer: AcquirerClient, repository: PaymentRepository) -> Self {
        Self {
            acquirer,
            repository,
        }
    }

    /// Process one validated payment submission.
    ///
    /// A transport or decode failure propagates with nothing persisted.
    /// Every answered attempt is persisted, including fail-safe
    /// rejections, so the audit trail covers them.
    pub async fn process(&self, request: &ProcessPaymentRequest) -> Result<Payment, ProcessError> {
        let authorization = self
            .acquirer
            .authorize(&BankPaymentRequest::from_submission(request))
            .await?;

        let outcome = PaymentOutcome {
            status: derive_status(&authorization),
            last_four_card_digits: last_four(&request.card_number).to_string(),
            expiry_month: request.expiry_month,
            expiry_year: request.expiry_year,
            currency: request.currency.clone(),
            amount: request.amount,
        };

        let payment = self
            .repository
            .save(outcome)
            .await
            .map_err(ProcessError::Storage)?;

        record_payment(payment.outcome.status);
        tracing::info!(
            payment_id = %payment.id,
            status = payment.outcome.status.as_str(),
            currency = %payment.outcome.currency,
            amount = payment.outcome.amount,
            "Payment processed"
        );

        Ok(payment)
    }

    /// Retrieve a stored payment. Absence is `None`, not an error.
    pub async fn fetch(&self, id: Uuid) -> Result<Option<Payment>, ProcessError> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(ProcessError::Storage)
    }
}

/// Deterministic mapping from the bank's answer to the internal status.
/// With no explicit verdict the most restrictive status wins.
fn derive_status(authorization: &BankAuthorization) -> PaymentStatus {
    match authorization {
        BankAuthorization::Decision(decision) if decision.authorized => PaymentStatus::Authorized,
        BankAuthorization::Decision(_) => PaymentStatus::Declined,
        BankAuthorization::Unavailable => PaymentStatus::Rejected,
    }
}

/// Trailing four characters of the card number. The validator's minimum
/// length makes this infallible for any request that reaches processing.
fn last_four(card_number: &str) -> &str {
    &card_number[card_number.len() - 4..]
}
