//! Acquiring bank client.
//!
//! Maps a validated payment submission onto the bank's wire protocol,
//! performs exactly one authorization attempt, and maps the raw answer
//! back. Retry policy, if any, belongs to the caller's transport setup,
//! never to this client.

use crate::config::AcquirerConfig;
use crate::dtos::ProcessPaymentRequest;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Authorization request in the bank's wire format.
#[derive(Debug, Serialize)]
pub struct BankPaymentRequest {
    #[serde(rename = "Card_Number")]
    pub card_number: String,
    /// Composed "MM/YYYY" expiry, zero-padded month.
    #[serde(rename = "Expiry_Date")]
    pub expiry_date: String,
    #[serde(rename = "Currency")]
    pub currency: String,
    #[serde(rename = "Amount")]
    pub amount: i64,
    #[serde(rename = "Cvv")]
    pub cvv: String,
}

impl BankPaymentRequest {
    /// Copies card number, CVV, currency and amount verbatim and
    /// composes the expiry string from the month/year pair.
    pub fn from_submission(request: &ProcessPaymentRequest) -> Self {
        Self {
            card_number: request.card_number.clone(),
            expiry_date: compose_expiry(request.expiry_month, request.expiry_year),
            currency: request.currency.clone(),
            amount: request.amount,
            cvv: request.cvv.clone(),
        }
    }
}

/// The bank's verdict on a 2xx answer.
#[derive(Debug, Deserialize)]
pub struct BankPaymentResponse {
    #[serde(rename = "Authorized")]
    pub authorized: bool,
    /// Opaque code issued by the bank; decoded but never persisted.
    #[serde(rename = "Authorization_Code")]
    pub authorization_code: Uuid,
}

/// Result of one authorization attempt that completed over the wire.
#[derive(Debug)]
pub enum BankAuthorization {
    /// The bank returned an explicit authorized/declined verdict.
    Decision(BankPaymentResponse),
    /// The bank answered with a non-success status; no verdict exists
    /// and the caller applies the fail-safe policy.
    Unavailable,
}

#[derive(Debug, Error)]
pub enum AcquirerError {
    #[error("acquiring bank unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("acquiring bank returned an unreadable response: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Client for the acquiring bank's authorization endpoint.
#[derive(Clone)]
pub struct AcquirerClient {
    client: Client,
    base_url: String,
}

impl AcquirerClient {
    pub fn new(config: &AcquirerConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Submit one authorization attempt to the bank.
    ///
    /// A non-success HTTP status is not an error: it means the bank made
    /// no decision, and is reported as [`BankAuthorization::Unavailable`].
    /// Only transport failures and unreadable bodies surface as errors.
    /// Card data is never logged.
    pub async fn authorize(
        &self,
        request: &BankPaymentRequest,
    ) -> Result<BankAuthorization, AcquirerError> {
        let url = format!("{}/payments", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(AcquirerError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, "Acquiring bank returned no authorization decision");
            return Ok(BankAuthorization::Unavailable);
        }

        let body = response.text().await.map_err(AcquirerError::Transport)?;
        let decision: BankPaymentResponse =
            serde_json::from_str(&body).map_err(AcquirerError::Decode)?;

        tracing::info!(
            authorized = decision.authorized,
            "Acquiring bank returned a decision"
        );

        Ok(BankAuthorization::Decision(decision))
    }
}

/// Zero-padded two-digit month, "/", four-digit year.
pub fn compose_expiry(month: u32, year: i32) -> String {
    format!("{month:02}/{year}")
}
