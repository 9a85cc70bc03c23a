use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::{Payment, PaymentStatus};

/// Currencies the gateway accepts. Checked case-insensitively.
pub const SUPPORTED_CURRENCIES: [&str; 3] = ["USD", "EUR", "GBP"];

/// A merchant's card payment submission. Field names follow the public
/// API contract (PascalCase on the wire).
///
/// All field checks are independent; the (month, year) pair is
/// additionally validated jointly against the current time, so
/// validation must run at call time and is never cached.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "PascalCase")]
#[validate(schema(function = "validate_expiry_in_future", skip_on_field_errors = true))]
pub struct ProcessPaymentRequest {
    #[validate(
        length(
            min = 14,
            max = 19,
            message = "The card number must be between 14 and 19 characters long."
        ),
        custom(function = "validate_numeric")
    )]
    pub card_number: String,

    #[validate(range(min = 1, max = 12, message = "The expiry month must be between 1 and 12."))]
    pub expiry_month: u32,

    #[validate(range(min = 1, max = 2100, message = "The expiry year must be a valid year."))]
    pub expiry_year: i32,

    #[validate(custom(function = "validate_currency"))]
    pub currency: String,

    #[validate(range(min = 1, message = "The amount must be a positive integer."))]
    pub amount: i64,

    #[validate(
        length(
            min = 3,
            max = 4,
            message = "The cvv must be between 3 and 4 characters long."
        ),
        custom(function = "validate_numeric")
    )]
    pub cvv: String,
}

/// Query parameters for payment retrieval.
#[derive(Debug, Deserialize)]
pub struct PaymentQuery {
    #[serde(rename = "paymentId")]
    pub payment_id: Uuid,
}

/// A stored payment as returned to merchants.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PaymentResponse {
    pub id: Uuid,
    pub status: PaymentStatus,
    pub last_four_card_digits: String,
    pub expiry_month: u32,
    pub expiry_year: i32,
    pub currency: String,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            status: payment.outcome.status,
            last_four_card_digits: payment.outcome.last_four_card_digits,
            expiry_month: payment.outcome.expiry_month,
            expiry_year: payment.outcome.expiry_year,
            currency: payment.outcome.currency,
            amount: payment.outcome.amount,
            created_at: payment.created_at,
            updated_at: payment.updated_at,
        }
    }
}

fn validate_numeric(value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("numeric");
        err.message = Some("The value must contain only numeric characters.".into());
        Err(err)
    }
}

fn validate_currency(value: &str) -> Result<(), ValidationError> {
    let code = value.to_ascii_uppercase();
    if value.len() == 3 && SUPPORTED_CURRENCIES.contains(&code.as_str()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("currency");
        err.message = Some("The currency must be a supported ISO 4217 currency code.".into());
        Err(err)
    }
}

/// Joint (month, year) check: the first of the expiry month must lie
/// strictly after today. Explicit two-field check against the whole
/// request, evaluated at call time.
fn validate_expiry_in_future(request: &ProcessPaymentRequest) -> Result<(), ValidationError> {
    let expired = || {
        let mut err = ValidationError::new("expiry_in_past");
        err.message = Some("The combination of year and month must be in the future.".into());
        err
    };

    // Field-level range checks run first, but guard anyway so an
    // out-of-range month can never make date construction panic.
    let expiry = NaiveDate::from_ymd_opt(request.expiry_year, request.expiry_month, 1)
        .ok_or_else(expired)?;

    if expiry > Utc::now().date_naive() {
        Ok(())
    } else {
        Err(expired())
    }
}
