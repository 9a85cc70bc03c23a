//! Merchant-facing payment endpoints.
//!
//! Validation runs at this boundary; the processor never receives an
//! invalid submission. Card number and CVV are never logged.

use axum::{
    extract::{Query, State},
    Json,
};
use service_core::error::AppError;
use validator::Validate;

use crate::{
    dtos::{PaymentQuery, PaymentResponse, ProcessPaymentRequest},
    AppState,
};

/// Process a card payment on behalf of a merchant.
pub async fn process_payment(
    State(state): State<AppState>,
    Json(payload): Json<ProcessPaymentRequest>,
) -> Result<Json<PaymentResponse>, AppError> {
    payload.validate()?;

    tracing::info!(
        currency = %payload.currency,
        amount = payload.amount,
        "Processing payment"
    );

    let payment = state.processor.process(&payload).await?;

    Ok(Json(PaymentResponse::from(payment)))
}

/// Fetch a previously processed payment. An unknown identifier yields a
/// 200 with a null body, matching the public contract.
pub async fn get_payment(
    State(state): State<AppState>,
    Query(query): Query<PaymentQuery>,
) -> Result<Json<Option<PaymentResponse>>, AppError> {
    tracing::info!(payment_id = %query.payment_id, "Fetching payment");

    let payment = state.processor.fetch(query.payment_id).await?;

    Ok(Json(payment.map(PaymentResponse::from)))
}
