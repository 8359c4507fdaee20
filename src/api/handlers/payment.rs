use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::CreatePaymentRequest;
use crate::api::dtos::responses::PaymentConfirmedResponse;
use crate::domain::models::booking;
use crate::domain::models::payment::{Payment, PAYMENT_METHODS};
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

/// Confirms a booking together with its payment: the booking moves from
/// pending to confirmed and a settled payment row is recorded.
pub async fn confirm_payment(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreatePaymentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let booking_id = payload.booking_id
        .ok_or_else(|| AppError::Validation("Booking ID is required.".into()))?;
    let user_id = payload.user_id
        .ok_or_else(|| AppError::Validation("User ID is required.".into()))?;
    let amount = payload.amount
        .ok_or_else(|| AppError::Validation("Amount is required.".into()))?;
    if amount <= 0.0 {
        return Err(AppError::Validation("Amount must be positive.".into()));
    }
    let method = payload.method
        .ok_or_else(|| AppError::Validation("Payment method is required.".into()))?;
    if !PAYMENT_METHODS.contains(&method.as_str()) {
        return Err(AppError::Validation("Payment method must be one of [cash, credit, paypal].".into()));
    }

    let booking = state.booking_repo.find_by_id(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    let confirmed = state.booking_repo
        .update_status_if(&booking.id, booking::STATUS_PENDING, booking::STATUS_CONFIRMED)
        .await?
        .ok_or(AppError::Conflict("Booking is not pending".into()))?;

    let payment = state.payment_repo
        .create(&Payment::new(confirmed.id.clone(), user_id, amount, method))
        .await?;

    info!("Payment recorded: {} for booking {}", payment.id, confirmed.id);
    Ok((StatusCode::CREATED, Json(PaymentConfirmedResponse { booking: confirmed, payment })))
}
