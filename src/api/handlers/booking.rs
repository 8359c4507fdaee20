use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::{ConfirmBookingRequest, CreateBookingRequest};
use crate::api::dtos::responses::MessageResponse;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::booking::{self, Booking};
use crate::domain::models::payment;
use crate::error::AppError;
use crate::state::AppState;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info};

/// Registers booking intent: a pending booking for the authenticated user.
/// Confirmation happens later, either directly or through the payment flow.
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event_id = payload.event_id
        .ok_or_else(|| AppError::Validation("Event ID is required.".into()))?;

    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let created = state.booking_repo.create(&Booking::new(event.id, user.id)).await?;
    info!("Booking created: {} for event {}", created.id, created.event_id);
    Ok((StatusCode::CREATED, Json(created)))
}

/// Confirms a pending booking and pushes a best-effort notification to the
/// user's registered realtime connection. A user without a live registered
/// connection still gets a success response; the notification is dropped.
pub async fn confirm_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
    Json(payload): Json<ConfirmBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = payload.user_id
        .ok_or_else(|| AppError::Validation("User ID is required.".into()))?;

    let booking = state.booking_repo.find_by_id(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    // Conditional update: only a pending booking may move to confirmed, so a
    // concurrent confirm or a terminal state loses here instead of silently
    // overwriting.
    let confirmed = state.booking_repo
        .update_status_if(&booking.id, booking::STATUS_PENDING, booking::STATUS_CONFIRMED)
        .await?
        .ok_or(AppError::Conflict("Booking is not pending".into()))?;

    let delivered = state.registry.notify_user(&user_id, &json!({
        "type": "bookingNotification",
        "message": format!("Your booking for event {} is confirmed!", confirmed.event_id),
        "userId": user_id,
    }));
    if !delivered {
        debug!("Notification for booking {} dropped: user {} not connected", confirmed.id, user_id);
    }

    info!("Booking confirmed: {}", confirmed.id);
    Ok(Json(confirmed))
}

/// Cancels a pending booking. Refused when the associated payment has been
/// settled; the payment row itself is never touched here.
pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_id(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    let payment = state.payment_repo.find_by_booking(&booking.id).await?
        .ok_or(AppError::NotFound("Payment not found for this booking".into()))?;

    if payment.status == payment::STATUS_PAID {
        return Err(AppError::BusinessRule("No refunds are allowed for this booking.".into()));
    }

    state.booking_repo
        .update_status_if(&booking.id, booking::STATUS_PENDING, booking::STATUS_CANCELLED)
        .await?
        .ok_or(AppError::Conflict("Booking is not pending".into()))?;

    info!("Booking cancelled: {}", booking.id);
    Ok(Json(MessageResponse { message: "Booking cancelled successfully".to_string() }))
}
