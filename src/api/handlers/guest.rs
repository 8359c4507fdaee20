use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::{AddGuestRequest, UpdateGuestRequest};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::guest::Guest;
use crate::error::{AppError, FieldError};
use crate::state::AppState;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

pub async fn add_guest(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
    Path(event_id): Path<String>,
    Json(payload): Json<AddGuestRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut errors = Vec::new();
    if payload.name.as_deref().is_none_or(|v| v.trim().is_empty()) {
        errors.push(FieldError::new("name", "name is required"));
    }
    if payload.email.as_deref().is_none_or(|v| v.trim().is_empty()) {
        errors.push(FieldError::new("email", "email is required"));
    }
    if !errors.is_empty() {
        return Err(AppError::FieldValidation(errors));
    }

    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let email = payload.email.unwrap();

    // One guest record per (event, email).
    if state.guest_repo.find_by_event_and_email(&event.id, &email).await?.is_some() {
        return Err(AppError::Conflict("A guest with this email already exists for this event".into()));
    }

    let guest = Guest::new(event.id, payload.name.unwrap(), email, payload.phone, payload.status);
    let created = state.guest_repo.create(&guest).await?;

    info!("Guest added: {} to event {}", created.id, created.event_id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_guests(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let guests = state.guest_repo.list_by_event(&event.id).await?;
    Ok(Json(guests))
}

pub async fn update_guest(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
    Path(guest_id): Path<String>,
    Json(payload): Json<UpdateGuestRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut guest = state.guest_repo.find_by_id(&guest_id).await?
        .ok_or(AppError::NotFound("Guest not found".into()))?;

    if let Some(val) = payload.name { guest.name = val; }
    if let Some(val) = payload.email { guest.email = val; }
    if let Some(val) = payload.phone { guest.phone = Some(val); }
    if let Some(val) = payload.status { guest.status = val; }

    let updated = state.guest_repo.update(&guest).await?;
    info!("Guest updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_guest(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
    Path(guest_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let guest = state.guest_repo.find_by_id(&guest_id).await?
        .ok_or(AppError::NotFound("Guest not found".into()))?;

    state.guest_repo.delete(&guest.id).await?;
    info!("Guest removed: {}", guest.id);
    Ok(Json(json!({ "success": true })))
}
