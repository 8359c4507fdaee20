use axum::{extract::{Path, Query, State}, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::{CreateVenueRequest, UpdateVenueRequest, VenueFilterQuery};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::venue::{Venue, VenueFilter};
use crate::error::{AppError, FieldError};
use crate::state::AppState;
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub async fn create_venue(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateVenueRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut errors = Vec::new();
    if payload.name.as_deref().is_none_or(|v| v.trim().is_empty()) {
        errors.push(FieldError::new("name", "name is required"));
    }
    if payload.location.as_deref().is_none_or(|v| v.trim().is_empty()) {
        errors.push(FieldError::new("location", "location is required"));
    }
    if payload.location_id.as_deref().is_none_or(|v| v.trim().is_empty()) {
        errors.push(FieldError::new("locationId", "locationId is required"));
    }
    match payload.capacity {
        None => errors.push(FieldError::new("capacity", "capacity is required")),
        Some(c) if c < 1 => errors.push(FieldError::new("capacity", "capacity must be at least 1")),
        _ => {}
    }
    match payload.price {
        None => errors.push(FieldError::new("price", "price is required")),
        Some(p) if p < 0.0 => errors.push(FieldError::new("price", "price must not be negative")),
        _ => {}
    }
    if !errors.is_empty() {
        return Err(AppError::FieldValidation(errors));
    }

    let venue = Venue {
        id: Uuid::new_v4().to_string(),
        name: payload.name.unwrap(),
        location: payload.location.unwrap(),
        location_id: payload.location_id.unwrap(),
        capacity: payload.capacity.unwrap() as i32,
        price: payload.price.unwrap(),
        image_url: payload.image_url,
        description: payload.description.unwrap_or_default(),
        user_id: user.id,
        created_at: Utc::now(),
    };

    let created = state.venue_repo.create(&venue).await?;
    info!("Venue created: {}", created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_venues(
    State(state): State<Arc<AppState>>,
    Query(params): Query<VenueFilterQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = VenueFilter {
        min_capacity: params.min_capacity,
        max_price: params.max_price,
    };
    let venues = state.venue_repo.list(&filter).await?;
    let count = venues.len();
    Ok(Json(json!({ "data": venues, "count": count })))
}

pub async fn get_venue(
    State(state): State<Arc<AppState>>,
    Path(venue_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let venue = state.venue_repo.find_by_id(&venue_id).await?
        .ok_or(AppError::NotFound("Venue not found".into()))?;
    Ok(Json(venue))
}

pub async fn update_venue(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(venue_id): Path<String>,
    Json(payload): Json<UpdateVenueRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut venue = state.venue_repo.find_by_id(&venue_id).await?
        .ok_or(AppError::NotFound("Venue not found".into()))?;

    if venue.user_id != user.id {
        return Err(AppError::Forbidden("You do not have permission to modify this venue".into()));
    }

    if let Some(val) = payload.name { venue.name = val; }
    if let Some(val) = payload.location { venue.location = val; }
    if let Some(val) = payload.location_id { venue.location_id = val; }
    if let Some(val) = payload.capacity {
        if val < 1 {
            return Err(AppError::Validation("capacity must be at least 1".into()));
        }
        venue.capacity = val;
    }
    if let Some(val) = payload.price {
        if val < 0.0 {
            return Err(AppError::Validation("price must not be negative".into()));
        }
        venue.price = val;
    }
    if let Some(val) = payload.image_url { venue.image_url = Some(val); }
    if let Some(val) = payload.description { venue.description = val; }

    let updated = state.venue_repo.update(&venue).await?;
    info!("Venue updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_venue(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(venue_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let venue = state.venue_repo.find_by_id(&venue_id).await?
        .ok_or(AppError::NotFound("Venue not found".into()))?;

    if venue.user_id != user.id {
        return Err(AppError::Forbidden("You do not have permission to modify this venue".into()));
    }

    state.venue_repo.delete(&venue.id).await?;
    info!("Venue deleted: {}", venue.id);
    Ok(Json(json!({ "success": true })))
}
