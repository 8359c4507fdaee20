use axum::{extract::{Path, Query, State}, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::{CreateEventRequest, EventFilterQuery, UpdateEventRequest};
use crate::api::dtos::responses::{EventCreatedResponse, EventDetailResponse};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::event::{Event, EventFilter, EVENT_TYPES};
use crate::domain::services::scheduling;
use crate::error::{AppError, FieldError};
use crate::state::AppState;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Creates an event. Validation precedence is fixed: field presence, schedule
/// validity, strict time format, venue existence, location match, capacity,
/// slot conflict. The first failing check wins and each step has its own
/// error message, so the order is observable behavior.
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut errors = Vec::new();

    if payload.event_title.as_deref().is_none_or(|v| v.trim().is_empty()) {
        errors.push(FieldError::new("eventTitle", "eventTitle is required"));
    }
    match payload.event_type.as_deref() {
        None | Some("") => errors.push(FieldError::new("eventType", "eventType is required")),
        Some(t) if !EVENT_TYPES.contains(&t) => errors.push(FieldError::new(
            "eventType",
            "Event type must be one of the following: wedding, engagement, birthday, seminar, workshop",
        )),
        _ => {}
    }
    if payload.event_date.as_deref().is_none_or(str::is_empty) {
        errors.push(FieldError::new("eventDate", "eventDate is required"));
    }
    if payload.event_time.as_deref().is_none_or(str::is_empty) {
        errors.push(FieldError::new("eventTime", "eventTime is required"));
    }
    match payload.max_capacity {
        None => errors.push(FieldError::new("maxCapacity", "maxCapacity is required")),
        Some(c) if c <= 0 => {
            errors.push(FieldError::new("maxCapacity", "Max capacity must be a positive integer"))
        }
        _ => {}
    }
    if payload.location_id.as_deref().is_none_or(str::is_empty) {
        errors.push(FieldError::new("locationId", "locationId is required"));
    }
    if payload.venue_id.as_deref().is_none_or(str::is_empty) {
        errors.push(FieldError::new("venueId", "venueId is required"));
    }
    if payload.is_private.is_none() {
        errors.push(FieldError::new("isPrivate", "Must be a boolean value"));
    }

    if !errors.is_empty() {
        return Err(AppError::FieldValidation(errors));
    }

    let date_str = payload.event_date.unwrap();
    let time_str = payload.event_time.unwrap();
    let max_capacity = payload.max_capacity.unwrap();
    let location_id = payload.location_id.unwrap();
    let venue_id = payload.venue_id.unwrap();

    let (event_date, event_time) = scheduling::validate_schedule(&date_str, &time_str)?;

    let venue = state.venue_repo.find_by_id(&venue_id).await?
        .ok_or(AppError::NotFound("Venue not found".into()))?;

    if location_id != venue.location_id {
        return Err(AppError::Validation("The location does not match the venue location".into()));
    }

    scheduling::ensure_capacity(max_capacity, venue.capacity)?;

    let conflicts = state.event_repo.count_at_slot(&venue.id, event_date, event_time).await?;
    if conflicts > 0 {
        return Err(AppError::Conflict("The venue is already booked at this date and time".into()));
    }

    let event = Event {
        id: Uuid::new_v4().to_string(),
        event_title: payload.event_title.unwrap(),
        event_type: payload.event_type.unwrap(),
        event_date,
        event_time,
        max_capacity: max_capacity as i32,
        location_id,
        venue_id: venue.id,
        user_id: user.id,
        is_private: payload.is_private.unwrap(),
        created_at: Utc::now(),
    };

    let created = state.event_repo.create(&event).await?;
    info!("Event created: {} at venue {}", created.id, created.venue_id);

    Ok((StatusCode::CREATED, Json(EventCreatedResponse {
        id: created.id,
        title: created.event_title,
        date: created.event_date,
        time: created.event_time,
        capacity: created.max_capacity,
        venue: created.venue_id,
        is_private: created.is_private,
        created_at: created.created_at,
    })))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if event.is_private && event.user_id != user.id {
        return Err(AppError::Forbidden("Unauthorized access to private event".into()));
    }

    Ok(Json(EventDetailResponse {
        id: event.id,
        title: event.event_title,
        date: event.event_date,
        time: event.event_time,
        venue_id: event.venue_id,
        is_private: event.is_private,
        creator_id: event.user_id,
    }))
}

pub async fn list_user_events(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_repo.list_by_user(&user.id).await?;
    Ok(Json(events))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(event_id): Path<String>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if event.user_id != user.id {
        return Err(AppError::Forbidden("You do not have permission to update this event".into()));
    }

    if let Some(venue_id) = payload.venue_id {
        state.venue_repo.find_by_id(&venue_id).await?
            .ok_or(AppError::NotFound("Venue not found".into()))?;
        event.venue_id = venue_id;
    }
    if let Some(val) = payload.event_title { event.event_title = val; }
    if let Some(val) = payload.event_type {
        if !EVENT_TYPES.contains(&val.as_str()) {
            return Err(AppError::Validation(
                "Event type must be one of the following: wedding, engagement, birthday, seminar, workshop".into(),
            ));
        }
        event.event_type = val;
    }
    if let Some(val) = payload.max_capacity {
        if val <= 0 {
            return Err(AppError::Validation("Max capacity must be a positive integer".into()));
        }
        event.max_capacity = val;
    }
    if let Some(val) = payload.location_id { event.location_id = val; }
    if let Some(val) = payload.is_private { event.is_private = val; }

    let updated = state.event_repo.update(&event).await?;
    info!("Event updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if event.user_id != user.id {
        return Err(AppError::Forbidden("Missing deletion permissions".into()));
    }

    state.event_repo.delete(&event.id).await?;
    info!("Event deleted: {}", event.id);
    Ok(Json(serde_json::json!({ "success": true })))
}

pub async fn filter_events(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
    Query(params): Query<EventFilterQuery>,
) -> Result<impl IntoResponse, AppError> {
    let sort_by = params.sort_by.unwrap_or_else(|| "event_date".to_string());
    if sort_by != "event_date" && sort_by != "max_capacity" {
        return Err(AppError::Validation("sortBy must be one of [event_date, max_capacity]".into()));
    }
    let sort_order = params.sort_order.unwrap_or_else(|| "asc".to_string());
    if sort_order != "asc" && sort_order != "desc" {
        return Err(AppError::Validation("sortOrder must be one of [asc, desc]".into()));
    }

    let page = params.page.unwrap_or(1);
    let page_size = params.page_size.unwrap_or(10);
    if page < 1 || page_size < 1 {
        return Err(AppError::Validation("page and pageSize must be positive integers".into()));
    }

    let min_date = parse_filter_date(params.min_date.as_deref(), "minDate")?;
    let max_date = parse_filter_date(params.max_date.as_deref(), "maxDate")?;
    if let (Some(min), Some(max)) = (min_date, max_date) {
        if max < min {
            return Err(AppError::Validation("maxDate cannot be earlier than minDate".into()));
        }
    }

    let filter = EventFilter {
        event_type: params.event_type,
        event_title: params.event_title,
        min_date,
        max_date,
        max_capacity: params.max_capacity,
        location_id: params.location_id,
        venue_id: params.venue_id,
        page,
        page_size,
        sort_by,
        sort_order,
    };

    let events = state.event_repo.filter(&filter).await?;
    Ok(Json(events))
}

fn parse_filter_date(value: Option<&str>, field: &str) -> Result<Option<NaiveDate>, AppError> {
    match value {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| AppError::Validation(format!("{} must be a valid date (YYYY-MM-DD)", field))),
    }
}
