use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::{SigninRequest, SignupRequest};
use crate::api::dtos::responses::{AuthResponse, UserProfile};
use crate::domain::models::user::User;
use crate::error::{AppError, FieldError};
use crate::state::AppState;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};
use std::sync::Arc;
use tracing::info;

fn profile(user: &User) -> UserProfile {
    UserProfile {
        id: user.id.clone(),
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role.clone(),
    }
}

pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut errors = Vec::new();
    if payload.name.as_deref().is_none_or(|v| v.trim().is_empty()) {
        errors.push(FieldError::new("name", "name is required"));
    }
    if payload.email.as_deref().is_none_or(|v| v.trim().is_empty()) {
        errors.push(FieldError::new("email", "email is required"));
    }
    match payload.password.as_deref() {
        None | Some("") => errors.push(FieldError::new("password", "password is required")),
        Some(p) if p.len() < 6 => {
            errors.push(FieldError::new("password", "Password must be at least 6 characters"))
        }
        _ => {}
    }
    if !errors.is_empty() {
        return Err(AppError::FieldValidation(errors));
    }

    let name = payload.name.unwrap();
    let email = payload.email.unwrap();
    let password = payload.password.unwrap();

    if state.user_repo.find_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AppError::Internal)?
        .to_string();

    let user = state.user_repo.create(&User::new(name, email, password_hash)).await?;
    let token = state.auth_service.issue_token(&user)?;

    info!("User signed up: {}", user.id);
    Ok((StatusCode::CREATED, Json(AuthResponse { token, user: profile(&user) })))
}

pub async fn signin(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SigninRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = payload.email
        .ok_or_else(|| AppError::Validation("email is required".into()))?;
    let password = payload.password
        .ok_or_else(|| AppError::Validation("password is required".into()))?;

    let user = state.user_repo.find_by_email(&email).await?
        .ok_or(AppError::Unauthorized)?;

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| AppError::Internal)?;

    Argon2::default().verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Unauthorized)?;

    let token = state.auth_service.issue_token(&user)?;

    info!("User signed in: {}", user.id);
    Ok(Json(AuthResponse { token, user: profile(&user) }))
}
