use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, StatusCode},
};
use crate::domain::models::auth::CurrentUser;
use crate::state::AppState;
use std::sync::Arc;
use tracing::Span;

pub struct AuthUser(pub CurrentUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header_value = parts.headers.get(header::AUTHORIZATION)
            .ok_or(StatusCode::UNAUTHORIZED)?
            .to_str()
            .map_err(|_| StatusCode::UNAUTHORIZED)?;

        let token = header_value.strip_prefix("Bearer ")
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let claims = app_state.auth_service.verify(token)
            .map_err(|_| StatusCode::UNAUTHORIZED)?;

        let user = CurrentUser {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
        };

        Span::current().record("user_id", &user.id);

        Ok(AuthUser(user))
    }
}
