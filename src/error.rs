use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Validation failed")]
    FieldValidation(Vec<FieldError>),
    #[error("Business rule violation: {0}")]
    BusinessRule(String),
    #[error("Internal server error")]
    Internal,
    #[error("Internal server error: {0}")]
    InternalWithMsg(String),
}

// Internal error detail is only surfaced outside production deployments.
fn expose_detail() -> bool {
    static EXPOSE: OnceLock<bool> = OnceLock::new();
    *EXPOSE.get_or_init(|| {
        std::env::var("APP_ENV")
            .map(|env| env != "production")
            .unwrap_or(true)
    })
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Database(e) => {
                if let Some(db_err) = e.as_database_error() {
                    let code = db_err.code().unwrap_or_default();

                    // 2067 = SQLite Unique Constraint
                    // 23505 = PostgreSQL Unique Violation
                    if code == "2067" || code == "23505" {
                        return (
                            StatusCode::CONFLICT,
                            Json(json!({ "error": "Resource already exists (duplicate entry)" }))
                        ).into_response();
                    }
                }

                error!("Database error: {:?}", e);
                if expose_detail() {
                    (StatusCode::INTERNAL_SERVER_ERROR, format!("Database error: {}", e))
                } else {
                    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
                }
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::FieldValidation(errors) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Validation failed", "errors": errors }))
                ).into_response();
            }
            AppError::BusinessRule(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string()),
            AppError::InternalWithMsg(msg) => {
                error!("Internal error: {}", msg);
                if expose_detail() {
                    (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
                } else {
                    (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
                }
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
