use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Guest {
    pub id: String,
    pub event_id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Guest {
    pub fn new(event_id: String, name: String, email: String, phone: Option<String>, status: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_id,
            name,
            email,
            phone,
            status: status.unwrap_or_else(|| "invited".to_string()),
            created_at: Utc::now(),
        }
    }
}
