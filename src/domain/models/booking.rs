use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_CONFIRMED: &str = "confirmed";
pub const STATUS_CANCELLED: &str = "cancelled";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub event_id: String,
    pub user_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(event_id: String, user_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_id,
            user_id,
            status: STATUS_PENDING.to_string(),
            created_at: Utc::now(),
        }
    }
}
