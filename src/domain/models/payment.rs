use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_PAID: &str = "paid";
pub const STATUS_FAILED: &str = "failed";

pub const PAYMENT_METHODS: [&str; 3] = ["cash", "credit", "paypal"];

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Payment {
    pub id: String,
    pub booking_id: String,
    pub user_id: String,
    pub amount: f64,
    pub method: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(booking_id: String, user_id: String, amount: f64, method: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            booking_id,
            user_id,
            amount,
            method,
            status: STATUS_PAID.to_string(),
            created_at: Utc::now(),
        }
    }
}
