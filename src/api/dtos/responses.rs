use crate::domain::models::{booking::Booking, payment::Payment};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCreatedResponse {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub capacity: i32,
    pub venue: String,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetailResponse {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub venue_id: String,
    pub is_private: bool,
    pub creator_id: String,
}

#[derive(Serialize)]
pub struct PaymentConfirmedResponse {
    pub booking: Booking,
    pub payment: Payment,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}
