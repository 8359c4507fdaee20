use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::FromRow;

/// Event types accepted at creation time.
pub const EVENT_TYPES: [&str; 5] = ["wedding", "engagement", "birthday", "seminar", "workshop"];

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Event {
    pub id: String,
    pub event_title: String,
    pub event_type: String,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub max_capacity: i32,
    pub location_id: String,
    pub venue_id: String,
    pub user_id: String,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
}

/// Filter, pagination and ordering for event listings. The sort column and
/// direction are validated against a whitelist before this struct is built.
#[derive(Debug, Clone)]
pub struct EventFilter {
    pub event_type: Option<String>,
    pub event_title: Option<String>,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub max_capacity: Option<i32>,
    pub location_id: Option<String>,
    pub venue_id: Option<String>,
    pub page: i64,
    pub page_size: i64,
    pub sort_by: String,
    pub sort_order: String,
}

impl EventFilter {
    pub fn sort_column(&self) -> &'static str {
        match self.sort_by.as_str() {
            "max_capacity" => "max_capacity",
            _ => "event_date",
        }
    }

    pub fn sort_direction(&self) -> &'static str {
        if self.sort_order == "desc" { "DESC" } else { "ASC" }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}
