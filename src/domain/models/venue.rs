use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Venue {
    pub id: String,
    pub name: String,
    pub location: String,
    pub location_id: String,
    pub capacity: i32,
    pub price: f64,
    pub image_url: Option<String>,
    pub description: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

/// Capacity/price bounds filter for venue listings.
#[derive(Debug, Default, Clone)]
pub struct VenueFilter {
    pub min_capacity: Option<i32>,
    pub max_price: Option<f64>,
}
