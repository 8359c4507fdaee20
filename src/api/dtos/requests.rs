use serde::Deserialize;

#[derive(Deserialize)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize)]
pub struct SigninRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Event-creation body. Every field is optional at the serde level so that
/// missing fields surface as one field-level error list instead of a
/// deserializer rejection.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub event_title: Option<String>,
    pub event_type: Option<String>,
    pub event_date: Option<String>,
    pub event_time: Option<String>,
    pub max_capacity: Option<i64>,
    pub location_id: Option<String>,
    pub venue_id: Option<String>,
    pub is_private: Option<bool>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    pub event_title: Option<String>,
    pub event_type: Option<String>,
    pub max_capacity: Option<i32>,
    pub location_id: Option<String>,
    pub venue_id: Option<String>,
    pub is_private: Option<bool>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFilterQuery {
    pub event_type: Option<String>,
    pub event_title: Option<String>,
    pub min_date: Option<String>,
    pub max_date: Option<String>,
    pub max_capacity: Option<i32>,
    pub location_id: Option<String>,
    pub venue_id: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVenueRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub location_id: Option<String>,
    pub capacity: Option<i64>,
    pub price: Option<f64>,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVenueRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub location_id: Option<String>,
    pub capacity: Option<i32>,
    pub price: Option<f64>,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueFilterQuery {
    pub min_capacity: Option<i32>,
    pub max_price: Option<f64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub event_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmBookingRequest {
    pub user_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub booking_id: Option<String>,
    pub user_id: Option<String>,
    pub amount: Option<f64>,
    pub method: Option<String>,
}

#[derive(Deserialize)]
pub struct AddGuestRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateGuestRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<String>,
}
