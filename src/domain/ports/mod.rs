use crate::domain::models::{
    booking::Booking, event::{Event, EventFilter}, guest::Guest,
    payment::Payment, user::User, venue::{Venue, VenueFilter},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
}

#[async_trait]
pub trait VenueRepository: Send + Sync {
    async fn create(&self, venue: &Venue) -> Result<Venue, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Venue>, AppError>;
    async fn list(&self, filter: &VenueFilter) -> Result<Vec<Venue>, AppError>;
    async fn update(&self, venue: &Venue) -> Result<Venue, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Event>, AppError>;
    async fn filter(&self, filter: &EventFilter) -> Result<Vec<Event>, AppError>;
    async fn update(&self, event: &Event) -> Result<Event, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    async fn count_at_slot(&self, venue_id: &str, date: NaiveDate, time: NaiveTime) -> Result<i64, AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    /// Conditional status transition: updates only when the current status
    /// equals `expected` and returns the updated row, `None` when the row was
    /// missing or its status had already moved on.
    async fn update_status_if(&self, id: &str, expected: &str, next: &str) -> Result<Option<Booking>, AppError>;
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn create(&self, payment: &Payment) -> Result<Payment, AppError>;
    async fn find_by_booking(&self, booking_id: &str) -> Result<Option<Payment>, AppError>;
}

#[async_trait]
pub trait GuestRepository: Send + Sync {
    async fn create(&self, guest: &Guest) -> Result<Guest, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Guest>, AppError>;
    async fn find_by_event_and_email(&self, event_id: &str, email: &str) -> Result<Option<Guest>, AppError>;
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Guest>, AppError>;
    async fn update(&self, guest: &Guest) -> Result<Guest, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}
