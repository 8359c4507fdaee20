use std::sync::Arc;
use crate::config::Config;
use crate::domain::ports::{
    BookingRepository, EventRepository, GuestRepository,
    PaymentRepository, UserRepository, VenueRepository,
};
use crate::domain::services::auth_service::AuthService;
use crate::domain::services::notifier::ConnectionRegistry;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub venue_repo: Arc<dyn VenueRepository>,
    pub event_repo: Arc<dyn EventRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub payment_repo: Arc<dyn PaymentRepository>,
    pub guest_repo: Arc<dyn GuestRepository>,
    pub auth_service: Arc<AuthService>,
    pub registry: Arc<ConnectionRegistry>,
}
