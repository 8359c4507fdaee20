use axum::{
    body::Body,
    extract::Request,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::api::handlers::{auth, booking, event, guest, health, payment, realtime, venue};
use crate::state::AppState;
use tower_http::{
    classify::ServerErrorsFailureClass,
    trace::TraceLayer,
};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Users
        .route("/api/users/signup", post(auth::signup))
        .route("/api/users/signin", post(auth::signin))

        // Events
        .route("/api/events", post(event::create_event).get(event::list_user_events))
        .route("/api/events/filter/events", get(event::filter_events))
        .route("/api/events/{id}", get(event::get_event).put(event::update_event).delete(event::delete_event))

        // Guests
        .route("/api/events/{event_id}/guests", post(guest::add_guest).get(guest::list_guests))
        .route("/api/guests/{guest_id}", put(guest::update_guest).delete(guest::delete_guest))

        // Venues
        .route("/api/venues", post(venue::create_venue).get(venue::list_venues))
        .route("/api/venues/{id}", get(venue::get_venue).put(venue::update_venue).delete(venue::delete_venue))

        // Bookings & Payments
        .route("/api/bookings", post(booking::create_booking))
        .route("/api/bookings/confirm/{booking_id}", put(booking::confirm_booking))
        .route("/api/bookings/cancel/{booking_id}", delete(booking::cancel_booking))
        .route("/api/payments/confirm", post(payment::confirm_payment))

        // Realtime
        .route("/ws", get(realtime::ws_upgrade))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
