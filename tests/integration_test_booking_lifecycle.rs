mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use event_backend::domain::models::payment::Payment;
use serde_json::json;
use tokio::sync::mpsc;
use uuid::Uuid;

async fn setup_event(app: &TestApp) -> (String, String, String) {
    let (token, user_id) = app.signup("Booker", "booker@example.com", "secret1").await;
    let venue = app.create_venue(&token, "Grand Hall", "loc-1", 100, 500.0).await;

    let res = app.request("POST", "/api/events", Some(&token), Some(json!({
        "eventTitle": "Seminar Day",
        "eventType": "seminar",
        "eventDate": "2030-06-01",
        "eventTime": "18:00",
        "maxCapacity": 50,
        "locationId": "loc-1",
        "venueId": venue["id"],
        "isPrivate": false
    }))).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let event = parse_body(res).await;

    (token, user_id, event["id"].as_str().unwrap().to_string())
}

async fn create_pending_booking(app: &TestApp, token: &str, event_id: &str) -> String {
    let res = app.request("POST", "/api/bookings", Some(token), Some(json!({
        "eventId": event_id
    }))).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let booking = parse_body(res).await;
    assert_eq!(booking["status"], "pending");
    booking["id"].as_str().unwrap().to_string()
}

/// Inserts a payment row directly; the HTTP payment flow always settles, so
/// unsettled payment states are seeded through the repository.
async fn seed_payment(app: &TestApp, booking_id: &str, user_id: &str, status: &str) {
    let mut payment = Payment::new(booking_id.to_string(), user_id.to_string(), 250.0, "cash".to_string());
    payment.status = status.to_string();
    app.state.payment_repo.create(&payment).await.unwrap();
}

#[tokio::test]
async fn booking_intent_requires_an_existing_event() {
    let app = TestApp::new().await;
    let (token, _, _) = setup_event(&app).await;

    let res = app.request("POST", "/api/bookings", Some(&token), Some(json!({
        "eventId": "no-such-event"
    }))).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn confirming_a_missing_booking_is_not_found() {
    let app = TestApp::new().await;

    let res = app.request(
        "PUT",
        &format!("/api/bookings/confirm/{}", Uuid::new_v4()),
        None,
        Some(json!({ "userId": "u1" })),
    ).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = parse_body(res).await;
    assert_eq!(body["error"], "Booking not found");
}

#[tokio::test]
async fn confirm_succeeds_without_a_registered_connection() {
    let app = TestApp::new().await;
    let (token, user_id, event_id) = setup_event(&app).await;
    let booking_id = create_pending_booking(&app, &token, &event_id).await;

    // No websocket connection registered for the user: the response must
    // still be a success and the notification is silently dropped.
    let res = app.request(
        "PUT",
        &format!("/api/bookings/confirm/{}", booking_id),
        None,
        Some(json!({ "userId": user_id })),
    ).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["status"], "confirmed");
}

#[tokio::test]
async fn confirm_delivers_notification_to_registered_connection() {
    let app = TestApp::new().await;
    let (token, user_id, event_id) = setup_event(&app).await;
    let booking_id = create_pending_booking(&app, &token, &event_id).await;

    let (tx, mut rx) = mpsc::unbounded_channel();
    app.state.registry.register(&user_id, Uuid::new_v4(), tx);

    let res = app.request(
        "PUT",
        &format!("/api/bookings/confirm/{}", booking_id),
        None,
        Some(json!({ "userId": user_id })),
    ).await;
    assert_eq!(res.status(), StatusCode::OK);

    let delivered = rx.try_recv().unwrap();
    assert!(delivered.contains("bookingNotification"));
    assert!(delivered.contains(&event_id));
}

#[tokio::test]
async fn confirm_is_rejected_once_the_booking_left_pending() {
    let app = TestApp::new().await;
    let (token, user_id, event_id) = setup_event(&app).await;
    let booking_id = create_pending_booking(&app, &token, &event_id).await;

    let first = app.request(
        "PUT",
        &format!("/api/bookings/confirm/{}", booking_id),
        None,
        Some(json!({ "userId": user_id })),
    ).await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = app.request(
        "PUT",
        &format!("/api/bookings/confirm/{}", booking_id),
        None,
        Some(json!({ "userId": user_id })),
    ).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn cancelling_a_missing_booking_is_not_found() {
    let app = TestApp::new().await;

    let res = app.request(
        "DELETE",
        &format!("/api/bookings/cancel/{}", Uuid::new_v4()),
        None,
        None,
    ).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = parse_body(res).await;
    assert_eq!(body["error"], "Booking not found");
}

#[tokio::test]
async fn cancel_requires_a_payment_record() {
    let app = TestApp::new().await;
    let (token, _, event_id) = setup_event(&app).await;
    let booking_id = create_pending_booking(&app, &token, &event_id).await;

    let res = app.request(
        "DELETE",
        &format!("/api/bookings/cancel/{}", booking_id),
        None,
        None,
    ).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = parse_body(res).await;
    assert_eq!(body["error"], "Payment not found for this booking");
}

#[tokio::test]
async fn cancel_with_unsettled_payment_succeeds() {
    let app = TestApp::new().await;
    let (token, user_id, event_id) = setup_event(&app).await;
    let booking_id = create_pending_booking(&app, &token, &event_id).await;
    seed_payment(&app, &booking_id, &user_id, "pending").await;

    let res = app.request(
        "DELETE",
        &format!("/api/bookings/cancel/{}", booking_id),
        None,
        None,
    ).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["message"], "Booking cancelled successfully");

    let booking = app.state.booking_repo.find_by_id(&booking_id).await.unwrap().unwrap();
    assert_eq!(booking.status, "cancelled");

    // Cancellation never reconciles the payment row.
    let payment = app.state.payment_repo.find_by_booking(&booking_id).await.unwrap().unwrap();
    assert_eq!(payment.status, "pending");
}

#[tokio::test]
async fn cancel_with_failed_payment_succeeds() {
    let app = TestApp::new().await;
    let (token, user_id, event_id) = setup_event(&app).await;
    let booking_id = create_pending_booking(&app, &token, &event_id).await;
    seed_payment(&app, &booking_id, &user_id, "failed").await;

    let res = app.request(
        "DELETE",
        &format!("/api/bookings/cancel/{}", booking_id),
        None,
        None,
    ).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn paid_bookings_are_not_refundable() {
    let app = TestApp::new().await;
    let (token, user_id, event_id) = setup_event(&app).await;
    let booking_id = create_pending_booking(&app, &token, &event_id).await;
    seed_payment(&app, &booking_id, &user_id, "paid").await;

    let res = app.request(
        "DELETE",
        &format!("/api/bookings/cancel/{}", booking_id),
        None,
        None,
    ).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    assert_eq!(body["error"], "No refunds are allowed for this booking.");

    // The refused cancellation must leave the booking untouched.
    let booking = app.state.booking_repo.find_by_id(&booking_id).await.unwrap().unwrap();
    assert_eq!(booking.status, "pending");
}

#[tokio::test]
async fn cancel_is_rejected_for_terminal_bookings() {
    let app = TestApp::new().await;
    let (token, user_id, event_id) = setup_event(&app).await;
    let booking_id = create_pending_booking(&app, &token, &event_id).await;
    seed_payment(&app, &booking_id, &user_id, "pending").await;

    let confirm = app.request(
        "PUT",
        &format!("/api/bookings/confirm/{}", booking_id),
        None,
        Some(json!({ "userId": user_id })),
    ).await;
    assert_eq!(confirm.status(), StatusCode::OK);

    let res = app.request(
        "DELETE",
        &format!("/api/bookings/cancel/{}", booking_id),
        None,
        None,
    ).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn confirm_requires_a_user_id() {
    let app = TestApp::new().await;
    let (token, _, event_id) = setup_event(&app).await;
    let booking_id = create_pending_booking(&app, &token, &event_id).await;

    let res = app.request(
        "PUT",
        &format!("/api/bookings/confirm/{}", booking_id),
        None,
        Some(json!({})),
    ).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    assert_eq!(body["error"], "User ID is required.");
}
