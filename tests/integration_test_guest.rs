mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::{json, Value};

async fn setup_event(app: &TestApp, token: &str, date: &str) -> Value {
    let venue = app.create_venue(token, &format!("Hall {}", date), "loc-1", 100, 500.0).await;
    let res = app.request("POST", "/api/events", Some(token), Some(json!({
        "eventTitle": "Reception",
        "eventType": "wedding",
        "eventDate": date,
        "eventTime": "18:00",
        "maxCapacity": 80,
        "locationId": "loc-1",
        "venueId": venue["id"],
        "isPrivate": false
    }))).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    parse_body(res).await
}

#[tokio::test]
async fn guest_can_be_added_to_an_event() {
    let app = TestApp::new().await;
    let (token, _) = app.signup("Host", "host@example.com", "secret1").await;
    let event = setup_event(&app, &token, "2030-06-01").await;

    let res = app.request(
        "POST",
        &format!("/api/events/{}/guests", event["id"].as_str().unwrap()),
        Some(&token),
        Some(json!({ "name": "Alice", "email": "alice@example.com", "phone": "555-0100" })),
    ).await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body = parse_body(res).await;
    assert_eq!(body["name"], "Alice");
    assert_eq!(body["status"], "invited");
}

#[tokio::test]
async fn duplicate_guest_email_for_same_event_conflicts() {
    let app = TestApp::new().await;
    let (token, _) = app.signup("Host", "host@example.com", "secret1").await;
    let event = setup_event(&app, &token, "2030-06-01").await;
    let uri = format!("/api/events/{}/guests", event["id"].as_str().unwrap());

    let first = app.request("POST", &uri, Some(&token), Some(json!({
        "name": "Alice", "email": "alice@example.com"
    }))).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.request("POST", &uri, Some(&token), Some(json!({
        "name": "Alice Again", "email": "alice@example.com"
    }))).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body = parse_body(second).await;
    assert_eq!(body["error"], "A guest with this email already exists for this event");
}

#[tokio::test]
async fn same_email_is_allowed_across_events() {
    let app = TestApp::new().await;
    let (token, _) = app.signup("Host", "host@example.com", "secret1").await;
    let event_a = setup_event(&app, &token, "2030-06-01").await;
    let event_b = setup_event(&app, &token, "2030-06-02").await;

    let res = app.request(
        "POST",
        &format!("/api/events/{}/guests", event_a["id"].as_str().unwrap()),
        Some(&token),
        Some(json!({ "name": "Alice", "email": "alice@example.com" })),
    ).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = app.request(
        "POST",
        &format!("/api/events/{}/guests", event_b["id"].as_str().unwrap()),
        Some(&token),
        Some(json!({ "name": "Alice", "email": "alice@example.com" })),
    ).await;
    assert_eq!(res.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn guest_requires_an_existing_event() {
    let app = TestApp::new().await;
    let (token, _) = app.signup("Host", "host@example.com", "secret1").await;

    let res = app.request(
        "POST",
        "/api/events/no-such-event/guests",
        Some(&token),
        Some(json!({ "name": "Alice", "email": "alice@example.com" })),
    ).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn guest_fields_are_validated() {
    let app = TestApp::new().await;
    let (token, _) = app.signup("Host", "host@example.com", "secret1").await;
    let event = setup_event(&app, &token, "2030-06-01").await;

    let res = app.request(
        "POST",
        &format!("/api/events/{}/guests", event["id"].as_str().unwrap()),
        Some(&token),
        Some(json!({ "phone": "555-0100" })),
    ).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    let fields: Vec<&str> = body["errors"].as_array().unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"name"));
    assert!(fields.contains(&"email"));
}

#[tokio::test]
async fn guests_can_be_listed_updated_and_removed() {
    let app = TestApp::new().await;
    let (token, _) = app.signup("Host", "host@example.com", "secret1").await;
    let event = setup_event(&app, &token, "2030-06-01").await;
    let guests_uri = format!("/api/events/{}/guests", event["id"].as_str().unwrap());

    let created = app.request("POST", &guests_uri, Some(&token), Some(json!({
        "name": "Alice", "email": "alice@example.com"
    }))).await;
    let guest = parse_body(created).await;
    let guest_id = guest["id"].as_str().unwrap();

    let res = app.request("GET", &guests_uri, Some(&token), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await.as_array().unwrap().len(), 1);

    let res = app.request(
        "PUT",
        &format!("/api/guests/{}", guest_id),
        Some(&token),
        Some(json!({ "status": "attending" })),
    ).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["status"], "attending");

    let res = app.request("DELETE", &format!("/api/guests/{}", guest_id), Some(&token), None).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.request("GET", &guests_uri, Some(&token), None).await;
    assert_eq!(parse_body(res).await.as_array().unwrap().len(), 0);
}
