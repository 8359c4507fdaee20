use event_backend::{
    api::router::create_router,
    config::Config,
    domain::services::{auth_service::AuthService, notifier::ConnectionRegistry},
    infra::repositories::{
        sqlite_booking_repo::SqliteBookingRepo,
        sqlite_event_repo::SqliteEventRepo,
        sqlite_guest_repo::SqliteGuestRepo,
        sqlite_payment_repo::SqlitePaymentRepo,
        sqlite_user_repo::SqliteUserRepo,
        sqlite_venue_repo::SqliteVenueRepo,
    },
    state::AppState,
};
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use serde_json::{json, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret: "test-secret-key".to_string(),
            environment: "test".to_string(),
        };

        let state = Arc::new(AppState {
            config: config.clone(),
            user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
            venue_repo: Arc::new(SqliteVenueRepo::new(pool.clone())),
            event_repo: Arc::new(SqliteEventRepo::new(pool.clone())),
            booking_repo: Arc::new(SqliteBookingRepo::new(pool.clone())),
            payment_repo: Arc::new(SqlitePaymentRepo::new(pool.clone())),
            guest_repo: Arc::new(SqliteGuestRepo::new(pool.clone())),
            auth_service: Arc::new(AuthService::new(&config.jwt_secret)),
            registry: Arc::new(ConnectionRegistry::new()),
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Signs up a fresh user and returns (token, user_id).
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> (String, String) {
        let response = self.request(
            "POST",
            "/api/users/signup",
            None,
            Some(json!({ "name": name, "email": email, "password": password })),
        ).await;

        if !response.status().is_success() {
            panic!("Signup failed in test helper: status {}", response.status());
        }

        let body = parse_body(response).await;
        (
            body["token"].as_str().unwrap().to_string(),
            body["user"]["id"].as_str().unwrap().to_string(),
        )
    }

    pub async fn create_venue(&self, token: &str, name: &str, location_id: &str, capacity: i64, price: f64) -> Value {
        let response = self.request(
            "POST",
            "/api/venues",
            Some(token),
            Some(json!({
                "name": name,
                "location": "Downtown",
                "locationId": location_id,
                "capacity": capacity,
                "price": price,
            })),
        ).await;

        if !response.status().is_success() {
            panic!("Venue creation failed in test helper: status {}", response.status());
        }

        parse_body(response).await
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}

pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
