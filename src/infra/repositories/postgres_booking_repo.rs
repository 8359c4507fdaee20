use crate::domain::{models::booking::Booking, ports::BookingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, event_id, user_id, status, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.event_id).bind(&booking.user_id)
            .bind(&booking.status).bind(booking.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn update_status_if(&self, id: &str, expected: &str, next: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = $1 WHERE id = $2 AND status = $3 RETURNING *"
        )
            .bind(next).bind(id).bind(expected)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
}
