use crate::domain::{models::payment::Payment, ports::PaymentRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqlitePaymentRepo {
    pool: SqlitePool,
}

impl SqlitePaymentRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentRepository for SqlitePaymentRepo {
    async fn create(&self, payment: &Payment) -> Result<Payment, AppError> {
        sqlx::query_as::<_, Payment>(
            "INSERT INTO payments (id, booking_id, user_id, amount, method, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&payment.id).bind(&payment.booking_id).bind(&payment.user_id)
            .bind(payment.amount).bind(&payment.method).bind(&payment.status)
            .bind(payment.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_booking(&self, booking_id: &str) -> Result<Option<Payment>, AppError> {
        sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE booking_id = ?")
            .bind(booking_id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
}
