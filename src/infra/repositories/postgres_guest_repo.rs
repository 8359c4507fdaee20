use crate::domain::{models::guest::Guest, ports::GuestRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresGuestRepo {
    pool: PgPool,
}

impl PostgresGuestRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GuestRepository for PostgresGuestRepo {
    async fn create(&self, guest: &Guest) -> Result<Guest, AppError> {
        sqlx::query_as::<_, Guest>(
            "INSERT INTO guests (id, event_id, name, email, phone, status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *"
        )
            .bind(&guest.id).bind(&guest.event_id).bind(&guest.name).bind(&guest.email)
            .bind(&guest.phone).bind(&guest.status).bind(guest.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Guest>, AppError> {
        sqlx::query_as::<_, Guest>("SELECT * FROM guests WHERE id = $1")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_event_and_email(&self, event_id: &str, email: &str) -> Result<Option<Guest>, AppError> {
        sqlx::query_as::<_, Guest>("SELECT * FROM guests WHERE event_id = $1 AND email = $2")
            .bind(event_id).bind(email).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Guest>, AppError> {
        sqlx::query_as::<_, Guest>("SELECT * FROM guests WHERE event_id = $1 ORDER BY created_at DESC")
            .bind(event_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, guest: &Guest) -> Result<Guest, AppError> {
        sqlx::query_as::<_, Guest>(
            "UPDATE guests SET name=$1, email=$2, phone=$3, status=$4 WHERE id=$5 RETURNING *"
        )
            .bind(&guest.name).bind(&guest.email).bind(&guest.phone).bind(&guest.status)
            .bind(&guest.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM guests WHERE id = $1")
            .bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Guest not found".into()));
        }
        Ok(())
    }
}
