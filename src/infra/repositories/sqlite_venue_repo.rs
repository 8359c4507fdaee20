use crate::domain::{models::venue::{Venue, VenueFilter}, ports::VenueRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

pub struct SqliteVenueRepo {
    pool: SqlitePool,
}

impl SqliteVenueRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VenueRepository for SqliteVenueRepo {
    async fn create(&self, venue: &Venue) -> Result<Venue, AppError> {
        sqlx::query_as::<_, Venue>(
            "INSERT INTO venues (id, name, location, location_id, capacity, price, image_url, description, user_id, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&venue.id).bind(&venue.name).bind(&venue.location).bind(&venue.location_id)
            .bind(venue.capacity).bind(venue.price).bind(&venue.image_url)
            .bind(&venue.description).bind(&venue.user_id).bind(venue.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Venue>, AppError> {
        sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE id = ?")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, filter: &VenueFilter) -> Result<Vec<Venue>, AppError> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT * FROM venues WHERE 1=1");
        if let Some(min_capacity) = filter.min_capacity {
            qb.push(" AND capacity >= ").push_bind(min_capacity);
        }
        if let Some(max_price) = filter.max_price {
            qb.push(" AND price <= ").push_bind(max_price);
        }
        qb.push(" ORDER BY created_at DESC");
        qb.build_query_as::<Venue>().fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, venue: &Venue) -> Result<Venue, AppError> {
        sqlx::query_as::<_, Venue>(
            "UPDATE venues SET name=?, location=?, location_id=?, capacity=?, price=?, image_url=?, description=?
             WHERE id=?
             RETURNING *"
        )
            .bind(&venue.name).bind(&venue.location).bind(&venue.location_id)
            .bind(venue.capacity).bind(venue.price).bind(&venue.image_url)
            .bind(&venue.description).bind(&venue.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM venues WHERE id = ?")
            .bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Venue not found".into()));
        }
        Ok(())
    }
}
