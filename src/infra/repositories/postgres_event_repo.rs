use crate::domain::{models::event::{Event, EventFilter}, ports::EventRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepo {
    async fn create(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "INSERT INTO events (id, event_title, event_type, event_date, event_time, max_capacity, location_id, venue_id, user_id, is_private, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING *"
        )
            .bind(&event.id).bind(&event.event_title).bind(&event.event_type)
            .bind(event.event_date).bind(event.event_time).bind(event.max_capacity)
            .bind(&event.location_id).bind(&event.venue_id).bind(&event.user_id)
            .bind(event.is_private).bind(event.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE user_id = $1 ORDER BY event_date ASC")
            .bind(user_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn filter(&self, filter: &EventFilter) -> Result<Vec<Event>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM events WHERE 1=1");
        if let Some(ref event_type) = filter.event_type {
            qb.push(" AND event_type = ").push_bind(event_type);
        }
        if let Some(ref title) = filter.event_title {
            qb.push(" AND event_title ILIKE ").push_bind(format!("%{}%", title));
        }
        if let Some(min_date) = filter.min_date {
            qb.push(" AND event_date >= ").push_bind(min_date);
        }
        if let Some(max_date) = filter.max_date {
            qb.push(" AND event_date <= ").push_bind(max_date);
        }
        if let Some(max_capacity) = filter.max_capacity {
            qb.push(" AND max_capacity <= ").push_bind(max_capacity);
        }
        if let Some(ref location_id) = filter.location_id {
            qb.push(" AND location_id = ").push_bind(location_id);
        }
        if let Some(ref venue_id) = filter.venue_id {
            qb.push(" AND venue_id = ").push_bind(venue_id);
        }
        // Sort column/direction come from a whitelist, never from raw input.
        qb.push(format!(" ORDER BY {} {}", filter.sort_column(), filter.sort_direction()));
        qb.push(" LIMIT ").push_bind(filter.page_size);
        qb.push(" OFFSET ").push_bind(filter.offset());

        qb.build_query_as::<Event>().fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "UPDATE events SET event_title=$1, event_type=$2, max_capacity=$3, location_id=$4, venue_id=$5, is_private=$6
             WHERE id=$7
             RETURNING *"
        )
            .bind(&event.event_title).bind(&event.event_type).bind(event.max_capacity)
            .bind(&event.location_id).bind(&event.venue_id).bind(event.is_private)
            .bind(&event.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Event not found".into()));
        }
        Ok(())
    }

    async fn count_at_slot(&self, venue_id: &str, date: NaiveDate, time: NaiveTime) -> Result<i64, AppError> {
        let row = sqlx::query(
            "SELECT COUNT(*) as count FROM events WHERE venue_id = $1 AND event_date = $2 AND event_time = $3"
        )
            .bind(venue_id).bind(date).bind(time)
            .fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }
}
