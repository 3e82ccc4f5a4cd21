use crate::domain::{models::venue::Venue, ports::VenueRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresVenueRepo {
    pool: PgPool,
}

impl PostgresVenueRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VenueRepository for PostgresVenueRepo {
    async fn create(&self, venue: &Venue) -> Result<Venue, AppError> {
        sqlx::query_as::<_, Venue>(
            r#"INSERT INTO venues (id, event_id, name, address, total_capacity, available_slots, min_age, is_active, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
               RETURNING *"#
        )
            .bind(&venue.id)
            .bind(&venue.event_id)
            .bind(&venue.name)
            .bind(&venue.address)
            .bind(venue.total_capacity)
            .bind(venue.available_slots)
            .bind(venue.min_age)
            .bind(venue.is_active)
            .bind(venue.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, event_id: &str, id: &str) -> Result<Option<Venue>, AppError> {
        sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE event_id = $1 AND id = $2")
            .bind(event_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Venue>, AppError> {
        sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE event_id = $1 ORDER BY created_at ASC")
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, venue: &Venue) -> Result<Venue, AppError> {
        sqlx::query_as::<_, Venue>(
            r#"UPDATE venues SET name=$1, address=$2, total_capacity=$3,
                   available_slots = GREATEST(0, $3 - (SELECT COUNT(*) FROM matches m WHERE m.venue_id = venues.id)::INT),
                   min_age=$4, is_active=$5
               WHERE id=$6 AND event_id=$7 RETURNING *"#
        )
            .bind(&venue.name)
            .bind(&venue.address)
            .bind(venue.total_capacity)
            .bind(venue.min_age)
            .bind(venue.is_active)
            .bind(&venue.id)
            .bind(&venue.event_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Venue not found".into()))
    }

    async fn deactivate(&self, event_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE venues SET is_active = FALSE WHERE id = $1 AND event_id = $2")
            .bind(id)
            .bind(event_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Venue not found".into()));
        }
        Ok(())
    }

    async fn delete(&self, event_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM venues WHERE id = $1 AND event_id = $2")
            .bind(id)
            .bind(event_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Venue not found".into()));
        }
        Ok(())
    }
}
