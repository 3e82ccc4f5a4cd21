use crate::domain::{models::matching::Match, ports::MatchRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

pub struct PostgresMatchRepo {
    pool: PgPool,
}

impl PostgresMatchRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn claim_slot(tx: &mut Transaction<'_, Postgres>, event_id: &str, venue_id: &str) -> Result<(), AppError> {
    let result = sqlx::query(
        "UPDATE venues SET available_slots = available_slots - 1 WHERE id = $1 AND event_id = $2 AND is_active = TRUE AND available_slots > 0"
    )
        .bind(venue_id)
        .bind(event_id)
        .execute(&mut **tx)
        .await
        .map_err(AppError::Database)?;

    if result.rows_affected() == 0 {
        return Err(AppError::Conflict("Venue has no available slots".into()));
    }
    Ok(())
}

/// Recomputes free slots from the matches currently seated at the venue.
async fn sync_slots(tx: &mut Transaction<'_, Postgres>, venue_id: &str) -> Result<(), AppError> {
    sqlx::query(
        "UPDATE venues SET available_slots = GREATEST(0, total_capacity - (SELECT COUNT(*) FROM matches m WHERE m.venue_id = venues.id)::INT) WHERE id = $1"
    )
        .bind(venue_id)
        .execute(&mut **tx)
        .await
        .map_err(AppError::Database)?;
    Ok(())
}

#[async_trait]
impl MatchRepository for PostgresMatchRepo {
    async fn create(&self, m: &Match) -> Result<Match, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        if let Some(venue_id) = &m.venue_id {
            claim_slot(&mut tx, &m.event_id, venue_id).await?;
        }

        let created = sqlx::query_as::<_, Match>(
            r#"INSERT INTO matches (id, event_id, participant1_id, participant2_id, venue_id, compatibility_score, status, notes, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
               RETURNING *"#
        )
            .bind(&m.id)
            .bind(&m.event_id)
            .bind(&m.participant1_id)
            .bind(&m.participant2_id)
            .bind(&m.venue_id)
            .bind(m.compatibility_score)
            .bind(&m.status)
            .bind(&m.notes)
            .bind(m.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, event_id: &str, id: &str) -> Result<Option<Match>, AppError> {
        sqlx::query_as::<_, Match>("SELECT * FROM matches WHERE event_id = $1 AND id = $2")
            .bind(event_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Match>, AppError> {
        sqlx::query_as::<_, Match>("SELECT * FROM matches WHERE event_id = $1 ORDER BY created_at DESC")
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, m: &Match, previous_venue_id: Option<&str>) -> Result<Match, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let venue_changed = m.venue_id.as_deref() != previous_venue_id;
        if venue_changed {
            if let Some(new) = &m.venue_id {
                claim_slot(&mut tx, &m.event_id, new).await?;
            }
        }

        let updated = sqlx::query_as::<_, Match>(
            r#"UPDATE matches SET venue_id=$1, compatibility_score=$2, status=$3, notes=$4
               WHERE id=$5 AND event_id=$6 RETURNING *"#
        )
            .bind(&m.venue_id)
            .bind(m.compatibility_score)
            .bind(&m.status)
            .bind(&m.notes)
            .bind(&m.id)
            .bind(&m.event_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Match not found".into()))?;

        if let Some(old) = previous_venue_id.filter(|_| venue_changed) {
            sync_slots(&mut tx, old).await?;
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(updated)
    }

    async fn delete(&self, m: &Match) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let result = sqlx::query("DELETE FROM matches WHERE id = $1 AND event_id = $2")
            .bind(&m.id)
            .bind(&m.event_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Match not found".into()));
        }
        if let Some(venue_id) = &m.venue_id {
            sync_slots(&mut tx, venue_id).await?;
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn count_by_event(&self, event_id: &str) -> Result<i64, AppError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM matches WHERE event_id = $1")
            .bind(event_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn count_by_venue(&self, venue_id: &str) -> Result<i64, AppError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM matches WHERE venue_id = $1")
            .bind(venue_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
