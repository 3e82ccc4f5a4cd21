use crate::domain::{models::participant::Participant, ports::ParticipantRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresParticipantRepo {
    pool: PgPool,
}

impl PostgresParticipantRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParticipantRepository for PostgresParticipantRepo {
    async fn create(&self, participant: &Participant) -> Result<Participant, AppError> {
        sqlx::query_as::<_, Participant>(
            r#"INSERT INTO participants (id, event_id, name, email, phone_number, age, answers, status, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
               RETURNING *"#
        )
            .bind(&participant.id)
            .bind(&participant.event_id)
            .bind(&participant.name)
            .bind(&participant.email)
            .bind(&participant.phone_number)
            .bind(participant.age)
            .bind(&participant.answers)
            .bind(&participant.status)
            .bind(participant.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, event_id: &str, id: &str) -> Result<Option<Participant>, AppError> {
        sqlx::query_as::<_, Participant>("SELECT * FROM participants WHERE event_id = $1 AND id = $2")
            .bind(event_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Participant>, AppError> {
        sqlx::query_as::<_, Participant>("SELECT * FROM participants WHERE event_id = $1 ORDER BY created_at DESC")
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn email_exists(&self, event_id: &str, email: &str) -> Result<bool, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM participants WHERE event_id = $1 AND LOWER(email) = LOWER($2)")
            .bind(event_id)
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(count > 0)
    }

    async fn update(&self, participant: &Participant) -> Result<Participant, AppError> {
        sqlx::query_as::<_, Participant>(
            r#"UPDATE participants SET name=$1, email=$2, phone_number=$3, answers=$4, status=$5
               WHERE id=$6 AND event_id=$7 RETURNING *"#
        )
            .bind(&participant.name)
            .bind(&participant.email)
            .bind(&participant.phone_number)
            .bind(&participant.answers)
            .bind(&participant.status)
            .bind(&participant.id)
            .bind(&participant.event_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Participant not found".into()))
    }

    async fn delete(&self, event_id: &str, id: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // Matches involving the participant go with it, freeing their venue slots.
        sqlx::query("DELETE FROM matches WHERE event_id = $1 AND (participant1_id = $2 OR participant2_id = $3)")
            .bind(event_id)
            .bind(id)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        sqlx::query(
            "UPDATE venues SET available_slots = GREATEST(0, total_capacity - (SELECT COUNT(*) FROM matches m WHERE m.venue_id = venues.id)::INT) WHERE event_id = $1"
        )
            .bind(event_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let result = sqlx::query("DELETE FROM participants WHERE id = $1 AND event_id = $2")
            .bind(id)
            .bind(event_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Participant not found".into()));
        }
        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn count_by_event(&self, event_id: &str) -> Result<i64, AppError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM participants WHERE event_id = $1")
            .bind(event_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
