use crate::domain::{models::form_question::FormQuestion, ports::FormQuestionRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteFormQuestionRepo {
    pool: SqlitePool,
}

impl SqliteFormQuestionRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FormQuestionRepository for SqliteFormQuestionRepo {
    async fn create(&self, question: &FormQuestion) -> Result<FormQuestion, AppError> {
        sqlx::query_as::<_, FormQuestion>(
            r#"INSERT INTO form_questions (
                id, event_id, question_key, label, kind, options, is_required, is_active, display_order, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *"#
        )
            .bind(&question.id)
            .bind(&question.event_id)
            .bind(&question.question_key)
            .bind(&question.label)
            .bind(&question.kind)
            .bind(&question.options)
            .bind(question.is_required)
            .bind(question.is_active)
            .bind(question.display_order)
            .bind(question.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, event_id: &str, id: &str) -> Result<Option<FormQuestion>, AppError> {
        sqlx::query_as::<_, FormQuestion>("SELECT * FROM form_questions WHERE event_id = ? AND id = ?")
            .bind(event_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_event(&self, event_id: &str, active_only: bool) -> Result<Vec<FormQuestion>, AppError> {
        let sql = if active_only {
            "SELECT * FROM form_questions WHERE event_id = ? AND is_active = TRUE ORDER BY display_order ASC, created_at ASC"
        } else {
            "SELECT * FROM form_questions WHERE event_id = ? ORDER BY display_order ASC, created_at ASC"
        };

        sqlx::query_as::<_, FormQuestion>(sql)
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, question: &FormQuestion) -> Result<FormQuestion, AppError> {
        sqlx::query_as::<_, FormQuestion>(
            r#"UPDATE form_questions SET label=?, kind=?, options=?, is_required=?, is_active=?, display_order=?
               WHERE id=? AND event_id=? RETURNING *"#
        )
            .bind(&question.label)
            .bind(&question.kind)
            .bind(&question.options)
            .bind(question.is_required)
            .bind(question.is_active)
            .bind(question.display_order)
            .bind(&question.id)
            .bind(&question.event_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Form question not found".into()))
    }

    async fn delete(&self, event_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM form_questions WHERE id = ? AND event_id = ?")
            .bind(id)
            .bind(event_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Form question not found".into()));
        }
        Ok(())
    }

    async fn reorder(&self, event_id: &str, orders: &[(String, i32)]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        for (id, display_order) in orders {
            let result = sqlx::query("UPDATE form_questions SET display_order = ? WHERE id = ? AND event_id = ?")
                .bind(display_order)
                .bind(id)
                .bind(event_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
            if result.rows_affected() == 0 {
                return Err(AppError::NotFound(format!("Form question {} not found", id)));
            }
        }
        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }
}
