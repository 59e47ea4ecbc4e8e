// src/repository/postgres.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::QuestionRepository;
use crate::{
    error::AppError,
    models::question::{NewQuestion, Question},
};

/// PostgreSQL-backed question store.
pub struct PgQuestionRepository {
    pool: PgPool,
}

impl PgQuestionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const QUESTION_COLUMNS: &str =
    "id, question, answer, choices, topic, img_url, created_at, updated_at";

#[async_trait]
impl QuestionRepository for PgQuestionRepository {
    async fn find_all(&self) -> Result<Vec<Question>, AppError> {
        let questions = sqlx::query_as::<_, Question>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list questions: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

        Ok(questions)
    }

    async fn find_by_topic(&self, topic: &str) -> Result<Vec<Question>, AppError> {
        let questions = sqlx::query_as::<_, Question>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE topic = $1 ORDER BY created_at DESC"
        ))
        .bind(topic)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list questions by topic: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

        Ok(questions)
    }

    async fn find_by_id(&self, id: &str) -> Result<Question, AppError> {
        sqlx::query_as::<_, Question>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch question {}: {:?}", id, e);
            AppError::InternalServerError(e.to_string())
        })?
        .ok_or_else(AppError::not_found)
    }

    async fn insert(&self, question: NewQuestion) -> Result<String, AppError> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            r#"
            INSERT INTO questions (id, question, answer, choices, topic, img_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&id)
        .bind(&question.question)
        .bind(&question.answer)
        .bind(sqlx::types::Json(&question.choices))
        .bind(&question.topic)
        .bind(&question.img_url)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert question: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

        Ok(id)
    }

    async fn update(
        &self,
        id: &str,
        question: NewQuestion,
    ) -> Result<DateTime<Utc>, AppError> {
        sqlx::query_scalar::<_, DateTime<Utc>>(
            r#"
            UPDATE questions
            SET question = $1,
                answer = $2,
                choices = $3,
                topic = $4,
                img_url = COALESCE($5, img_url),
                updated_at = NOW()
            WHERE id = $6
            RETURNING updated_at
            "#,
        )
        .bind(&question.question)
        .bind(&question.answer)
        .bind(sqlx::types::Json(&question.choices))
        .bind(&question.topic)
        .bind(&question.img_url)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update question {}: {:?}", id, e);
            AppError::InternalServerError(e.to_string())
        })?
        .ok_or_else(AppError::not_found)
    }

    async fn delete(&self, id: &str) -> Result<DateTime<Utc>, AppError> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete question {}: {:?}", id, e);
                AppError::InternalServerError(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found());
        }

        Ok(Utc::now())
    }
}
