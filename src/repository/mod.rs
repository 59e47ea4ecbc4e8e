// src/repository/mod.rs

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    error::AppError,
    models::question::{NewQuestion, Question},
};

pub use memory::InMemoryQuestionRepository;
pub use postgres::PgQuestionRepository;

/// Shared repository handle injected into the handlers at startup.
pub type DynQuestionRepository = Arc<dyn QuestionRepository>;

/// Persistence seam for Question entities.
///
/// Unknown-id reads, updates and deletes yield [`AppError::not_found`];
/// everything else surfaces as `InternalServerError`.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Question>, AppError>;

    async fn find_by_topic(&self, topic: &str) -> Result<Vec<Question>, AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Question, AppError>;

    /// Inserts a new question and returns its assigned id.
    async fn insert(&self, question: NewQuestion) -> Result<String, AppError>;

    /// Replaces the content fields of an existing question and returns the
    /// new `updated_at`. A missing `img_url` keeps the stored one.
    async fn update(&self, id: &str, question: NewQuestion)
    -> Result<DateTime<Utc>, AppError>;

    /// Deletes a question and returns the deletion time.
    async fn delete(&self, id: &str) -> Result<DateTime<Utc>, AppError>;
}
