// src/repository/memory.rs

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use uuid::Uuid;

use super::QuestionRepository;
use crate::{
    error::AppError,
    models::question::{NewQuestion, Question},
};

/// In-memory question store backing the HTTP integration tests.
#[derive(Default)]
pub struct InMemoryQuestionRepository {
    questions: Mutex<HashMap<String, Question>>,
}

impl InMemoryQuestionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Question>>, AppError> {
        self.questions
            .lock()
            .map_err(|_| AppError::InternalServerError("question store lock poisoned".to_string()))
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn find_all(&self) -> Result<Vec<Question>, AppError> {
        let questions = self.lock()?;
        let mut all: Vec<Question> = questions.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn find_by_topic(&self, topic: &str) -> Result<Vec<Question>, AppError> {
        let questions = self.lock()?;
        let mut matching: Vec<Question> = questions
            .values()
            .filter(|q| q.topic == topic)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn find_by_id(&self, id: &str) -> Result<Question, AppError> {
        let questions = self.lock()?;
        questions.get(id).cloned().ok_or_else(AppError::not_found)
    }

    async fn insert(&self, question: NewQuestion) -> Result<String, AppError> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let mut questions = self.lock()?;
        questions.insert(
            id.clone(),
            Question {
                id: id.clone(),
                question: question.question,
                answer: question.answer,
                choices: Json(question.choices),
                topic: question.topic,
                img_url: question.img_url,
                created_at: Some(now),
                updated_at: Some(now),
            },
        );

        Ok(id)
    }

    async fn update(
        &self,
        id: &str,
        question: NewQuestion,
    ) -> Result<DateTime<Utc>, AppError> {
        let mut questions = self.lock()?;
        let stored = questions.get_mut(id).ok_or_else(AppError::not_found)?;

        let now = Utc::now();
        stored.question = question.question;
        stored.answer = question.answer;
        stored.choices = Json(question.choices);
        stored.topic = question.topic;
        if question.img_url.is_some() {
            stored.img_url = question.img_url;
        }
        stored.updated_at = Some(now);

        Ok(now)
    }

    async fn delete(&self, id: &str) -> Result<DateTime<Utc>, AppError> {
        let mut questions = self.lock()?;
        questions.remove(id).ok_or_else(AppError::not_found)?;
        Ok(Utc::now())
    }
}
