// src/use_cases/questions.rs

use chrono::{DateTime, Utc};

use crate::{
    error::AppError,
    models::question::{ImageUpload, NewQuestion, Question},
    repository::DynQuestionRepository,
};

/// Lists every stored question.
pub struct GetAllQuestions {
    repository: DynQuestionRepository,
}

impl GetAllQuestions {
    pub fn new(repository: DynQuestionRepository) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Result<Vec<Question>, AppError> {
        self.repository.find_all().await
    }
}

/// Lists the questions belonging to one topic.
pub struct GetQuestionsByTopic {
    repository: DynQuestionRepository,
}

impl GetQuestionsByTopic {
    pub fn new(repository: DynQuestionRepository) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, topic: &str) -> Result<Vec<Question>, AppError> {
        self.repository.find_by_topic(topic).await
    }
}

/// Fetches a single question by id.
pub struct GetQuestion {
    repository: DynQuestionRepository,
}

impl GetQuestion {
    pub fn new(repository: DynQuestionRepository) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: &str) -> Result<Question, AppError> {
        self.repository.find_by_id(id).await
    }
}

/// Creates a question and returns its assigned id.
pub struct AddQuestion {
    repository: DynQuestionRepository,
}

impl AddQuestion {
    pub fn new(repository: DynQuestionRepository) -> Self {
        Self { repository }
    }

    pub async fn execute(
        &self,
        question: NewQuestion,
        image: Option<ImageUpload>,
    ) -> Result<String, AppError> {
        trace_upload(image.as_ref());
        self.repository.insert(question).await
    }
}

/// Replaces the content of an existing question and returns the update time.
pub struct UpdateQuestion {
    repository: DynQuestionRepository,
}

impl UpdateQuestion {
    pub fn new(repository: DynQuestionRepository) -> Self {
        Self { repository }
    }

    pub async fn execute(
        &self,
        id: &str,
        question: NewQuestion,
        image: Option<ImageUpload>,
    ) -> Result<DateTime<Utc>, AppError> {
        trace_upload(image.as_ref());
        self.repository.update(id, question).await
    }
}

/// Deletes a question and returns the deletion time.
pub struct DeleteQuestion {
    repository: DynQuestionRepository,
}

impl DeleteQuestion {
    pub fn new(repository: DynQuestionRepository) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: &str) -> Result<DateTime<Utc>, AppError> {
        self.repository.delete(id).await
    }
}

// Upload bytes are mirrored to object storage outside this service; only the
// derived path travels with the question row.
fn trace_upload(image: Option<&ImageUpload>) {
    if let Some(image) = image {
        tracing::debug!(
            filename = %image.filename,
            size = image.bytes.len(),
            "accepted image upload"
        );
    }
}
