// src/models/question.rs

use axum::body::Bytes;
use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};
use validator::Validate;

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    /// Repository-assigned identifier, immutable after creation.
    pub id: String,

    /// The text content of the question.
    pub question: String,

    /// The correct answer.
    pub answer: String,

    /// Ordered list of answer options (e.g., ["Option A", "Option B"]).
    /// Stored as a JSON array in the database.
    pub choices: Json<Vec<String>>,

    /// Question category (e.g., "Makanan", "Ikon", "Wisata").
    pub topic: String,

    /// Storage path of the question image, present only when an image
    /// was uploaded under a recognized topic.
    #[serde(rename = "imgUrl")]
    pub img_url: Option<String>,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO carried in the `json` multipart field of store/update requests.
#[derive(Debug, Deserialize, Validate)]
pub struct QuestionPayload {
    #[validate(length(min = 1, max = 1000, message = "question must not be empty"))]
    pub question: String,
    #[validate(length(min = 1, max = 500, message = "answer must not be empty"))]
    pub answer: String,
    #[validate(custom(function = validate_choices))]
    pub choices: Vec<String>,
    #[validate(length(min = 1, max = 50, message = "topic must not be empty"))]
    pub topic: String,
}

/// Content fields handed to the repository on insert/update.
/// `img_url` is already derived from the upload by the controller.
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub choices: Vec<String>,
    pub topic: String,
    pub img_url: Option<String>,
}

impl NewQuestion {
    pub fn from_payload(payload: QuestionPayload, img_url: Option<String>) -> Self {
        Self {
            question: payload.question,
            answer: payload.answer,
            choices: payload.choices,
            topic: payload.topic,
            img_url,
        }
    }
}

/// Transient image upload tied to one create/update request.
/// Only the derived `img_url` is persisted.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub bytes: Bytes,
}

fn validate_choices(choices: &[String]) -> Result<(), validator::ValidationError> {
    if choices.is_empty() {
        return Err(validator::ValidationError::new("choices_cannot_be_empty"));
    }
    for choice in choices {
        if choice.trim().is_empty() {
            return Err(validator::ValidationError::new("choice_cannot_be_blank"));
        }
        if choice.len() > 500 {
            return Err(validator::ValidationError::new("choice_too_long"));
        }
    }
    Ok(())
}
