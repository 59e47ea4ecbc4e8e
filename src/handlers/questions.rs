// src/handlers/questions.rs

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::{
    error::AppError,
    models::question::{ImageUpload, NewQuestion, QuestionPayload},
    repository::DynQuestionRepository,
    use_cases::{
        AddQuestion, DeleteQuestion, GetAllQuestions, GetQuestion, GetQuestionsByTopic,
        UpdateQuestion,
    },
    utils::img_url::generate_img_url,
};

/// Query parameters for listing questions.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub topic: Option<String>,
}

/// Multipart fields of a store/update request: a serialized question
/// payload under `json` plus an optional image under `imgFile`.
struct QuestionForm {
    json: Option<String>,
    image: Option<ImageUpload>,
}

/// Lists all questions, optionally filtered by topic.
///
/// An empty result is a valid 200 with an empty list, never a 404.
pub async fn index(
    State(repository): State<DynQuestionRepository>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let questions = match params.topic {
        Some(topic) => {
            if topic.trim().is_empty() {
                return Err(AppError::BadRequest("topic must not be blank".to_string()));
            }
            GetQuestionsByTopic::new(repository).execute(&topic).await?
        }
        None => GetAllQuestions::new(repository).execute().await?,
    };

    Ok(Json(questions))
}

/// Retrieves a single question by id.
pub async fn show(
    State(repository): State<DynQuestionRepository>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    validate_id(&id)?;

    let question = GetQuestion::new(repository).execute(&id).await?;

    Ok(Json(question))
}

/// Creates a new question from a multipart payload.
///
/// When an image is attached, its storage path is derived from the topic and
/// the original filename before the create use-case runs.
pub async fn store(
    State(repository): State<DynQuestionRepository>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = read_question_form(multipart).await?;
    let (payload, image) = parse_question_form(form)?;

    let img_url = image
        .as_ref()
        .and_then(|img| generate_img_url(&payload.topic, &img.filename));

    let id = AddQuestion::new(repository)
        .execute(NewQuestion::from_payload(payload, img_url), image)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": format!("Question created with id: {}", id),
        })),
    ))
}

/// Replaces the content of an existing question.
pub async fn update(
    State(repository): State<DynQuestionRepository>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    validate_id(&id)?;

    let form = read_question_form(multipart).await?;
    let (payload, image) = parse_question_form(form)?;

    let img_url = image
        .as_ref()
        .and_then(|img| generate_img_url(&payload.topic, &img.filename));

    let update_time = UpdateQuestion::new(repository)
        .execute(&id, NewQuestion::from_payload(payload, img_url), image)
        .await?;

    Ok(Json(json!({ "updateTime": update_time })))
}

/// Deletes a question by id.
pub async fn destroy(
    State(repository): State<DynQuestionRepository>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    validate_id(&id)?;

    let delete_time = DeleteQuestion::new(repository).execute(&id).await?;

    Ok(Json(json!({ "deleteTime": delete_time })))
}

fn validate_id(id: &str) -> Result<(), AppError> {
    if id.trim().is_empty() {
        return Err(AppError::BadRequest("id must not be blank".to_string()));
    }
    Ok(())
}

/// Drains the multipart stream into its known fields.
/// Unknown fields are ignored.
async fn read_question_form(mut multipart: Multipart) -> Result<QuestionForm, AppError> {
    let mut form = QuestionForm {
        json: None,
        image: None,
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "json" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.json = Some(text);
            }
            "imgFile" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.image = Some(ImageUpload { filename, bytes });
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Checks the form shape, parses the `json` field and validates the result.
/// Every failure here is a 400; no use-case runs past this point on error.
fn parse_question_form(
    form: QuestionForm,
) -> Result<(QuestionPayload, Option<ImageUpload>), AppError> {
    let json = form
        .json
        .ok_or_else(|| AppError::BadRequest("json payload is required".to_string()))?;

    let payload: QuestionPayload = serde_json::from_str(&json)?;

    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    Ok((payload, form.image))
}
