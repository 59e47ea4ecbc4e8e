// tests/questions_tests.rs

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quiz_api::{
    config::Config,
    error::AppError,
    models::question::{NewQuestion, Question},
    repository::{DynQuestionRepository, InMemoryQuestionRepository, QuestionRepository},
    routes,
    state::AppState,
};

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app(repository: DynQuestionRepository) -> String {
    let config = Config {
        database_url: "postgres://unused-in-tests".to_string(),
        rust_log: "error".to_string(),
        app_port: 0,
    };

    let state = AppState { repository, config };
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

async fn spawn_app_in_memory() -> String {
    spawn_app(Arc::new(InMemoryQuestionRepository::new())).await
}

fn question_json(topic: &str) -> String {
    serde_json::json!({
        "question": "Makanan khas Bandung yang terbuat dari tahu?",
        "answer": "Batagor",
        "choices": ["Batagor", "Pempek", "Gudeg", "Rendang"],
        "topic": topic,
    })
    .to_string()
}

fn multipart_form(json: String) -> reqwest::multipart::Form {
    reqwest::multipart::Form::new().text("json", json)
}

fn multipart_form_with_image(json: String, filename: &str) -> reqwest::multipart::Form {
    multipart_form(json).part(
        "imgFile",
        reqwest::multipart::Part::bytes(vec![0u8; 32]).file_name(filename.to_string()),
    )
}

/// Creates a question and returns the id embedded in the 201 message.
async fn create_question(client: &reqwest::Client, address: &str, topic: &str) -> String {
    let response = client
        .post(format!("{}/questions", address))
        .multipart(multipart_form(question_json(topic)))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 201);

    let body: serde_json::Value = response.json().await.unwrap();
    let message = body["message"].as_str().unwrap();
    let prefix = "Question created with id: ";
    assert!(message.starts_with(prefix), "unexpected message: {message}");
    message[prefix.len()..].to_string()
}

#[tokio::test]
async fn unknown_path_returns_404() {
    let address = spawn_app_in_memory().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn index_on_empty_store_returns_empty_list() {
    let address = spawn_app_in_memory().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/questions", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let questions: Vec<serde_json::Value> = response.json().await.unwrap();
    assert!(questions.is_empty());
}

#[tokio::test]
async fn index_with_blank_topic_fails_validation() {
    let address = spawn_app_in_memory().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/questions?topic=%20%20", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "topic must not be blank");
}

#[tokio::test]
async fn index_filters_by_exact_topic() {
    let address = spawn_app_in_memory().await;
    let client = reqwest::Client::new();

    create_question(&client, &address, "Makanan").await;
    create_question(&client, &address, "Wisata").await;

    let all: Vec<serde_json::Value> = client
        .get(format!("{}/questions", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    let filtered: Vec<serde_json::Value> = client
        .get(format!("{}/questions?topic=Wisata", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["topic"], "Wisata");
}

#[tokio::test]
async fn store_with_image_derives_img_url() {
    let address = spawn_app_in_memory().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/questions", address))
        .multipart(multipart_form_with_image(question_json("Makanan"), "cat.png"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 201);

    let questions: Vec<serde_json::Value> = client
        .get(format!("{}/questions", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let img_url = questions[0]["imgUrl"].as_str().expect("imgUrl missing");
    assert!(img_url.starts_with("foods/"), "unexpected imgUrl: {img_url}");
    assert!(img_url.ends_with("-cat.png"), "unexpected imgUrl: {img_url}");

    let millis = &img_url["foods/".len()..img_url.len() - "-cat.png".len()];
    assert!(millis.chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn store_with_unknown_topic_drops_image() {
    let address = spawn_app_in_memory().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/questions", address))
        .multipart(multipart_form_with_image(question_json("Unknown"), "cat.png"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 201);

    let questions: Vec<serde_json::Value> = client
        .get(format!("{}/questions", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(questions[0]["imgUrl"].is_null());
}

#[tokio::test]
async fn store_returns_id_usable_for_show() {
    let address = spawn_app_in_memory().await;
    let client = reqwest::Client::new();

    let id = create_question(&client, &address, "Ikon").await;

    let response = client
        .get(format!("{}/questions/{}", address, id))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let question: serde_json::Value = response.json().await.unwrap();
    assert_eq!(question["id"], id.as_str());
    assert_eq!(question["answer"], "Batagor");
    assert_eq!(question["choices"][0], "Batagor");
}

#[tokio::test]
async fn store_without_json_field_fails_validation() {
    let address = spawn_app_in_memory().await;
    let client = reqwest::Client::new();

    let form = reqwest::multipart::Form::new().part(
        "imgFile",
        reqwest::multipart::Part::bytes(vec![0u8; 8]).file_name("cat.png"),
    );

    let response = client
        .post(format!("{}/questions", address))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "json payload is required");
}

#[tokio::test]
async fn store_with_malformed_json_is_a_bad_request() {
    let address = spawn_app_in_memory().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/questions", address))
        .multipart(multipart_form("{not json".to_string()))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn invalid_payload_never_reaches_the_store() {
    let address = spawn_app_in_memory().await;
    let client = reqwest::Client::new();

    let json = serde_json::json!({
        "question": "",
        "answer": "Batagor",
        "choices": ["Batagor"],
        "topic": "Makanan",
    })
    .to_string();

    let response = client
        .post(format!("{}/questions", address))
        .multipart(multipart_form(json))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 400);

    // Nothing was created
    let questions: Vec<serde_json::Value> = client
        .get(format!("{}/questions", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(questions.is_empty());
}

#[tokio::test]
async fn show_unknown_id_returns_not_found() {
    let address = spawn_app_in_memory().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/questions/does-not-exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Not Found");
}

#[tokio::test]
async fn update_replaces_content_and_returns_update_time() {
    let address = spawn_app_in_memory().await;
    let client = reqwest::Client::new();

    let id = create_question(&client, &address, "Makanan").await;

    let json = serde_json::json!({
        "question": "Ikon kota Bandung?",
        "answer": "Gedung Sate",
        "choices": ["Gedung Sate", "Monas"],
        "topic": "Ikon",
    })
    .to_string();

    let response = client
        .put(format!("{}/questions/{}", address, id))
        .multipart(multipart_form(json))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["updateTime"].is_string());

    let question: serde_json::Value = client
        .get(format!("{}/questions/{}", address, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(question["answer"], "Gedung Sate");
    assert_eq!(question["topic"], "Ikon");
}

#[tokio::test]
async fn update_unknown_id_returns_not_found() {
    let address = spawn_app_in_memory().await;
    let client = reqwest::Client::new();

    let response = client
        .put(format!("{}/questions/does-not-exist", address))
        .multipart(multipart_form(question_json("Makanan")))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Not Found");
}

#[tokio::test]
async fn destroy_removes_the_question() {
    let address = spawn_app_in_memory().await;
    let client = reqwest::Client::new();

    let id = create_question(&client, &address, "Wisata").await;

    let response = client
        .delete(format!("{}/questions/{}", address, id))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["deleteTime"].is_string());

    let response = client
        .get(format!("{}/questions/{}", address, id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn destroy_unknown_id_returns_not_found() {
    let address = spawn_app_in_memory().await;
    let client = reqwest::Client::new();

    let response = client
        .delete(format!("{}/questions/does-not-exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Not Found");
}

// Regression: a blank id on destroy must produce a well-formed 400 JSON
// body, same as every other validation failure.
#[tokio::test]
async fn destroy_blank_id_is_a_well_formed_bad_request() {
    let address = spawn_app_in_memory().await;
    let client = reqwest::Client::new();

    let response = client
        .delete(format!("{}/questions/%20", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "id must not be blank");
}

/// Repository whose every operation fails, for exercising the 500 path.
struct FailingRepository;

#[async_trait]
impl QuestionRepository for FailingRepository {
    async fn find_all(&self) -> Result<Vec<Question>, AppError> {
        Err(AppError::InternalServerError("database exploded".to_string()))
    }

    async fn find_by_topic(&self, _topic: &str) -> Result<Vec<Question>, AppError> {
        Err(AppError::InternalServerError("database exploded".to_string()))
    }

    async fn find_by_id(&self, _id: &str) -> Result<Question, AppError> {
        Err(AppError::InternalServerError("database exploded".to_string()))
    }

    async fn insert(&self, _question: NewQuestion) -> Result<String, AppError> {
        Err(AppError::InternalServerError("database exploded".to_string()))
    }

    async fn update(
        &self,
        _id: &str,
        _question: NewQuestion,
    ) -> Result<DateTime<Utc>, AppError> {
        Err(AppError::InternalServerError("database exploded".to_string()))
    }

    async fn delete(&self, _id: &str) -> Result<DateTime<Utc>, AppError> {
        Err(AppError::InternalServerError("database exploded".to_string()))
    }
}

#[tokio::test]
async fn repository_failure_surfaces_as_500_with_message() {
    let address = spawn_app(Arc::new(FailingRepository)).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/questions", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "database exploded");
}
