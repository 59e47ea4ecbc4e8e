// src/use_cases/mod.rs

pub mod questions;

pub use questions::{
    AddQuestion, DeleteQuestion, GetAllQuestions, GetQuestion, GetQuestionsByTopic,
    UpdateQuestion,
};
