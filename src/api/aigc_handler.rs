//! `/api/aigc/*` handlers.
//!
//! Every route answers with `{success, ...}` JSON. Malformed bodies are
//! answered with the same envelope instead of axum's plain-text rejection.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::Response,
};
use serde_json::json;
use tracing::warn;
use uuid::Uuid;

use super::AppState;
use super::helpers::{aigc_error, aigc_failure, aigc_ok};
use super::models::{
    ChatBody, ConversationBody, GradedTopicBody, LeveledWordBody, QuizBody, TopicBody, WordBody,
    WritingFeedbackBody, WritingGuideBody,
};
use crate::errors::ErrorKind;

pub const SERVICE_NAME: &str = "StudyEnglish AI Assistant";

fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        warn!("Invalid JSON body: {}", rejection.body_text());
        aigc_error(
            ErrorKind::InvalidInput,
            &format!("请求体格式错误: {}", rejection.body_text()),
        )
    })
}

#[tracing::instrument(level = "info", skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatBody>, JsonRejection>,
) -> Response {
    let body = match parse_body(payload) {
        Ok(b) => b,
        Err(response) => return response,
    };

    match state.aigc.chat(&body.message).await {
        Ok(reply) => aigc_ok(json!({ "response": reply })),
        Err(e) => aigc_failure("AI服务调用失败", &e),
    }
}

#[tracing::instrument(level = "info", skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn explain_word(
    State(state): State<AppState>,
    payload: Result<Json<WordBody>, JsonRejection>,
) -> Response {
    let body = match parse_body(payload) {
        Ok(b) => b,
        Err(response) => return response,
    };

    match state.aigc.explain_word(&body.word).await {
        Ok(explanation) => aigc_ok(json!({ "word": body.word, "explanation": explanation })),
        Err(e) => aigc_failure("解释失败", &e),
    }
}

#[tracing::instrument(level = "info", skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn generate_learning(
    State(state): State<AppState>,
    payload: Result<Json<TopicBody>, JsonRejection>,
) -> Response {
    let body = match parse_body(payload) {
        Ok(b) => b,
        Err(response) => return response,
    };

    match state.aigc.generate_learning_content(&body.topic).await {
        Ok(content) => aigc_ok(json!({ "topic": body.topic, "content": content })),
        Err(e) => aigc_failure("生成失败", &e),
    }
}

#[tracing::instrument(level = "info", skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn comprehensive_explanation(
    State(state): State<AppState>,
    payload: Result<Json<LeveledWordBody>, JsonRejection>,
) -> Response {
    let body = match parse_body(payload) {
        Ok(b) => b,
        Err(response) => return response,
    };

    match state
        .aigc
        .comprehensive_explanation(&body.word, body.level.as_deref())
        .await
    {
        Ok(content) => aigc_ok(json!({ "word": body.word, "content": content })),
        Err(e) => aigc_failure("生成失败", &e),
    }
}

#[tracing::instrument(level = "info", skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn listening_script(
    State(state): State<AppState>,
    payload: Result<Json<GradedTopicBody>, JsonRejection>,
) -> Response {
    let body = match parse_body(payload) {
        Ok(b) => b,
        Err(response) => return response,
    };

    match state
        .aigc
        .listening_script(&body.topic, body.difficulty.as_deref())
        .await
    {
        Ok(content) => aigc_ok(json!({ "topic": body.topic, "content": content })),
        Err(e) => aigc_failure("生成失败", &e),
    }
}

#[tracing::instrument(level = "info", skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn reading_material(
    State(state): State<AppState>,
    payload: Result<Json<GradedTopicBody>, JsonRejection>,
) -> Response {
    let body = match parse_body(payload) {
        Ok(b) => b,
        Err(response) => return response,
    };

    match state
        .aigc
        .reading_material(&body.topic, body.difficulty.as_deref())
        .await
    {
        Ok(content) => aigc_ok(json!({ "topic": body.topic, "content": content })),
        Err(e) => aigc_failure("生成失败", &e),
    }
}

#[tracing::instrument(level = "info", skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn writing_guide(
    State(state): State<AppState>,
    payload: Result<Json<WritingGuideBody>, JsonRejection>,
) -> Response {
    let body = match parse_body(payload) {
        Ok(b) => b,
        Err(response) => return response,
    };

    match state
        .aigc
        .writing_guide(body.essay_type.as_deref(), &body.topic)
        .await
    {
        Ok(content) => aigc_ok(json!({ "topic": body.topic, "content": content })),
        Err(e) => aigc_failure("生成失败", &e),
    }
}

#[tracing::instrument(level = "info", skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn writing_feedback(
    State(state): State<AppState>,
    payload: Result<Json<WritingFeedbackBody>, JsonRejection>,
) -> Response {
    let body = match parse_body(payload) {
        Ok(b) => b,
        Err(response) => return response,
    };

    match state
        .aigc
        .writing_feedback(&body.text, body.focus_area.as_deref())
        .await
    {
        Ok(content) => aigc_ok(json!({ "content": content })),
        Err(e) => aigc_failure("批改失败", &e),
    }
}

#[tracing::instrument(level = "info", skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn pronunciation(
    State(state): State<AppState>,
    payload: Result<Json<WordBody>, JsonRejection>,
) -> Response {
    let body = match parse_body(payload) {
        Ok(b) => b,
        Err(response) => return response,
    };

    match state.aigc.pronunciation_guide(&body.word).await {
        Ok(content) => aigc_ok(json!({ "word": body.word, "content": content })),
        Err(e) => aigc_failure("生成失败", &e),
    }
}

#[tracing::instrument(level = "info", skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn grammar(
    State(state): State<AppState>,
    payload: Result<Json<TopicBody>, JsonRejection>,
) -> Response {
    let body = match parse_body(payload) {
        Ok(b) => b,
        Err(response) => return response,
    };

    match state.aigc.explain_grammar(&body.topic).await {
        Ok(content) => aigc_ok(json!({ "topic": body.topic, "content": content })),
        Err(e) => aigc_failure("讲解失败", &e),
    }
}

#[tracing::instrument(level = "info", skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn conversation(
    State(state): State<AppState>,
    payload: Result<Json<ConversationBody>, JsonRejection>,
) -> Response {
    let body = match parse_body(payload) {
        Ok(b) => b,
        Err(response) => return response,
    };

    match state
        .aigc
        .conversation_practice(&body.scenario, body.level.as_deref())
        .await
    {
        Ok(content) => aigc_ok(json!({ "scenario": body.scenario, "content": content })),
        Err(e) => aigc_failure("生成失败", &e),
    }
}

#[tracing::instrument(level = "info", skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn quiz(
    State(state): State<AppState>,
    payload: Result<Json<QuizBody>, JsonRejection>,
) -> Response {
    let body = match parse_body(payload) {
        Ok(b) => b,
        Err(response) => return response,
    };

    match state
        .aigc
        .quiz(&body.topic, body.question_count, body.difficulty.as_deref())
        .await
    {
        Ok(content) => aigc_ok(json!({ "topic": body.topic, "content": content })),
        Err(e) => aigc_failure("生成失败", &e),
    }
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "service": SERVICE_NAME }))
}
