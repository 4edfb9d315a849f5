//! `/cet6/*` handlers. Form-encoded input, re-wrapped chat-completion output.
//!
//! Parameters are read from the form body. When the body lacks the field, or
//! is not form-encoded at all, the query string is used instead.

use axum::{
    Form,
    extract::{
        Query, State,
        rejection::{FormRejection, QueryRejection},
    },
    response::Response,
};
use tracing::{debug, warn};
use uuid::Uuid;

use super::AppState;
use super::helpers::{cet6_error, cet6_failure, raw_json};
use super::models::{Cet6Input, EssayForm, SentenceForm, TranslationForm, VocabForm};
use crate::errors::{ErrorKind, RelayError};

type QueryPayload<T> = Result<Query<T>, QueryRejection>;
type FormPayload<T> = Result<Form<T>, FormRejection>;

fn parse_params<T: Cet6Input>(
    query: QueryPayload<T>,
    payload: FormPayload<T>,
) -> Result<T, Response> {
    let from_query = query.ok().map(|Query(q)| q).filter(|q| !q.is_blank());

    match (payload, from_query) {
        (Ok(Form(form)), Some(q)) if form.is_blank() => {
            debug!("Form body lacks the field, using query string");
            Ok(q)
        }
        (Ok(Form(form)), _) => Ok(form),
        (Err(_), Some(q)) => Ok(q),
        (Err(rejection), None) => {
            warn!("Invalid form body: {}", rejection.body_text());
            Err(cet6_error(
                ErrorKind::InvalidInput,
                &format!("请求参数格式错误：{}", rejection.body_text()),
            ))
        }
    }
}

fn respond(context: &str, result: Result<String, RelayError>) -> Response {
    match result {
        Ok(envelope) => raw_json(envelope),
        Err(e) => cet6_failure(context, &e),
    }
}

#[tracing::instrument(level = "info", skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn vocab_explanation(
    State(state): State<AppState>,
    query: QueryPayload<VocabForm>,
    payload: FormPayload<VocabForm>,
) -> Response {
    match parse_params(query, payload) {
        Ok(form) => respond(
            "词汇解释生成失败",
            state.cet6.vocab_explanation(&form.word).await,
        ),
        Err(response) => response,
    }
}

#[tracing::instrument(level = "info", skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn parse_sentence(
    State(state): State<AppState>,
    query: QueryPayload<SentenceForm>,
    payload: FormPayload<SentenceForm>,
) -> Response {
    match parse_params(query, payload) {
        Ok(form) => respond(
            "长难句解析失败",
            state.cet6.parse_sentence(&form.sentence).await,
        ),
        Err(response) => response,
    }
}

#[tracing::instrument(level = "info", skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn correct_essay(
    State(state): State<AppState>,
    query: QueryPayload<EssayForm>,
    payload: FormPayload<EssayForm>,
) -> Response {
    match parse_params(query, payload) {
        Ok(form) => respond("作文批改失败", state.cet6.correct_essay(&form.essay).await),
        Err(response) => response,
    }
}

#[tracing::instrument(level = "info", skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn translation_practice(
    State(state): State<AppState>,
    query: QueryPayload<TranslationForm>,
    payload: FormPayload<TranslationForm>,
) -> Response {
    match parse_params(query, payload) {
        Ok(form) => respond(
            "翻译练习生成失败",
            state.cet6.translation_practice(&form.chinese_text).await,
        ),
        Err(response) => response,
    }
}
