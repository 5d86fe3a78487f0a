use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::middleware::{
    error::AppResult,
    mw_ctx::CtxState,
    utils::extractor_utils::{required_field, JsonValidated},
};

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/data", get(get_all))
        .route(
            "/hobby/:type",
            get(get_hobby)
                .post(add_word)
                .put(update_word)
                .delete(delete_word),
        )
        .route("/reset", post(reset))
}

#[derive(Debug, Deserialize, Validate)]
pub struct WordInput {
    #[validate(
        required(message = "word is required"),
        length(min = 1, message = "word must not be empty")
    )]
    pub word: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWordInput {
    #[validate(
        required(message = "oldWord is required"),
        length(min = 1, message = "oldWord must not be empty")
    )]
    pub old_word: Option<String>,
    #[validate(
        required(message = "newWord is required"),
        length(min = 1, message = "newWord must not be empty")
    )]
    pub new_word: Option<String>,
}

async fn get_all(State(state): State<Arc<CtxState>>) -> Response {
    let words = state.words.lock().await;
    (StatusCode::OK, Json(words.list_all())).into_response()
}

async fn get_hobby(
    State(state): State<Arc<CtxState>>,
    Path(hobby): Path<String>,
) -> AppResult<Response> {
    let store = state.words.lock().await;
    let words = store.get(&hobby)?;
    Ok((StatusCode::OK, Json(json!({ "hobby": hobby, "words": words }))).into_response())
}

async fn add_word(
    State(state): State<Arc<CtxState>>,
    Path(hobby): Path<String>,
    JsonValidated(body): JsonValidated<WordInput>,
) -> AppResult<Response> {
    let word = required_field(body.word, "word")?;
    let mut store = state.words.lock().await;
    let words = store.insert(&hobby, &word)?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Word added", "hobby": hobby, "words": words })),
    )
        .into_response())
}

async fn delete_word(
    State(state): State<Arc<CtxState>>,
    Path(hobby): Path<String>,
    JsonValidated(body): JsonValidated<WordInput>,
) -> AppResult<Response> {
    let word = required_field(body.word, "word")?;
    let mut store = state.words.lock().await;
    let (deleted, words) = store.remove(&hobby, &word)?;
    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Word deleted",
            "deletedWord": deleted,
            "hobby": hobby,
            "words": words
        })),
    )
        .into_response())
}

async fn update_word(
    State(state): State<Arc<CtxState>>,
    Path(hobby): Path<String>,
    JsonValidated(body): JsonValidated<UpdateWordInput>,
) -> AppResult<Response> {
    let old_word = required_field(body.old_word, "oldWord")?;
    let new_word = required_field(body.new_word, "newWord")?;
    let mut store = state.words.lock().await;
    let (replaced, words) = store.update(&hobby, &old_word, &new_word)?;
    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Word updated",
            "oldWord": replaced,
            "newWord": new_word,
            "hobby": hobby,
            "words": words
        })),
    )
        .into_response())
}

async fn reset(State(state): State<Arc<CtxState>>) -> AppResult<Response> {
    let mut store = state.words.lock().await;
    let data = store.reset()?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Data reset to defaults", "data": data })),
    )
        .into_response())
}
