use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
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
        .route("/publish", get(publish))
        .route("/auth/issue", post(issue))
        .route("/auth/verify", post(verify))
        .route("/auth/session", post(verify_session))
        .route("/auth/revoke", delete(revoke))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct IssueInput {
    #[validate(
        required(message = "masterCode is required"),
        length(min = 1, message = "masterCode must not be empty")
    )]
    pub master_code: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct VerifyInput {
    #[validate(
        required(message = "code is required"),
        length(min = 1, message = "code must not be empty")
    )]
    pub code: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SessionInput {
    #[validate(
        required(message = "sessionValue is required"),
        length(min = 1, message = "sessionValue must not be empty")
    )]
    pub session_value: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RevokeInput {
    #[validate(
        required(message = "masterCode is required"),
        length(min = 1, message = "masterCode must not be empty")
    )]
    pub master_code: Option<String>,
    #[validate(
        required(message = "code is required"),
        length(min = 1, message = "code must not be empty")
    )]
    pub code: Option<String>,
}

async fn publish(State(state): State<Arc<CtxState>>) -> AppResult<Response> {
    let issued = state.codes.lock().await.issue()?;
    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Access code issued",
            "code": issued.code,
            "expiresIn": issued.expires_in
        })),
    )
        .into_response())
}

async fn issue(
    State(state): State<Arc<CtxState>>,
    JsonValidated(body): JsonValidated<IssueInput>,
) -> AppResult<Response> {
    let master_code = required_field(body.master_code, "masterCode")?;
    let issued = state.codes.lock().await.issue_privileged(&master_code)?;
    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Access code issued",
            "code": issued.code,
            "expiresIn": issued.expires_in
        })),
    )
        .into_response())
}

async fn verify(
    State(state): State<Arc<CtxState>>,
    JsonValidated(body): JsonValidated<VerifyInput>,
) -> AppResult<Response> {
    let code = required_field(body.code, "code")?;
    let grant = state.codes.lock().await.verify(&code)?;
    Ok((
        StatusCode::OK,
        Json(json!({
            "valid": true,
            "message": "Code verified",
            "sessionKey": grant.session_key,
            "sessionValue": grant.session_value
        })),
    )
        .into_response())
}

async fn verify_session(
    State(state): State<Arc<CtxState>>,
    JsonValidated(body): JsonValidated<SessionInput>,
) -> AppResult<Response> {
    let session_value = required_field(body.session_value, "sessionValue")?;
    state.codes.lock().await.verify_session(&session_value)?;
    Ok((
        StatusCode::OK,
        Json(json!({ "valid": true, "message": "Session is valid" })),
    )
        .into_response())
}

async fn revoke(
    State(state): State<Arc<CtxState>>,
    JsonValidated(body): JsonValidated<RevokeInput>,
) -> AppResult<Response> {
    let master_code = required_field(body.master_code, "masterCode")?;
    let code = required_field(body.code, "code")?;
    let revoked = state.codes.lock().await.revoke(&master_code, &code)?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Access code revoked", "code": revoked })),
    )
        .into_response())
}
