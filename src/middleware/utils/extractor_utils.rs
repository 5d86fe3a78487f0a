use axum::body::Body;
use axum::extract::{rejection::JsonRejection, FromRequest, Request};
use axum::{async_trait, Json, RequestExt};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::middleware::error::AppError;

/// JSON body that has passed its `validator` rules; rejections become 400 `{error}`.
#[derive(Debug)]
pub struct JsonValidated<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonValidated<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send + Sync + 'static,
{
    type Rejection = AppError;

    async fn from_request(req: Request<Body>, _state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload): Json<T> =
            req.extract()
                .await
                .map_err(|rejection: JsonRejection| AppError::Validation {
                    description: rejection.body_text(),
                })?;
        payload.validate().map_err(|err| AppError::Validation {
            description: validation_message(&err),
        })?;
        Ok(Self(payload))
    }
}

fn validation_message(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

/// Unwraps a field the validator has already required.
pub fn required_field(value: Option<String>, name: &str) -> Result<String, AppError> {
    value.ok_or_else(|| AppError::required(name))
}
