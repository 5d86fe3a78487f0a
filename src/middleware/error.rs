use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppError {
    Validation { description: String },
    NotFound { ident: String },
    Unauthorized,
    InvalidOrExpired,
    Conflict { word: String },
    Persistence { source: String },
    Serde { source: String },
    Config { description: String },
    Generic { description: String },
}

/// Any error for storing before composing a response.
pub type AppResult<T> = core::result::Result<T, AppError>;

impl std::error::Error for AppError {}

const INTERNAL: &str = "Internal error";

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation { description } => write!(f, "{description}"),
            Self::NotFound { ident } => write!(f, "{ident} not found"),
            Self::Unauthorized => write!(f, "Invalid master code"),
            Self::InvalidOrExpired => write!(f, "Invalid or expired code"),
            Self::Conflict { word } => write!(f, "Word '{word}' already exists"),
            Self::Persistence { .. } => write!(f, "{INTERNAL} - changes were not saved"),
            Self::Serde { .. } => write!(f, "{INTERNAL}"),
            Self::Config { description } => write!(f, "Configuration error - {description}"),
            Self::Generic { .. } => write!(f, "{INTERNAL}"),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::FORBIDDEN,
            AppError::InvalidOrExpired => StatusCode::UNAUTHORIZED,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Persistence { .. }
            | AppError::Serde { .. }
            | AppError::Config { .. }
            | AppError::Generic { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn required(field: &str) -> Self {
        Self::Validation {
            description: format!("{field} is required"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponseBody {
    error: String,
    req_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    valid: Option<bool>,
}

impl ErrorResponseBody {
    pub fn new(error: String, req_id: Option<String>) -> Self {
        ErrorResponseBody {
            error,
            req_id: req_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            valid: None,
        }
    }

    pub fn get_err(&self) -> String {
        self.error.clone()
    }
}

// REST error response
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let req_id = Uuid::new_v4().to_string();
        match &self {
            AppError::Persistence { source } | AppError::Serde { source } => {
                error!(req_id = %req_id, "->> {:<12} - {self:?} - {source}", "ERROR")
            }
            AppError::Config { description } | AppError::Generic { description } => {
                error!(req_id = %req_id, "->> {:<12} - {description}", "ERROR")
            }
            _ => warn!(req_id = %req_id, "->> {:<12} - {self}", "REJECTED"),
        }

        let mut body = ErrorResponseBody::new(self.to_string(), Some(req_id));
        if self == AppError::InvalidOrExpired {
            body.valid = Some(false);
        }
        let mut response = (self.status_code(), Json(body)).into_response();
        // Insert the real Error into the response - for the logger
        response.extensions_mut().insert(self);
        response
    }
}

// External Errors
impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde {
            source: value.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Persistence {
            source: value.to_string(),
        }
    }
}
