use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::shared::core::errors::ApplicationError;

impl ApplicationError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApplicationError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApplicationError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApplicationError::Validation(_) => StatusCode::BAD_REQUEST,
            ApplicationError::Conflict(_) | ApplicationError::Domain(_) => StatusCode::CONFLICT,
            ApplicationError::NotFound(_) => StatusCode::NOT_FOUND,
            ApplicationError::Store(_) | ApplicationError::Query(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// A body that is not valid JSON for the route is a client validation error.
impl From<JsonRejection> for ApplicationError {
    fn from(rejection: JsonRejection) -> Self {
        ApplicationError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("request failed: {self}");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
