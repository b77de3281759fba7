use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::shared::auth::session::Session;
use crate::shared::infrastructure::document_store::batch::BulkOutcome;
use crate::shared::core::errors::ApplicationError;
use crate::shell::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTaskBody {
    pub task_id: String,
}

pub async fn handle(
    State(state): State<AppState>,
    session: Session,
    body: Result<Json<AddTaskBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return ApplicationError::from(rejection).into_response(),
    };
    match state.add_task.handle(&session, &body.task_id).await {
        Ok(outcome @ BulkOutcome::PartiallyCommitted { .. }) => {
            (StatusCode::INTERNAL_SERVER_ERROR, Json(outcome)).into_response()
        }
        Ok(outcome) => Json(outcome).into_response(),
        Err(e) => e.into_response(),
    }
}
