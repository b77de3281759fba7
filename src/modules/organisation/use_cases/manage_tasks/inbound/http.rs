use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::modules::organisation::use_cases::manage_tasks::command::CreateTask;
use crate::shared::auth::session::Session;
use crate::shared::core::errors::ApplicationError;
use crate::shell::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_billable: bool,
}

pub async fn list(State(state): State<AppState>, _session: Session) -> Response {
    match state.tasks.list().await {
        Ok(tasks) => Json(tasks).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn create(
    State(state): State<AppState>,
    session: Session,
    body: Result<Json<CreateTaskBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return ApplicationError::from(rejection).into_response(),
    };
    let command = CreateTask {
        task_id: Uuid::now_v7().to_string(),
        name: body.name,
        is_billable: body.is_billable,
        now: Utc::now(),
    };
    match state.tasks.create(&session, command).await {
        Ok(task) => (StatusCode::CREATED, Json(task)).into_response(),
        Err(e) => e.into_response(),
    }
}
