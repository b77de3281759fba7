use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::modules::organisation::use_cases::manage_projects::command::CreateProject;
use crate::shared::auth::session::Session;
use crate::shared::core::errors::ApplicationError;
use crate::shell::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub client_id: String,
}

pub async fn list(State(state): State<AppState>, _session: Session) -> Response {
    match state.projects.list().await {
        Ok(projects) => Json(projects).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn create(
    State(state): State<AppState>,
    session: Session,
    body: Result<Json<CreateProjectBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return ApplicationError::from(rejection).into_response(),
    };
    let command = CreateProject {
        project_id: Uuid::now_v7().to_string(),
        name: body.name,
        client_id: body.client_id,
        now: Utc::now(),
    };
    match state.projects.create(&session, command).await {
        Ok(project) => (StatusCode::CREATED, Json(project)).into_response(),
        Err(e) => e.into_response(),
    }
}
