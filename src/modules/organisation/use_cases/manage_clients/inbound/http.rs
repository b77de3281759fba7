use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::modules::organisation::use_cases::manage_clients::command::CreateClient;
use crate::shared::auth::session::Session;
use crate::shared::core::errors::ApplicationError;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct CreateClientBody {
    #[serde(default)]
    pub name: String,
}

pub async fn list(State(state): State<AppState>, _session: Session) -> Response {
    match state.clients.list().await {
        Ok(clients) => Json(clients).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn create(
    State(state): State<AppState>,
    session: Session,
    body: Result<Json<CreateClientBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return ApplicationError::from(rejection).into_response(),
    };
    let command = CreateClient {
        client_id: Uuid::now_v7().to_string(),
        name: body.name,
        now: Utc::now(),
    };
    match state.clients.create(&session, command).await {
        Ok(client) => (StatusCode::CREATED, Json(client)).into_response(),
        Err(e) => e.into_response(),
    }
}
