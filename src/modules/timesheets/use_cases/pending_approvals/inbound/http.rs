use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::shared::auth::session::Session;
use crate::shared::core::errors::ApplicationError;
use crate::shell::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingApprovalsBody {
    pub member_ids: Vec<String>,
}

pub async fn handle(
    State(state): State<AppState>,
    session: Session,
    body: Result<Json<PendingApprovalsBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return ApplicationError::from(rejection).into_response(),
    };
    match state
        .pending
        .compute_pending_or_unsubmitted(&session, body.member_ids)
        .await
    {
        Ok(members) => Json(json!({ "pendingMemberIds": members })).into_response(),
        Err(e) => e.into_response(),
    }
}
