use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;

use crate::modules::timesheets::use_cases::reject_timesheet::command::RejectTimesheet;
use crate::shared::auth::session::Session;
use crate::shared::core::errors::ApplicationError;
use crate::shell::state::AppState;

#[derive(Deserialize, Default)]
pub struct RejectBody {
    pub reason: Option<String>,
}

pub async fn handle(
    State(state): State<AppState>,
    session: Session,
    Path(timesheet_id): Path<String>,
    body: Result<Json<RejectBody>, JsonRejection>,
) -> Response {
    let body = match body {
        Ok(Json(b)) => b,
        // a bodyless POST rejects without a reason
        Err(JsonRejection::MissingJsonContentType(_)) => RejectBody::default(),
        Err(rejection) => return ApplicationError::from(rejection).into_response(),
    };
    let command = RejectTimesheet {
        timesheet_id,
        reason: body.reason,
        rejected_by: session.user_id.clone(),
        now: Utc::now(),
    };
    match state.reject.reject(&session, command).await {
        Ok(change) => Json(change).into_response(),
        Err(e) => e.into_response(),
    }
}
