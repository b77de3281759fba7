use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::modules::timesheets::use_cases::submit_timesheet::command::SubmitTimesheet;
use crate::shared::auth::session::Session;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    session: Session,
    Path(timesheet_id): Path<String>,
) -> Response {
    let command = SubmitTimesheet {
        timesheet_id,
        now: Utc::now(),
    };
    match state.submit.submit(&session, command).await {
        Ok(change) => Json(change).into_response(),
        Err(e) => e.into_response(),
    }
}
