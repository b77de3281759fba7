use axum::{
    Json,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde_json::json;

use crate::shared::inbound::cron_guard::{CronGate, check};
use crate::shell::state::AppState;

pub async fn handle(State(state): State<AppState>, headers: HeaderMap) -> Response {
    match check(&state.cron, &headers) {
        Err(e) => e.into_response(),
        Ok(CronGate::Paused) => Json(json!({ "skipped": true })).into_response(),
        Ok(CronGate::Run) => match state.past_due_reminders.run(Utc::now()).await {
            Ok(report) => Json(report).into_response(),
            Err(e) => e.into_response(),
        },
    }
}
