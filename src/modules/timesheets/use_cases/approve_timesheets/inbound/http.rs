use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::modules::timesheets::use_cases::approve_timesheets::command::ApproveTimesheets;
use crate::shared::auth::session::Session;
use crate::shared::infrastructure::document_store::batch::BulkOutcome;
use crate::shared::core::errors::ApplicationError;
use crate::shell::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkApproveBody {
    pub timesheet_ids: Vec<String>,
}

pub async fn bulk_approve(
    State(state): State<AppState>,
    session: Session,
    body: Result<Json<BulkApproveBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return ApplicationError::from(rejection).into_response(),
    };
    let command = ApproveTimesheets {
        timesheet_ids: body.timesheet_ids,
        approved_by: session.user_id.clone(),
        now: Utc::now(),
    };
    match state.approve.bulk_approve(&session, command).await {
        Ok(BulkOutcome::Committed { count, batches }) => {
            Json(json!({ "approvedCount": count, "batches": batches })).into_response()
        }
        Ok(BulkOutcome::Rejected { offending_ids }) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "Some timesheets are missing or not submitted",
                "invalidIds": offending_ids,
            })),
        )
            .into_response(),
        Ok(BulkOutcome::PartiallyCommitted {
            committed,
            failed_batch,
            ..
        }) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Approval stopped part way through",
                "approvedCount": committed,
                "failedBatch": failed_batch,
            })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn approve_one(
    State(state): State<AppState>,
    session: Session,
    Path(timesheet_id): Path<String>,
) -> Response {
    match state.approve.approve(&session, &timesheet_id, Utc::now()).await {
        Ok(change) => Json(change).into_response(),
        Err(e) => e.into_response(),
    }
}
