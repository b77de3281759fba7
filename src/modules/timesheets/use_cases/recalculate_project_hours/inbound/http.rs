use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::shared::auth::capability::{Capability, authorize};
use crate::shared::auth::session::Session;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    session: Session,
    Path(project_id): Path<String>,
) -> Response {
    if let Err(e) = authorize(&session, Capability::RecalculateProjects).into_result() {
        return e.into_response();
    }
    match state.aggregator.recalculate(&project_id).await {
        Ok(hours) => Json(hours).into_response(),
        Err(e) => e.into_response(),
    }
}
