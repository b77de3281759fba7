use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::modules::timesheets::use_cases::track_time::command::{
    AddEntry, DeleteEntry, StartTimer, StopTimer, UpdateEntry,
};
use crate::shared::auth::session::Session;
use crate::shared::core::time_format::{deserialize_hours, deserialize_optional_hours};
use crate::shared::core::errors::ApplicationError;
use crate::shell::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartTimerBody {
    pub project_id: String,
    pub task_id: Option<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub is_billable: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddEntryBody {
    pub date: NaiveDate,
    pub project_id: String,
    pub task_id: Option<String>,
    #[serde(deserialize_with = "deserialize_hours")]
    pub hours: f64,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub is_billable: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEntryBody {
    pub date: Option<NaiveDate>,
    pub project_id: Option<String>,
    pub task_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_hours")]
    pub hours: Option<f64>,
    pub notes: Option<String>,
    pub is_billable: Option<bool>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekParams {
    pub date: NaiveDate,
    pub user_id: Option<String>,
}

pub async fn start_timer(
    State(state): State<AppState>,
    session: Session,
    body: Result<Json<StartTimerBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return ApplicationError::from(rejection).into_response(),
    };
    let command = StartTimer {
        entry_key: Uuid::now_v7().to_string(),
        project_id: body.project_id,
        task_id: body.task_id,
        notes: body.notes,
        is_billable: body.is_billable,
        now: Utc::now(),
    };
    match state.track_time.start_timer(&session, command).await {
        Ok(written) => (StatusCode::CREATED, Json(written)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn stop_timer(State(state): State<AppState>, session: Session) -> Response {
    match state
        .track_time
        .stop_timer(&session, StopTimer { now: Utc::now() })
        .await
    {
        Ok(stopped) => Json(stopped).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn running_timer(State(state): State<AppState>, session: Session) -> Response {
    match state.track_time.running_timer(&session).await {
        Ok(running) => Json(running).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn add_entry(
    State(state): State<AppState>,
    session: Session,
    body: Result<Json<AddEntryBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return ApplicationError::from(rejection).into_response(),
    };
    let command = AddEntry {
        entry_key: Uuid::now_v7().to_string(),
        date: body.date,
        project_id: body.project_id,
        task_id: body.task_id,
        hours: body.hours,
        notes: body.notes,
        is_billable: body.is_billable,
        now: Utc::now(),
    };
    match state.track_time.add_entry(&session, command).await {
        Ok(written) => (StatusCode::CREATED, Json(written)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_entry(
    State(state): State<AppState>,
    session: Session,
    Path((timesheet_id, entry_key)): Path<(String, String)>,
    body: Result<Json<UpdateEntryBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return ApplicationError::from(rejection).into_response(),
    };
    let command = UpdateEntry {
        entry_key,
        date: body.date,
        project_id: body.project_id,
        task_id: body.task_id,
        hours: body.hours,
        notes: body.notes,
        is_billable: body.is_billable,
        now: Utc::now(),
    };
    match state
        .track_time
        .update_entry(&session, &timesheet_id, command)
        .await
    {
        Ok(written) => Json(written).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete_entry(
    State(state): State<AppState>,
    session: Session,
    Path((timesheet_id, entry_key)): Path<(String, String)>,
) -> Response {
    let command = DeleteEntry {
        entry_key,
        now: Utc::now(),
    };
    match state
        .track_time
        .delete_entry(&session, &timesheet_id, command)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn timesheet_for_week(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<WeekParams>,
) -> Response {
    match state
        .track_time
        .timesheet_for_week(&session, params.user_id, params.date)
        .await
    {
        Ok(timesheet) => Json(timesheet).into_response(),
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod track_time_http_inbound_tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::{get, patch, post},
    };
    use http_body_util::BodyExt;
    use serde_json::{Value as Json, json};
    use tower::ServiceExt;

    use crate::shared::infrastructure::document_store::in_memory::InMemoryDocumentStore;
    use crate::shell::state::AppState;
    use crate::tests::fixtures::documents::{project_document, seed_documents};
    use crate::tests::fixtures::state::{make_test_state, with_session};

    use super::*;

    async fn make_state() -> AppState {
        let store = InMemoryDocumentStore::new();
        seed_documents(&store, vec![project_document("project-1", "client-1")]).await;
        make_test_state(store)
    }

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/api/timer/start", post(start_timer))
            .route("/api/timer/stop", post(stop_timer))
            .route("/api/timesheets/running-timer", get(running_timer))
            .route("/api/timesheets/entries", post(add_entry))
            .route(
                "/api/timesheets/{id}/entries/{key}",
                patch(update_entry).delete(delete_entry),
            )
            .route("/api/timesheets/week", get(timesheet_for_week))
            .with_state(state)
    }

    async fn body_json(response: axum::response::Response) -> Json {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn it_should_return_401_without_a_session() {
        let response = app(make_state().await)
            .oneshot(
                Request::post("/api/timer/start")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"projectId":"project-1"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn it_should_start_report_and_stop_a_timer() {
        let app = app(make_state().await);

        let response = app
            .clone()
            .oneshot(
                with_session(Request::post("/api/timer/start"), "user-1", "user")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"projectId":"project-1","isBillable":true}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let started = body_json(response).await;
        assert!(started.get("entryKey").is_some());

        let response = app
            .clone()
            .oneshot(
                with_session(Request::post("/api/timer/start"), "user-1", "user")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"projectId":"project-1"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = app
            .clone()
            .oneshot(
                with_session(Request::get("/api/timesheets/running-timer"), "user-1", "user")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let running = body_json(response).await;
        assert_eq!(running["entry"]["_key"], started["entryKey"]);
        assert_eq!(running["entry"]["isRunning"], json!(true));

        let response = app
            .oneshot(
                with_session(Request::post("/api/timer/stop"), "user-1", "user")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let stopped = body_json(response).await;
        assert_eq!(stopped["entry"]["isRunning"], json!(false));
    }

    #[tokio::test]
    async fn it_should_return_null_when_no_timer_runs() {
        let response = app(make_state().await)
            .oneshot(
                with_session(Request::get("/api/timesheets/running-timer"), "user-1", "user")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, Json::Null);
    }

    #[tokio::test]
    async fn it_should_add_edit_and_delete_a_manual_entry() {
        let app = app(make_state().await);

        let response = app
            .clone()
            .oneshot(
                with_session(Request::post("/api/timesheets/entries"), "user-1", "user")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"date":"2024-06-11","projectId":"project-1","hours":"2.5"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let written = body_json(response).await;
        assert_eq!(written["timesheetId"], json!("timesheet-user-1-2024-06-10"));
        let entry_uri = format!(
            "/api/timesheets/timesheet-user-1-2024-06-10/entries/{}",
            written["entryKey"].as_str().unwrap()
        );

        let response = app
            .clone()
            .oneshot(
                with_session(Request::patch(entry_uri.as_str()), "user-1", "user")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"hours":3,"notes":"review"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(
                with_session(
                    Request::get("/api/timesheets/week?date=2024-06-13"),
                    "user-1",
                    "user",
                )
                .body(Body::empty())
                .unwrap(),
            )
            .await
            .unwrap();
        let week = body_json(response).await;
        assert_eq!(week["totalHours"], json!(3.0));
        assert_eq!(week["entries"][0]["notes"], json!("review"));

        let response = app
            .oneshot(
                with_session(Request::delete(entry_uri.as_str()), "user-1", "user")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn it_should_return_400_for_negative_hours() {
        let response = app(make_state().await)
            .oneshot(
                with_session(Request::post("/api/timesheets/entries"), "user-1", "user")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"date":"2024-06-11","projectId":"project-1","hours":-2}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn it_should_return_400_with_an_error_on_invalid_json() {
        let response = app(make_state().await)
            .oneshot(
                with_session(Request::post("/api/timesheets/entries"), "user-1", "user")
                    .header("content-type", "application/json")
                    .body(Body::from("not-json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }
}
