use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
    response::Response,
};
use http_body_util::BodyExt;
use serde_json::{Value as Json, json};
use tower::ServiceExt;

use crate::shared::infrastructure::document_store::DocumentStore;
use crate::shared::infrastructure::document_store::in_memory::InMemoryDocumentStore;
use crate::shell::http::router;
use crate::tests::fixtures::documents::{project_document, seed_documents};
use crate::tests::fixtures::state::{make_shared_state, with_session};

const TIMESHEET_ID: &str = "timesheet-user-1-2024-06-10";

async fn app() -> (Arc<InMemoryDocumentStore>, Router) {
    let store = InMemoryDocumentStore::new();
    seed_documents(&store, vec![project_document("project-1", "client-1")]).await;
    let store = Arc::new(store);
    (store.clone(), router(make_shared_state(store)))
}

fn post(uri: &str, user: &str, role: &str, body: Option<Json>) -> Request<Body> {
    call("POST", uri, user, role, body)
}

fn call(method: &str, uri: &str, user: &str, role: &str, body: Option<Json>) -> Request<Body> {
    let builder = with_session(Request::builder().method(method).uri(uri), user, role);
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn body_json(response: Response) -> Json {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn it_should_carry_a_timesheet_from_entry_to_approved_rollup() {
    let (store, app) = app().await;
    let entry = json!({
        "date": "2024-06-10",
        "projectId": "project-1",
        "hours": "7.5",
        "isBillable": true
    });

    let response = send(&app, post("/api/timesheets/entries", "user-1", "user", Some(entry))).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["timesheetId"], json!(TIMESHEET_ID));

    let submit = format!("/api/timesheets/{TIMESHEET_ID}/submit");
    let response = send(&app, post(&submit, "user-1", "user", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let late_entry = json!({ "date": "2024-06-11", "projectId": "project-1", "hours": 1.0 });
    let response = send(&app, post("/api/timesheets/entries", "user-1", "user", Some(late_entry))).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let reject = format!("/api/timesheets/{TIMESHEET_ID}/reject");
    let response = send(&app, post(&reject, "user-1", "user", None)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = send(
        &app,
        post(&reject, "manager-1", "manager", Some(json!({ "reason": "Wrong project" }))),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let stored = store.get(TIMESHEET_ID).await.unwrap().unwrap();
    assert_eq!(stored["status"], json!("rejected"));
    assert_eq!(stored["rejectionReason"], json!("Wrong project"));

    let response = send(&app, post(&submit, "user-1", "user", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let stored = store.get(TIMESHEET_ID).await.unwrap().unwrap();
    assert!(stored.get("rejectionReason").is_none());

    let response = send(
        &app,
        call(
            "PATCH",
            "/api/timesheets/bulk-approve",
            "manager-1",
            "manager",
            Some(json!({ "timesheetIds": [TIMESHEET_ID] })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "approvedCount": 1, "batches": 1 })
    );

    let stored = store.get(TIMESHEET_ID).await.unwrap().unwrap();
    assert_eq!(stored["status"], json!("approved"));
    assert_eq!(stored["isLocked"], json!(true));
    let project = store.get("project-1").await.unwrap().unwrap();
    assert_eq!(project["totalHours"], json!(7.5));
    assert_eq!(project["approvedHours"], json!(7.5));
    assert_eq!(project["billableHours"], json!(7.5));

    let response = send(&app, post(&reject, "manager-1", "manager", None)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn it_should_run_one_timer_at_a_time() {
    let (_, app) = app().await;
    let start = || post("/api/timer/start", "user-1", "user", Some(json!({ "projectId": "project-1" })));

    let response = send(&app, start()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let started = body_json(response).await;

    let response = send(&app, start()).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let running = send(&app, call("GET", "/api/timesheets/running-timer", "user-1", "user", None)).await;
    assert_eq!(running.status(), StatusCode::OK);
    let running = body_json(running).await;
    assert_eq!(running["entry"]["_key"], started["entryKey"]);
    assert_eq!(running["entry"]["isRunning"], json!(true));

    let response = send(&app, post("/api/timer/stop", "user-1", "user", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["entry"]["isRunning"], json!(false));

    let running = send(&app, call("GET", "/api/timesheets/running-timer", "user-1", "user", None)).await;
    assert_eq!(body_json(running).await, Json::Null);

    let response = send(&app, post("/api/timer/stop", "user-1", "user", None)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn it_should_list_members_still_owing_a_timesheet() {
    let (_, app) = app().await;
    let entry = json!({ "date": "2024-06-10", "projectId": "project-1", "hours": 8.0 });
    send(&app, post("/api/timesheets/entries", "user-1", "user", Some(entry))).await;
    send(
        &app,
        post(&format!("/api/timesheets/{TIMESHEET_ID}/submit"), "user-1", "user", None),
    )
    .await;

    let response = send(
        &app,
        post(
            "/api/team/pending-approvals",
            "manager-1",
            "manager",
            Some(json!({ "memberIds": ["user-1", "user-2"] })),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "pendingMemberIds": ["user-1"] })
    );
}

#[tokio::test]
async fn it_should_refuse_requests_without_a_session() {
    let (_, app) = app().await;
    let request = Request::get("/api/timesheets/running-timer")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn it_should_keep_a_rejected_week_on_the_pending_list() {
    let (_, app) = app().await;
    let entry = json!({ "date": "2024-06-10", "projectId": "project-1", "hours": 4.0 });
    send(&app, post("/api/timesheets/entries", "user-1", "user", Some(entry))).await;
    send(
        &app,
        post(&format!("/api/timesheets/{TIMESHEET_ID}/submit"), "user-1", "user", None),
    )
    .await;
    let response = send(
        &app,
        post(&format!("/api/timesheets/{TIMESHEET_ID}/reject"), "manager-1", "manager", None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(
        &app,
        post(
            "/api/team/pending-approvals",
            "manager-1",
            "manager",
            Some(json!({ "memberIds": ["user-1"] })),
        ),
    )
    .await;

    assert_eq!(
        body_json(response).await,
        json!({ "pendingMemberIds": ["user-1"] })
    );
}
