use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value as Json, json};
use tower::ServiceExt;

use crate::modules::timesheets::core::status::TimesheetStatus;
use crate::shared::infrastructure::document_store::in_memory::InMemoryDocumentStore;
use crate::shell::http::router;
use crate::tests::fixtures::documents::seed_timesheets;
use crate::tests::fixtures::state::{make_shared_state, with_session};
use crate::tests::fixtures::timesheets::{EntryBuilder, TimesheetBuilder};

async fn app() -> Router {
    let store = InMemoryDocumentStore::new();
    let timesheet = TimesheetBuilder::new("user-1")
        .entry(EntryBuilder::new("a").hours(1.5).build())
        .entry(EntryBuilder::new("b").hours(6.25).build())
        .build();
    let submitted = TimesheetBuilder::new("user-2")
        .entry(EntryBuilder::new("c").hours(8.0).build())
        .status(TimesheetStatus::Submitted)
        .build();
    seed_timesheets(&store, &[timesheet, submitted]).await;
    router(make_shared_state(Arc::new(store)))
}

async fn execute(app: Router, session: Option<(&str, &str)>, query: &str) -> Json {
    let mut builder = Request::post("/gql").header("content-type", "application/json");
    if let Some((user, role)) = session {
        builder = with_session(builder, user, role);
    }
    let request = builder
        .body(Body::from(json!({ "query": query }).to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn it_should_read_the_callers_week_with_formatted_totals() {
    let body = execute(
        app().await,
        Some(("user-1", "user")),
        r#"{ timesheet(date: "2024-06-12") { id status totalHours totalTime } }"#,
    )
    .await;

    assert_eq!(
        body["data"]["timesheet"],
        json!({
            "id": "timesheet-user-1-2024-06-10",
            "status": "UNSUBMITTED",
            "totalHours": 7.75,
            "totalTime": "7:45"
        })
    );
}

#[tokio::test]
async fn it_should_submit_and_approve_through_mutations() {
    let app = app().await;
    let body = execute(
        app.clone(),
        Some(("user-1", "user")),
        r#"mutation { submitTimesheet(timesheetId: "timesheet-user-1-2024-06-10") { status } }"#,
    )
    .await;
    assert_eq!(body["data"]["submitTimesheet"]["status"], json!("SUBMITTED"));

    let body = execute(
        app,
        Some(("manager-1", "manager")),
        r#"mutation { approveTimesheets(timesheetIds: ["timesheet-user-1-2024-06-10", "timesheet-user-2-2024-06-10"]) { approvedCount } }"#,
    )
    .await;
    assert_eq!(body["data"]["approveTimesheets"]["approvedCount"], json!(2));
}

#[tokio::test]
async fn it_should_carry_the_http_status_in_error_extensions() {
    let app = app().await;
    let body = execute(
        app.clone(),
        None,
        r#"{ runningTimer { timesheetId } }"#,
    )
    .await;
    assert_eq!(body["errors"][0]["extensions"]["status"], json!(401));

    let body = execute(
        app,
        Some(("user-1", "user")),
        r#"mutation { rejectTimesheet(timesheetId: "timesheet-user-2-2024-06-10") { status } }"#,
    )
    .await;
    assert_eq!(body["errors"][0]["extensions"]["status"], json!(403));
}
