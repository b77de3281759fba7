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
        Ok(CronGate::Run) => match state.no_hours_reminders.run(Utc::now()).await {
            Ok(report) => Json(report).into_response(),
            Err(e) => e.into_response(),
        },
    }
}

#[cfg(test)]
mod send_no_hours_reminders_http_inbound_tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use http_body_util::BodyExt;
    use serde_json::{Value as Json, json};
    use tower::ServiceExt;

    use crate::shared::inbound::cron_guard::CronSettings;
    use crate::shared::infrastructure::document_store::in_memory::InMemoryDocumentStore;
    use crate::tests::fixtures::documents::{seed_documents, user_document};
    use crate::tests::fixtures::state::make_test_state_with_cron;

    use super::*;

    async fn app(cron: CronSettings) -> Router {
        let store = InMemoryDocumentStore::new();
        seed_documents(&store, vec![user_document("user-1", true)]).await;
        Router::new()
            .route("/api/cron/no-hours-reminder", get(handle).post(handle))
            .with_state(make_test_state_with_cron(store, cron))
    }

    fn secured() -> CronSettings {
        CronSettings {
            cron_secret: Some("s3cret".into()),
            ..CronSettings::default()
        }
    }

    async fn body_json(response: axum::response::Response) -> Json {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn it_should_send_reminders_with_the_cron_secret() {
        let response = app(secured())
            .await
            .oneshot(
                Request::post("/api/cron/no-hours-reminder")
                    .header("authorization", "Bearer s3cret")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "sent": 1, "alreadySent": 0, "failed": 0 })
        );
    }

    #[tokio::test]
    async fn it_should_return_401_without_the_secret() {
        let response = app(secured())
            .await
            .oneshot(Request::get("/api/cron/no-hours-reminder").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn it_should_skip_when_jobs_are_paused() {
        let cron = CronSettings {
            app_env: "development".into(),
            pause_scheduled_jobs: true,
            ..CronSettings::default()
        };
        let response = app(cron)
            .await
            .oneshot(Request::get("/api/cron/no-hours-reminder").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "skipped": true }));
    }
}
