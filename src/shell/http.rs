use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Extension, Router,
    http::HeaderMap,
    response::Html,
    routing::{get, patch, post},
};

use crate::modules::organisation::use_cases::add_task_to_all_projects::inbound::http as add_task_http;
use crate::modules::organisation::use_cases::manage_clients::inbound::http as clients_http;
use crate::modules::organisation::use_cases::manage_projects::inbound::http as projects_http;
use crate::modules::organisation::use_cases::manage_tasks::inbound::http as tasks_http;
use crate::modules::reminders::use_cases::send_no_hours_reminders::inbound::http as no_hours_http;
use crate::modules::reminders::use_cases::send_past_due_reminders::inbound::http as past_due_http;
use crate::modules::timesheets::use_cases::approve_timesheets::inbound::http as approve_http;
use crate::modules::timesheets::use_cases::pending_approvals::inbound::http as pending_http;
use crate::modules::timesheets::use_cases::recalculate_project_hours::inbound::http as recalculate_http;
use crate::modules::timesheets::use_cases::reject_timesheet::inbound::http as reject_http;
use crate::modules::timesheets::use_cases::submit_timesheet::inbound::http as submit_http;
use crate::modules::timesheets::use_cases::track_time::inbound::http as track_http;
use crate::shared::auth::session::Session;
use crate::shell::graphql::{AppSchema, build_schema};
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    let schema = build_schema(state.clone());
    Router::new()
        .route("/api/timer/start", post(track_http::start_timer))
        .route("/api/timer/stop", post(track_http::stop_timer))
        .route("/api/timesheets/running-timer", get(track_http::running_timer))
        .route("/api/timesheets/week", get(track_http::timesheet_for_week))
        .route("/api/timesheets/entries", post(track_http::add_entry))
        .route(
            "/api/timesheets/{id}/entries/{key}",
            patch(track_http::update_entry).delete(track_http::delete_entry),
        )
        .route("/api/timesheets/{id}/submit", post(submit_http::handle))
        .route("/api/timesheets/{id}/reject", post(reject_http::handle))
        .route("/api/timesheets/{id}/approve", post(approve_http::approve_one))
        .route("/api/timesheets/bulk-approve", patch(approve_http::bulk_approve))
        .route("/api/team/pending-approvals", post(pending_http::handle))
        .route("/api/projects/{id}/recalculate", post(recalculate_http::handle))
        .route("/api/clients", get(clients_http::list).post(clients_http::create))
        .route("/api/projects", get(projects_http::list).post(projects_http::create))
        .route("/api/tasks", get(tasks_http::list).post(tasks_http::create))
        .route("/api/tasks/add-to-all-projects", post(add_task_http::handle))
        .route(
            "/api/cron/no-hours-reminder",
            get(no_hours_http::handle).post(no_hours_http::handle),
        )
        .route(
            "/api/cron/past-due-reminder",
            get(past_due_http::handle).post(past_due_http::handle),
        )
        .route("/gql", get(graphiql).post(graphql))
        .layer(Extension(schema))
        .with_state(state)
}

/// Execute a GraphQL request; resolvers needing a session fail when the headers carry none.
async fn graphql(
    Extension(schema): Extension<AppSchema>,
    headers: HeaderMap,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = request.into_inner();
    if let Ok(session) = Session::from_headers(&headers) {
        request = request.data(session);
    }
    schema.execute(request).await.into()
}

async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/gql").finish())
}
