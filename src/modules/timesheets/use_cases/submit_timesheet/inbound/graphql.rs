use async_graphql::{Context, Object, Result as GqlResult};
use chrono::Utc;

use crate::modules::timesheets::core::status::StatusChange;
use crate::modules::timesheets::use_cases::submit_timesheet::command::SubmitTimesheet;
use crate::shared::inbound::graphql::{session, to_gql_error};
use crate::shell::state::AppState;

#[derive(Default)]
pub struct SubmitTimesheetMutation;

#[Object]
impl SubmitTimesheetMutation {
    async fn submit_timesheet(&self, context: &Context<'_>, timesheet_id: String) -> GqlResult<StatusChange> {
        let state = context.data_unchecked::<AppState>();
        let session = session(context)?;
        let command = SubmitTimesheet {
            timesheet_id,
            now: Utc::now(),
        };
        state
            .submit
            .submit(session, command)
            .await
            .map_err(to_gql_error)
    }
}
