use async_graphql::{Context, Object, Result as GqlResult};
use chrono::Utc;

use crate::modules::timesheets::core::status::StatusChange;
use crate::modules::timesheets::use_cases::reject_timesheet::command::RejectTimesheet;
use crate::shared::inbound::graphql::{session, to_gql_error};
use crate::shell::state::AppState;

#[derive(Default)]
pub struct RejectTimesheetMutation;

#[Object]
impl RejectTimesheetMutation {
    async fn reject_timesheet(
        &self,
        context: &Context<'_>,
        timesheet_id: String,
        reason: Option<String>,
    ) -> GqlResult<StatusChange> {
        let state = context.data_unchecked::<AppState>();
        let session = session(context)?;
        let command = RejectTimesheet {
            timesheet_id,
            reason,
            rejected_by: session.user_id.clone(),
            now: Utc::now(),
        };
        state
            .reject
            .reject(session, command)
            .await
            .map_err(to_gql_error)
    }
}
