use async_graphql::{EmptySubscription, MergedObject, Schema};

use crate::modules::timesheets::use_cases::approve_timesheets::inbound::graphql::ApproveTimesheetsMutation;
use crate::modules::timesheets::use_cases::pending_approvals::inbound::graphql::PendingApprovalsQuery;
use crate::modules::timesheets::use_cases::reject_timesheet::inbound::graphql::RejectTimesheetMutation;
use crate::modules::timesheets::use_cases::submit_timesheet::inbound::graphql::SubmitTimesheetMutation;
use crate::modules::timesheets::use_cases::track_time::inbound::graphql::TrackTimeQuery;
use crate::shell::state::AppState;

#[derive(MergedObject, Default)]
pub struct QueryRoot(TrackTimeQuery, PendingApprovalsQuery);

#[derive(MergedObject, Default)]
pub struct MutationRoot(
    SubmitTimesheetMutation,
    RejectTimesheetMutation,
    ApproveTimesheetsMutation,
);

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(state: AppState) -> AppSchema {
    Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
        .data(state)
        .finish()
}
