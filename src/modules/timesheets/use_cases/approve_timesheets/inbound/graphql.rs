use async_graphql::{Context, Object, Result as GqlResult, SimpleObject};
use chrono::Utc;

use crate::modules::timesheets::core::status::StatusChange;
use crate::modules::timesheets::use_cases::approve_timesheets::command::ApproveTimesheets;
use crate::shared::infrastructure::document_store::batch::BulkOutcome;
use crate::shared::inbound::graphql::{session, to_gql_error};
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlBulkApproval {
    /// `committed`, `partiallyCommitted` or `rejected`.
    pub outcome: String,
    pub approved_count: usize,
    pub batches: usize,
    pub failed_batch: Option<usize>,
    pub invalid_ids: Vec<String>,
}

impl From<BulkOutcome> for GqlBulkApproval {
    fn from(v: BulkOutcome) -> Self {
        match v {
            BulkOutcome::Committed { count, batches } => Self {
                outcome: "committed".into(),
                approved_count: count,
                batches,
                failed_batch: None,
                invalid_ids: Vec::new(),
            },
            BulkOutcome::PartiallyCommitted {
                committed,
                committed_batches,
                failed_batch,
                ..
            } => Self {
                outcome: "partiallyCommitted".into(),
                approved_count: committed,
                batches: committed_batches,
                failed_batch: Some(failed_batch),
                invalid_ids: Vec::new(),
            },
            BulkOutcome::Rejected { offending_ids } => Self {
                outcome: "rejected".into(),
                approved_count: 0,
                batches: 0,
                failed_batch: None,
                invalid_ids: offending_ids,
            },
        }
    }
}

#[derive(Default)]
pub struct ApproveTimesheetsMutation;

#[Object]
impl ApproveTimesheetsMutation {
    async fn approve_timesheets(
        &self,
        context: &Context<'_>,
        timesheet_ids: Vec<String>,
    ) -> GqlResult<GqlBulkApproval> {
        let state = context.data_unchecked::<AppState>();
        let session = session(context)?;
        let command = ApproveTimesheets {
            timesheet_ids,
            approved_by: session.user_id.clone(),
            now: Utc::now(),
        };
        let outcome = state
            .approve
            .bulk_approve(session, command)
            .await
            .map_err(to_gql_error)?;
        Ok(outcome.into())
    }

    async fn approve_timesheet(&self, context: &Context<'_>, timesheet_id: String) -> GqlResult<StatusChange> {
        let state = context.data_unchecked::<AppState>();
        let session = session(context)?;
        state
            .approve
            .approve(session, &timesheet_id, Utc::now())
            .await
            .map_err(to_gql_error)
    }
}
