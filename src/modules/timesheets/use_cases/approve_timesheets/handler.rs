// Bulk approval.
//
// Every requested timesheet is validated before anything is written: one missing or
// non-submitted id rejects the whole request. Valid requests are committed through
// `commit_in_batches`, so more than one transaction's worth of timesheets is approved in
// consecutive batches.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::modules::timesheets::adapters::outbound::timesheet_documents::TimesheetDocuments;
use crate::modules::timesheets::core::status::{StatusChange, TimesheetStatus};
use crate::modules::timesheets::core::timesheet::Timesheet;
use crate::modules::timesheets::use_cases::approve_timesheets::command::ApproveTimesheets;
use crate::modules::timesheets::use_cases::approve_timesheets::decide::decide_approve;
use crate::modules::timesheets::use_cases::recalculate_project_hours::handler::ProjectHoursAggregator;
use crate::modules::timesheets::use_cases::recalculate_project_hours::queries_port::ProjectHoursQueries;
use crate::shared::auth::capability::{Capability, authorize};
use crate::shared::auth::session::Session;
use crate::shared::core::errors::ApplicationError;
use crate::shared::infrastructure::document_store::batch::{BulkOutcome, commit_in_batches};
use crate::shared::infrastructure::document_store::{DocumentStore, Mutation, Transaction};

pub struct ApproveTimesheetsHandler<TStore, TQueries>
where
    TStore: DocumentStore + ?Sized + 'static,
    TQueries: ProjectHoursQueries + ?Sized + 'static,
{
    store: Arc<TStore>,
    aggregator: Arc<ProjectHoursAggregator<TQueries, TStore>>,
}

impl<TStore, TQueries> ApproveTimesheetsHandler<TStore, TQueries>
where
    TStore: DocumentStore + ?Sized + 'static,
    TQueries: ProjectHoursQueries + ?Sized + 'static,
{
    pub fn new(store: Arc<TStore>, aggregator: Arc<ProjectHoursAggregator<TQueries, TStore>>) -> Self {
        Self { store, aggregator }
    }

    pub async fn bulk_approve(
        &self,
        session: &Session,
        command: ApproveTimesheets,
    ) -> Result<BulkOutcome, ApplicationError> {
        authorize(session, Capability::ApproveTimesheets).into_result()?;

        let mut ids: Vec<String> = Vec::new();
        for id in command.timesheet_ids {
            if !id.is_empty() && !ids.contains(&id) {
                ids.push(id);
            }
        }
        if ids.is_empty() {
            return Err(ApplicationError::Validation(
                "timesheetIds must be a non-empty list".to_string(),
            ));
        }

        let mut found: HashMap<String, Timesheet> = self
            .store
            .timesheets_by_ids(&ids)
            .await?
            .into_iter()
            .map(|timesheet| (timesheet.id.clone(), timesheet))
            .collect();

        let mut ordered = Vec::with_capacity(ids.len());
        let mut mutations = Vec::with_capacity(ids.len());
        let mut offending_ids = Vec::new();
        for id in ids {
            let Some(timesheet) = found.remove(&id) else {
                offending_ids.push(id);
                continue;
            };
            match decide_approve(&timesheet, &command.approved_by, command.now).into_patch() {
                Ok(patch) => {
                    mutations.push(Mutation::Patch(patch));
                    ordered.push(timesheet);
                }
                Err(_) => offending_ids.push(id),
            }
        }
        if !offending_ids.is_empty() {
            warn!(count = offending_ids.len(), "bulk approval refused, invalid timesheets: {offending_ids:?}");
            return Ok(BulkOutcome::Rejected { offending_ids });
        }

        let outcome = commit_in_batches(&*self.store, mutations).await?;
        let committed = outcome.committed_count();
        info!(approved = committed, approved_by = %command.approved_by, "timesheets approved");

        let touched = ordered[..committed]
            .iter()
            .flat_map(Timesheet::project_ids)
            .collect::<Vec<_>>();
        self.aggregator.refresh(touched).await;
        Ok(outcome)
    }

    /// Approve a single timesheet, reporting precise errors instead of a bulk outcome.
    pub async fn approve(
        &self,
        session: &Session,
        timesheet_id: &str,
        now: DateTime<Utc>,
    ) -> Result<StatusChange, ApplicationError> {
        authorize(session, Capability::ApproveTimesheets).into_result()?;
        let timesheet = self
            .store
            .load_timesheet(timesheet_id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("timesheet {timesheet_id}")))?;
        let patch = decide_approve(&timesheet, &session.user_id, now)
            .into_patch()
            .map_err(|reason| {
                warn!(timesheet_id, "approval refused: {reason}");
                ApplicationError::from(reason)
            })?;
        self.store.commit(Transaction::new().patch(patch)).await?;
        info!(timesheet_id, approved_by = %session.user_id, "timesheet approved");
        self.aggregator.refresh(timesheet.project_ids()).await;
        Ok(StatusChange {
            timesheet_id: timesheet.id,
            status: TimesheetStatus::Approved,
        })
    }
}
