use std::sync::Arc;

use tracing::{info, warn};

use crate::modules::timesheets::adapters::outbound::timesheet_documents::TimesheetDocuments;
use crate::modules::timesheets::core::status::{StatusChange, TimesheetStatus};
use crate::modules::timesheets::use_cases::reject_timesheet::command::RejectTimesheet;
use crate::modules::timesheets::use_cases::reject_timesheet::decide::decide_reject;
use crate::shared::auth::capability::{Capability, authorize};
use crate::shared::auth::session::Session;
use crate::shared::core::errors::ApplicationError;
use crate::shared::infrastructure::document_store::{DocumentStore, Transaction};

pub struct RejectTimesheetHandler<TStore>
where
    TStore: DocumentStore + ?Sized + 'static,
{
    store: Arc<TStore>,
}

impl<TStore> RejectTimesheetHandler<TStore>
where
    TStore: DocumentStore + ?Sized + 'static,
{
    pub fn new(store: Arc<TStore>) -> Self {
        Self { store }
    }

    pub async fn reject(
        &self,
        session: &Session,
        command: RejectTimesheet,
    ) -> Result<StatusChange, ApplicationError> {
        authorize(session, Capability::ApproveTimesheets).into_result()?;
        let timesheet_id = command.timesheet_id.clone();
        let timesheet = self
            .store
            .load_timesheet(&timesheet_id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("timesheet {timesheet_id}")))?;

        let patch = decide_reject(&timesheet, command).into_patch().map_err(|reason| {
            warn!(timesheet_id = %timesheet_id, "reject refused: {reason}");
            ApplicationError::from(reason)
        })?;
        self.store.commit(Transaction::new().patch(patch)).await?;
        info!(timesheet_id = %timesheet_id, rejected_by = %session.user_id, "timesheet rejected");

        Ok(StatusChange {
            timesheet_id,
            status: TimesheetStatus::Rejected,
        })
    }
}
