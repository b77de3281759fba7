use std::sync::Arc;

use tracing::{info, warn};

use crate::modules::timesheets::adapters::outbound::timesheet_documents::TimesheetDocuments;
use crate::modules::timesheets::core::status::{StatusChange, TimesheetStatus};
use crate::modules::timesheets::use_cases::submit_timesheet::command::SubmitTimesheet;
use crate::modules::timesheets::use_cases::submit_timesheet::decide::decide_submit;
use crate::shared::auth::capability::{Capability, authorize};
use crate::shared::auth::session::Session;
use crate::shared::core::errors::ApplicationError;
use crate::shared::infrastructure::document_store::{DocumentStore, Transaction};

pub struct SubmitTimesheetHandler<TStore>
where
    TStore: DocumentStore + ?Sized + 'static,
{
    store: Arc<TStore>,
}

impl<TStore> SubmitTimesheetHandler<TStore>
where
    TStore: DocumentStore + ?Sized + 'static,
{
    pub fn new(store: Arc<TStore>) -> Self {
        Self { store }
    }

    pub async fn submit(
        &self,
        session: &Session,
        command: SubmitTimesheet,
    ) -> Result<StatusChange, ApplicationError> {
        let timesheet_id = command.timesheet_id.clone();
        let timesheet = self
            .store
            .load_timesheet(&timesheet_id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("timesheet {timesheet_id}")))?;
        authorize(
            session,
            Capability::EditTimesheet {
                owner: timesheet.owner_id().to_string(),
            },
        )
        .into_result()?;

        let patch = decide_submit(&timesheet, command).into_patch().map_err(|reason| {
            warn!(timesheet_id = %timesheet_id, "submit rejected: {reason}");
            ApplicationError::from(reason)
        })?;
        self.store.commit(Transaction::new().patch(patch)).await?;
        info!(timesheet_id = %timesheet_id, user_id = %session.user_id, "timesheet submitted");

        Ok(StatusChange {
            timesheet_id,
            status: TimesheetStatus::Submitted,
        })
    }
}
