use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::modules::timesheets::adapters::outbound::timesheet_documents::TimesheetDocuments;
use crate::modules::timesheets::core::decision::{DecideError, Decision};
use crate::modules::timesheets::core::timesheet::{Timesheet, TimesheetEntry};
use crate::modules::timesheets::use_cases::recalculate_project_hours::handler::ProjectHoursAggregator;
use crate::modules::timesheets::use_cases::recalculate_project_hours::queries_port::ProjectHoursQueries;
use crate::modules::timesheets::use_cases::track_time::command::{
    AddEntry, DeleteEntry, StartTimer, StopTimer, UpdateEntry,
};
use crate::modules::timesheets::use_cases::track_time::decide::{
    decide_add_entry, decide_delete_entry, decide_start_timer, decide_stop_timer,
    decide_update_entry, stop_entry,
};
use crate::shared::auth::capability::{Capability, authorize};
use crate::shared::auth::session::Session;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::week::week_start;
use crate::shared::infrastructure::document_store::{DocumentStore, Patch, Transaction, encode};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryWritten {
    pub timesheet_id: String,
    pub entry_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerEntry {
    pub timesheet_id: String,
    pub entry: TimesheetEntry,
}

pub struct TrackTimeHandler<TStore, TQueries>
where
    TStore: DocumentStore + ?Sized + 'static,
    TQueries: ProjectHoursQueries + ?Sized + 'static,
{
    store: Arc<TStore>,
    aggregator: Arc<ProjectHoursAggregator<TQueries, TStore>>,
}

impl<TStore, TQueries> TrackTimeHandler<TStore, TQueries>
where
    TStore: DocumentStore + ?Sized + 'static,
    TQueries: ProjectHoursQueries + ?Sized + 'static,
{
    pub fn new(store: Arc<TStore>, aggregator: Arc<ProjectHoursAggregator<TQueries, TStore>>) -> Self {
        Self { store, aggregator }
    }

    /// Start a timer in the caller's timesheet for the current week.
    ///
    /// Uniqueness of the running timer is checked before writing; two concurrent starts
    /// for one user can both pass the check.
    pub async fn start_timer(
        &self,
        session: &Session,
        command: StartTimer,
    ) -> Result<EntryWritten, ApplicationError> {
        if self.store.running_timesheet(&session.user_id).await?.is_some() {
            warn!(user_id = %session.user_id, "timer already running");
            return Err(DecideError::TimerAlreadyRunning.into());
        }
        let (timesheet, is_new) = self
            .week_timesheet(&session.user_id, command.now.date_naive(), command.now)
            .await?;
        let entry_key = command.entry_key.clone();
        let patch = decide(decide_start_timer(&timesheet, command))?;
        self.commit(&timesheet, is_new, patch).await?;
        info!(user_id = %session.user_id, timesheet_id = %timesheet.id, "timer started");
        Ok(EntryWritten {
            timesheet_id: timesheet.id,
            entry_key,
        })
    }

    pub async fn stop_timer(
        &self,
        session: &Session,
        command: StopTimer,
    ) -> Result<TimerEntry, ApplicationError> {
        let timesheet = self
            .store
            .running_timesheet(&session.user_id)
            .await?
            .ok_or(DecideError::NoRunningTimer)?;
        let stopped = timesheet
            .running_entry()
            .map(|entry| stop_entry(entry, command.now))
            .ok_or(DecideError::NoRunningTimer)?;
        let patch = decide(decide_stop_timer(&timesheet, command))?;
        self.commit(&timesheet, false, patch).await?;
        info!(user_id = %session.user_id, timesheet_id = %timesheet.id, hours = stopped.hours, "timer stopped");
        self.aggregator.refresh([stopped.project.id.clone()]).await;
        Ok(TimerEntry {
            timesheet_id: timesheet.id,
            entry: stopped,
        })
    }

    pub async fn running_timer(&self, session: &Session) -> Result<Option<TimerEntry>, ApplicationError> {
        let Some(timesheet) = self.store.running_timesheet(&session.user_id).await? else {
            return Ok(None);
        };
        Ok(timesheet.running_entry().cloned().map(|entry| TimerEntry {
            timesheet_id: timesheet.id.clone(),
            entry,
        }))
    }

    pub async fn add_entry(
        &self,
        session: &Session,
        command: AddEntry,
    ) -> Result<EntryWritten, ApplicationError> {
        let (timesheet, is_new) = self
            .week_timesheet(&session.user_id, command.date, command.now)
            .await?;
        let entry_key = command.entry_key.clone();
        let project_id = command.project_id.clone();
        let patch = decide(decide_add_entry(&timesheet, command))?;
        self.commit(&timesheet, is_new, patch).await?;
        info!(timesheet_id = %timesheet.id, entry_key = %entry_key, "entry added");
        self.aggregator.refresh([project_id]).await;
        Ok(EntryWritten {
            timesheet_id: timesheet.id,
            entry_key,
        })
    }

    pub async fn update_entry(
        &self,
        session: &Session,
        timesheet_id: &str,
        command: UpdateEntry,
    ) -> Result<EntryWritten, ApplicationError> {
        let timesheet = self.editable_by(session, timesheet_id).await?;
        let mut touched: Vec<String> = timesheet
            .entry(&command.entry_key)
            .map(|entry| vec![entry.project.id.clone()])
            .unwrap_or_default();
        touched.extend(command.project_id.clone());
        let entry_key = command.entry_key.clone();
        let patch = decide(decide_update_entry(&timesheet, command))?;
        self.commit(&timesheet, false, patch).await?;
        info!(timesheet_id, entry_key = %entry_key, "entry updated");
        self.aggregator.refresh(touched).await;
        Ok(EntryWritten {
            timesheet_id: timesheet.id,
            entry_key,
        })
    }

    pub async fn delete_entry(
        &self,
        session: &Session,
        timesheet_id: &str,
        command: DeleteEntry,
    ) -> Result<(), ApplicationError> {
        let timesheet = self.editable_by(session, timesheet_id).await?;
        let touched: Vec<String> = timesheet
            .entry(&command.entry_key)
            .map(|entry| vec![entry.project.id.clone()])
            .unwrap_or_default();
        let entry_key = command.entry_key.clone();
        let patch = decide(decide_delete_entry(&timesheet, command))?;
        self.commit(&timesheet, false, patch).await?;
        info!(timesheet_id, entry_key = %entry_key, "entry deleted");
        self.aggregator.refresh(touched).await;
        Ok(())
    }

    /// The timesheet of `user_id` (the caller when absent) for the week `date` falls in.
    pub async fn timesheet_for_week(
        &self,
        session: &Session,
        user_id: Option<String>,
        date: NaiveDate,
    ) -> Result<Option<Timesheet>, ApplicationError> {
        let user_id = user_id.unwrap_or_else(|| session.user_id.clone());
        if user_id != session.user_id {
            authorize(session, Capability::ViewTeam).into_result()?;
        }
        let id = Timesheet::id_for(&user_id, week_start(date));
        Ok(self.store.load_timesheet(&id).await?)
    }

    async fn week_timesheet(
        &self,
        user_id: &str,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<(Timesheet, bool), ApplicationError> {
        let id = Timesheet::id_for(user_id, week_start(date));
        Ok(match self.store.load_timesheet(&id).await? {
            Some(timesheet) => (timesheet, false),
            None => (Timesheet::new(user_id, date, now), true),
        })
    }

    async fn editable_by(&self, session: &Session, timesheet_id: &str) -> Result<Timesheet, ApplicationError> {
        let timesheet = self
            .store
            .load_timesheet(timesheet_id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("timesheet {timesheet_id}")))?;
        authorize(
            session,
            Capability::EditTimesheet {
                owner: timesheet.owner_id().to_string(),
            },
        )
        .into_result()?;
        Ok(timesheet)
    }

    async fn commit(&self, timesheet: &Timesheet, is_new: bool, patch: Patch) -> Result<(), ApplicationError> {
        let mut transaction = Transaction::new();
        if is_new {
            // a concurrent first write of the same week fails as a duplicate
            transaction = transaction.create(encode(timesheet)?);
        }
        self.store.commit(transaction.patch(patch)).await?;
        Ok(())
    }
}

fn decide(decision: Decision) -> Result<Patch, ApplicationError> {
    decision.into_patch().map_err(|reason| {
        warn!("entry change rejected: {reason}");
        ApplicationError::from(reason)
    })
}
