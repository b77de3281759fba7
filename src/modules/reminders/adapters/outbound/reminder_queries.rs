use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::modules::organisation::adapters::outbound::organisation_documents::OrganisationDocuments;
use crate::modules::timesheets::core::status::TimesheetStatus;
use crate::modules::timesheets::core::timesheet::TIMESHEET_TYPE;
use crate::shared::core::reference::Reference;
use crate::shared::infrastructure::document_store::{DocumentStore, Query, fetch_as};

/// A timesheet reduced to what the reminder jobs look at.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetSummary {
    pub user: Reference,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    #[serde(default)]
    pub total_hours: f64,
}

#[async_trait]
pub trait ReminderQueries: Send + Sync {
    async fn active_user_ids(&self) -> anyhow::Result<Vec<String>>;

    async fn timesheets_of_week(&self, week_start: NaiveDate) -> anyhow::Result<Vec<TimesheetSummary>>;

    /// Timesheets still waiting for their owner: unsubmitted or rejected.
    async fn open_timesheets(&self) -> anyhow::Result<Vec<TimesheetSummary>>;
}

#[async_trait]
impl<S> ReminderQueries for S
where
    S: DocumentStore + ?Sized,
{
    async fn active_user_ids(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.active_users().await?.into_iter().map(|user| user.id).collect())
    }

    async fn timesheets_of_week(&self, week_start: NaiveDate) -> anyhow::Result<Vec<TimesheetSummary>> {
        let query = Query::of_type(TIMESHEET_TYPE).eq("weekStart", week_start.to_string());
        Ok(fetch_as(self, &query).await?)
    }

    async fn open_timesheets(&self) -> anyhow::Result<Vec<TimesheetSummary>> {
        let query = Query::of_type(TIMESHEET_TYPE).any_of(
            "status",
            [TimesheetStatus::Unsubmitted, TimesheetStatus::Rejected].map(TimesheetStatus::as_str),
        );
        Ok(fetch_as(self, &query).await?)
    }
}
