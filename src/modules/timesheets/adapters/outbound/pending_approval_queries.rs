use async_trait::async_trait;
use serde::Deserialize;

use crate::modules::timesheets::core::status::TimesheetStatus;
use crate::modules::timesheets::core::timesheet::TIMESHEET_TYPE;
use crate::modules::timesheets::use_cases::pending_approvals::queries_port::{
    EntryDateRow, PendingApprovalQueries,
};
use crate::shared::core::reference::Reference;
use crate::shared::infrastructure::document_store::{DocumentStore, Query, fetch_as};

/// Narrow read of a timesheet: who owns it and the dates of its entries.
#[derive(Deserialize)]
struct TimesheetDates {
    user: Reference,
    #[serde(default)]
    entries: Vec<EntryDate>,
}

#[derive(Deserialize)]
struct EntryDate {
    #[serde(default)]
    date: Option<String>,
}

#[async_trait]
impl<S> PendingApprovalQueries for S
where
    S: DocumentStore + ?Sized,
{
    async fn entry_dates(
        &self,
        member_ids: &[String],
        statuses: &[TimesheetStatus],
    ) -> anyhow::Result<Vec<EntryDateRow>> {
        if member_ids.is_empty() || statuses.is_empty() {
            return Ok(Vec::new());
        }
        let query = Query::of_type(TIMESHEET_TYPE)
            .any_of("user._ref", member_ids.iter().cloned())
            .any_of("status", statuses.iter().map(|status| status.as_str()));
        let timesheets: Vec<TimesheetDates> = fetch_as(self, &query).await?;
        Ok(timesheets
            .into_iter()
            .flat_map(|timesheet| {
                let user_id = timesheet.user.id;
                timesheet.entries.into_iter().map(move |entry| EntryDateRow {
                    user_id: user_id.clone(),
                    date: entry.date,
                })
            })
            .collect())
    }
}
