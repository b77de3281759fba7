use async_trait::async_trait;

use crate::modules::timesheets::core::status::TimesheetStatus;
use crate::modules::timesheets::core::timesheet::{TIMESHEET_TYPE, Timesheet};
use crate::modules::timesheets::use_cases::recalculate_project_hours::queries_port::{
    HoursScope, ProjectHoursQueries,
};
use crate::shared::core::time_format::format_decimal_hours;
use crate::shared::infrastructure::document_store::{DocumentStore, Query, fetch_as};

#[async_trait]
impl<S> ProjectHoursQueries for S
where
    S: DocumentStore + ?Sized,
{
    async fn sum_hours(&self, project_id: &str, scope: HoursScope) -> anyhow::Result<Option<f64>> {
        let mut query = Query::of_type(TIMESHEET_TYPE).references(project_id);
        if scope == HoursScope::Approved {
            query = query.eq("status", TimesheetStatus::Approved.as_str());
        }
        let timesheets: Vec<Timesheet> = fetch_as(self, &query).await?;
        let hours: Vec<f64> = timesheets
            .iter()
            .flat_map(|timesheet| timesheet.entries.iter())
            .filter(|entry| entry.project.id == project_id)
            .filter(|entry| scope != HoursScope::Billable || entry.is_billable)
            .map(|entry| entry.hours)
            .collect();
        if hours.is_empty() {
            return Ok(None);
        }
        Ok(Some(format_decimal_hours(hours.iter().sum::<f64>())))
    }
}
