use async_graphql::{Context, Object, Result as GqlResult, SimpleObject};
use chrono::{DateTime, NaiveDate, Utc};

use crate::modules::timesheets::core::status::TimesheetStatus;
use crate::modules::timesheets::core::timesheet::{Timesheet, TimesheetEntry};
use crate::modules::timesheets::use_cases::track_time::handler::TimerEntry;
use crate::shared::core::time_format::format_simple_time;
use crate::shared::inbound::graphql::{session, to_gql_error};
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlEntry {
    pub key: String,
    pub date: String,
    pub project_id: String,
    pub task_id: Option<String>,
    pub hours: f64,
    /// `H:MM` rendering of `hours`.
    pub duration: String,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub notes: String,
    pub is_billable: bool,
    pub is_running: bool,
}

impl From<TimesheetEntry> for GqlEntry {
    fn from(v: TimesheetEntry) -> Self {
        Self {
            duration: format_simple_time(v.hours),
            key: v.key,
            date: v.date,
            project_id: v.project.id,
            task_id: v.task.map(|task| task.id),
            hours: v.hours,
            start_time: v.start_time,
            end_time: v.end_time,
            notes: v.notes,
            is_billable: v.is_billable,
            is_running: v.is_running,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlTimesheet {
    pub id: String,
    pub user_id: String,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub year: i32,
    pub week_number: u32,
    pub status: TimesheetStatus,
    pub entries: Vec<GqlEntry>,
    pub total_hours: f64,
    pub billable_hours: f64,
    pub non_billable_hours: f64,
    pub total_time: String,
    pub has_running_timer: bool,
    pub is_locked: bool,
    pub rejection_reason: Option<String>,
}

impl From<Timesheet> for GqlTimesheet {
    fn from(v: Timesheet) -> Self {
        Self {
            total_time: format_simple_time(v.total_hours),
            id: v.id,
            user_id: v.user.id,
            week_start: v.week_start,
            week_end: v.week_end,
            year: v.year,
            week_number: v.week_number,
            status: v.status,
            entries: v.entries.into_iter().map(Into::into).collect(),
            total_hours: v.total_hours,
            billable_hours: v.billable_hours,
            non_billable_hours: v.non_billable_hours,
            has_running_timer: v.has_running_timer,
            is_locked: v.is_locked,
            rejection_reason: v.rejection_reason,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlRunningTimer {
    pub timesheet_id: String,
    pub entry: GqlEntry,
}

impl From<TimerEntry> for GqlRunningTimer {
    fn from(v: TimerEntry) -> Self {
        Self {
            timesheet_id: v.timesheet_id,
            entry: v.entry.into(),
        }
    }
}

#[derive(Default)]
pub struct TrackTimeQuery;

#[Object]
impl TrackTimeQuery {
    async fn running_timer(&self, context: &Context<'_>) -> GqlResult<Option<GqlRunningTimer>> {
        let state = context.data_unchecked::<AppState>();
        let session = session(context)?;
        let running = state
            .track_time
            .running_timer(session)
            .await
            .map_err(to_gql_error)?;
        Ok(running.map(Into::into))
    }

    async fn timesheet(
        &self,
        context: &Context<'_>,
        date: NaiveDate,
        user_id: Option<String>,
    ) -> GqlResult<Option<GqlTimesheet>> {
        let state = context.data_unchecked::<AppState>();
        let session = session(context)?;
        let timesheet = state
            .track_time
            .timesheet_for_week(session, user_id, date)
            .await
            .map_err(to_gql_error)?;
        Ok(timesheet.map(Into::into))
    }
}
