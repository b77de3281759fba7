// Weekly timesheet document and the entries embedded in it.
//
// One timesheet exists per (user, ISO week). Its id is derived from both so that two
// writers racing to create the same week end up on the same document.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::modules::timesheets::core::status::TimesheetStatus;
use crate::shared::core::reference::Reference;
use crate::shared::core::time_format::{deserialize_hours, format_decimal_hours};
use crate::shared::core::week::{iso_year_week, week_end, week_start};
use crate::shared::infrastructure::document_store::Patch;

pub const TIMESHEET_TYPE: &str = "timesheet";

fn timesheet_type() -> String {
    TIMESHEET_TYPE.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetEntry {
    #[serde(rename = "_key")]
    pub key: String,
    /// `YYYY-MM-DD`; left empty by documents that never carried one.
    #[serde(default)]
    pub date: String,
    pub project: Reference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<Reference>,
    #[serde(default, deserialize_with = "deserialize_hours")]
    pub hours: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub is_billable: bool,
    #[serde(default)]
    pub is_running: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timesheet {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_type", default = "timesheet_type")]
    pub kind: String,
    /// Store revision this copy was read at; absent until the timesheet is stored.
    #[serde(rename = "_rev", default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    pub user: Reference,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub year: i32,
    pub week_number: u32,
    #[serde(default)]
    pub status: TimesheetStatus,
    #[serde(default)]
    pub entries: Vec<TimesheetEntry>,
    #[serde(default)]
    pub total_hours: f64,
    #[serde(default)]
    pub billable_hours: f64,
    #[serde(default)]
    pub non_billable_hours: f64,
    #[serde(default)]
    pub has_running_timer: bool,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected_by: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Derived totals of a set of entries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub total_hours: f64,
    pub billable_hours: f64,
    pub non_billable_hours: f64,
    pub has_running_timer: bool,
}

impl Totals {
    pub fn of(entries: &[TimesheetEntry]) -> Self {
        let total: f64 = entries.iter().map(|entry| entry.hours).sum();
        let billable: f64 = entries
            .iter()
            .filter(|entry| entry.is_billable)
            .map(|entry| entry.hours)
            .sum();
        Self {
            total_hours: format_decimal_hours(total),
            billable_hours: format_decimal_hours(billable),
            non_billable_hours: format_decimal_hours(total - billable),
            has_running_timer: entries.iter().any(|entry| entry.is_running),
        }
    }
}

impl Timesheet {
    pub fn id_for(user_id: &str, week_start: NaiveDate) -> String {
        format!("timesheet-{user_id}-{week_start}")
    }

    /// Empty timesheet for the week `date` falls in.
    pub fn new(user_id: &str, date: NaiveDate, now: DateTime<Utc>) -> Self {
        let start = week_start(date);
        let (year, week_number) = iso_year_week(start);
        Self {
            id: Self::id_for(user_id, start),
            kind: timesheet_type(),
            revision: None,
            user: Reference::to(user_id),
            week_start: start,
            week_end: week_end(start),
            year,
            week_number,
            status: TimesheetStatus::Unsubmitted,
            entries: Vec::new(),
            total_hours: 0.0,
            billable_hours: 0.0,
            non_billable_hours: 0.0,
            has_running_timer: false,
            is_locked: false,
            submitted_at: None,
            approved_at: None,
            approved_by: None,
            rejected_at: None,
            rejected_by: None,
            rejection_reason: None,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    pub fn owner_id(&self) -> &str {
        &self.user.id
    }

    pub fn running_entry(&self) -> Option<&TimesheetEntry> {
        self.entries.iter().find(|entry| entry.is_running)
    }

    pub fn entry(&self, key: &str) -> Option<&TimesheetEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    /// Distinct ids of the projects referenced by the entries, in entry order.
    pub fn project_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for entry in &self.entries {
            if !ids.contains(&entry.project.id) {
                ids.push(entry.project.id.clone());
            }
        }
        ids
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.week_start && date <= self.week_end
    }

    /// Patch that only applies while the stored timesheet is still the one read here.
    pub fn patch(&self) -> Patch {
        match &self.revision {
            Some(revision) => Patch::new(self.id.clone()).if_revision(revision),
            None => Patch::new(self.id.clone()),
        }
    }

    /// Replace the entries and every value derived from them.
    pub fn entries_patch(&self, entries: &[TimesheetEntry], now: DateTime<Utc>) -> Patch {
        let totals = Totals::of(entries);
        self.patch()
            .set("entries", json!(entries))
            .set("totalHours", totals.total_hours)
            .set("billableHours", totals.billable_hours)
            .set("nonBillableHours", totals.non_billable_hours)
            .set("hasRunningTimer", totals.has_running_timer)
            .set("updatedAt", json!(now))
    }
}
