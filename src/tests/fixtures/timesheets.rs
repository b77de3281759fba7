use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::modules::timesheets::core::status::TimesheetStatus;
use crate::modules::timesheets::core::timesheet::{Timesheet, Totals, TimesheetEntry};
use crate::shared::core::reference::Reference;
use crate::shared::infrastructure::document_store::Patch;

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 12, 9, 0, 0).unwrap()
}

pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
}

/// Entries written by a patch produced by `Timesheet::entries_patch`.
pub fn patched_entries(patch: &Patch) -> Vec<TimesheetEntry> {
    serde_json::from_value(patch.set["entries"].clone()).unwrap()
}

pub struct EntryBuilder {
    inner: TimesheetEntry,
}

#[allow(dead_code)]
impl EntryBuilder {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            inner: TimesheetEntry {
                key: key.into(),
                date: "2024-06-10".to_string(),
                project: Reference::to("project-1"),
                task: None,
                hours: 1.0,
                start_time: None,
                end_time: None,
                notes: String::new(),
                is_billable: false,
                is_running: false,
            },
        }
    }

    pub fn date(mut self, v: impl Into<String>) -> Self {
        self.inner.date = v.into();
        self
    }

    pub fn project(mut self, v: impl Into<String>) -> Self {
        self.inner.project = Reference::to(v);
        self
    }

    pub fn task(mut self, v: impl Into<String>) -> Self {
        self.inner.task = Some(Reference::to(v));
        self
    }

    pub fn hours(mut self, v: f64) -> Self {
        self.inner.hours = v;
        self
    }

    pub fn billable(mut self, v: bool) -> Self {
        self.inner.is_billable = v;
        self
    }

    pub fn running(self) -> Self {
        self.started_at(fixed_now())
    }

    pub fn started_at(mut self, v: DateTime<Utc>) -> Self {
        self.inner.is_running = true;
        self.inner.hours = 0.0;
        self.inner.start_time = Some(v);
        self.inner.end_time = None;
        self
    }

    pub fn build(self) -> TimesheetEntry {
        self.inner
    }
}

pub struct TimesheetBuilder {
    inner: Timesheet,
}

#[allow(dead_code)]
impl TimesheetBuilder {
    pub fn new(user_id: &str) -> Self {
        Self {
            inner: Timesheet::new(user_id, monday(), fixed_now()),
        }
    }

    pub fn week_of(mut self, date: NaiveDate) -> Self {
        let rebuilt = Timesheet::new(self.inner.owner_id(), date, fixed_now());
        self.inner = Timesheet {
            entries: self.inner.entries,
            status: self.inner.status,
            is_locked: self.inner.is_locked,
            ..rebuilt
        };
        self.refresh_totals()
    }

    /// Override the derived id, as stray duplicate records of a week carry.
    pub fn id(mut self, v: impl Into<String>) -> Self {
        self.inner.id = v.into();
        self
    }

    pub fn status(mut self, v: TimesheetStatus) -> Self {
        self.inner.status = v;
        self.inner.is_locked = v == TimesheetStatus::Approved;
        self
    }

    pub fn entry(mut self, v: TimesheetEntry) -> Self {
        self.inner.entries.push(v);
        self.refresh_totals()
    }

    pub fn build(self) -> Timesheet {
        self.inner
    }

    fn refresh_totals(mut self) -> Self {
        let totals = Totals::of(&self.inner.entries);
        self.inner.total_hours = totals.total_hours;
        self.inner.billable_hours = totals.billable_hours;
        self.inner.non_billable_hours = totals.non_billable_hours;
        self.inner.has_running_timer = totals.has_running_timer;
        self
    }
}
