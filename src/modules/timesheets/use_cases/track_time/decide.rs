use chrono::{DateTime, Utc};

use crate::modules::timesheets::core::decision::{DecideError, Decision};
use crate::modules::timesheets::core::status::TimesheetStatus;
use crate::modules::timesheets::core::timesheet::{Timesheet, TimesheetEntry};
use crate::modules::timesheets::use_cases::track_time::command::{
    AddEntry, DeleteEntry, StartTimer, StopTimer, UpdateEntry,
};
use crate::shared::core::reference::Reference;
use crate::shared::core::time_format::format_decimal_hours;
use crate::shared::infrastructure::document_store::Patch;

fn ensure_editable(timesheet: &Timesheet, action: &'static str) -> Result<(), DecideError> {
    if timesheet.is_locked {
        return Err(DecideError::Locked);
    }
    if !timesheet.status.is_editable() {
        return Err(DecideError::InvalidStatus {
            action,
            status: timesheet.status,
        });
    }
    Ok(())
}

fn valid_hours(hours: f64) -> Result<f64, DecideError> {
    if !hours.is_finite() || hours < 0.0 {
        return Err(DecideError::InvalidHours);
    }
    Ok(format_decimal_hours(hours))
}

/// The running entry turned into a fixed-hours entry ending at `now`.
pub fn stop_entry(entry: &TimesheetEntry, now: DateTime<Utc>) -> TimesheetEntry {
    let elapsed_ms = entry
        .start_time
        .map(|start| (now - start).num_milliseconds().max(0))
        .unwrap_or(0);
    TimesheetEntry {
        hours: format_decimal_hours(elapsed_ms as f64 / 3_600_000.0),
        end_time: Some(now),
        is_running: false,
        ..entry.clone()
    }
}

pub fn decide_start_timer(timesheet: &Timesheet, command: StartTimer) -> Decision {
    start_timer(timesheet, command).into()
}

fn start_timer(timesheet: &Timesheet, command: StartTimer) -> Result<Patch, DecideError> {
    ensure_editable(timesheet, "start a timer on")?;
    if timesheet.running_entry().is_some() {
        return Err(DecideError::TimerAlreadyRunning);
    }
    let mut entries = timesheet.entries.clone();
    entries.push(TimesheetEntry {
        key: command.entry_key,
        date: command.now.date_naive().to_string(),
        project: Reference::to(command.project_id),
        task: command.task_id.map(Reference::to),
        hours: 0.0,
        start_time: Some(command.now),
        end_time: None,
        notes: command.notes,
        is_billable: command.is_billable,
        is_running: true,
    });
    Ok(timesheet.entries_patch(&entries, command.now))
}

/// Stopping is allowed after submission, only approval freezes a running entry.
pub fn decide_stop_timer(timesheet: &Timesheet, command: StopTimer) -> Decision {
    stop_timer(timesheet, command).into()
}

fn stop_timer(timesheet: &Timesheet, command: StopTimer) -> Result<Patch, DecideError> {
    if timesheet.is_locked || timesheet.status == TimesheetStatus::Approved {
        return Err(DecideError::Locked);
    }
    let running = timesheet
        .running_entry()
        .ok_or(DecideError::NoRunningTimer)?;
    let stopped = stop_entry(running, command.now);
    let entries: Vec<TimesheetEntry> = timesheet
        .entries
        .iter()
        .map(|entry| {
            if entry.key == stopped.key {
                stopped.clone()
            } else {
                entry.clone()
            }
        })
        .collect();
    Ok(timesheet.entries_patch(&entries, command.now))
}

pub fn decide_add_entry(timesheet: &Timesheet, command: AddEntry) -> Decision {
    add_entry(timesheet, command).into()
}

fn add_entry(timesheet: &Timesheet, command: AddEntry) -> Result<Patch, DecideError> {
    ensure_editable(timesheet, "add entries to")?;
    if !timesheet.covers(command.date) {
        return Err(DecideError::DateOutsideWeek(command.date.to_string()));
    }
    let hours = valid_hours(command.hours)?;
    let mut entries = timesheet.entries.clone();
    entries.push(TimesheetEntry {
        key: command.entry_key,
        date: command.date.to_string(),
        project: Reference::to(command.project_id),
        task: command.task_id.map(Reference::to),
        hours,
        start_time: None,
        end_time: None,
        notes: command.notes,
        is_billable: command.is_billable,
        is_running: false,
    });
    Ok(timesheet.entries_patch(&entries, command.now))
}

pub fn decide_update_entry(timesheet: &Timesheet, command: UpdateEntry) -> Decision {
    update_entry(timesheet, command).into()
}

fn update_entry(timesheet: &Timesheet, command: UpdateEntry) -> Result<Patch, DecideError> {
    ensure_editable(timesheet, "edit entries of")?;
    let current = timesheet
        .entry(&command.entry_key)
        .ok_or_else(|| DecideError::EntryNotFound(command.entry_key.clone()))?;
    let mut updated = current.clone();
    if let Some(date) = command.date {
        if !timesheet.covers(date) {
            return Err(DecideError::DateOutsideWeek(date.to_string()));
        }
        updated.date = date.to_string();
    }
    if let Some(hours) = command.hours {
        if updated.is_running {
            return Err(DecideError::RunningTimer);
        }
        updated.hours = valid_hours(hours)?;
    }
    if let Some(project_id) = command.project_id {
        updated.project = Reference::to(project_id);
    }
    if let Some(task_id) = command.task_id {
        updated.task = Some(Reference::to(task_id));
    }
    if let Some(notes) = command.notes {
        updated.notes = notes;
    }
    if let Some(is_billable) = command.is_billable {
        updated.is_billable = is_billable;
    }
    let entries: Vec<TimesheetEntry> = timesheet
        .entries
        .iter()
        .map(|entry| {
            if entry.key == updated.key {
                updated.clone()
            } else {
                entry.clone()
            }
        })
        .collect();
    Ok(timesheet.entries_patch(&entries, command.now))
}

pub fn decide_delete_entry(timesheet: &Timesheet, command: DeleteEntry) -> Decision {
    delete_entry(timesheet, command).into()
}

fn delete_entry(timesheet: &Timesheet, command: DeleteEntry) -> Result<Patch, DecideError> {
    ensure_editable(timesheet, "delete entries of")?;
    if timesheet.entry(&command.entry_key).is_none() {
        return Err(DecideError::EntryNotFound(command.entry_key));
    }
    let entries: Vec<TimesheetEntry> = timesheet
        .entries
        .iter()
        .filter(|entry| entry.key != command.entry_key)
        .cloned()
        .collect();
    Ok(timesheet.entries_patch(&entries, command.now))
}
