use std::collections::HashSet;

use chrono::NaiveDate;

use crate::modules::timesheets::use_cases::pending_approvals::queries_port::EntryDateRow;
use crate::shared::core::week::{parse_entry_date, week_start};

fn week_key(row: &EntryDateRow) -> Option<(&str, NaiveDate)> {
    let date = parse_entry_date(row.date.as_deref()?)?;
    Some((row.user_id.as_str(), week_start(date)))
}

/// Members with outstanding work in a week that has not been approved.
///
/// Each pending row is keyed by (user, Monday of its entry date); keys also present among
/// the approved rows are dropped. Returns distinct user ids in first-seen order. Rows
/// without a parseable date are skipped.
pub fn reconcile(pending: &[EntryDateRow], approved: &[EntryDateRow]) -> Vec<String> {
    let approved_weeks: HashSet<(&str, NaiveDate)> = approved.iter().filter_map(week_key).collect();
    let mut members: Vec<String> = Vec::new();
    for (user_id, week) in pending.iter().filter_map(week_key) {
        if approved_weeks.contains(&(user_id, week)) {
            continue;
        }
        if !members.iter().any(|member| member == user_id) {
            members.push(user_id.to_string());
        }
    }
    members
}
