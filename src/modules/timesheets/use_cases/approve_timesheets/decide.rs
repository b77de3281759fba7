use chrono::{DateTime, Utc};
use serde_json::json;

use crate::modules::timesheets::core::decision::{DecideError, Decision};
use crate::modules::timesheets::core::status::TimesheetStatus;
use crate::modules::timesheets::core::timesheet::Timesheet;
use crate::shared::core::reference::Reference;

/// Approve and lock one submitted timesheet.
pub fn decide_approve(timesheet: &Timesheet, approved_by: &str, now: DateTime<Utc>) -> Decision {
    if timesheet.status != TimesheetStatus::Submitted {
        return Decision::Rejected {
            reason: DecideError::InvalidStatus {
                action: "approve",
                status: timesheet.status,
            },
        };
    }
    let patch = timesheet
        .patch()
        .set("status", TimesheetStatus::Approved.as_str())
        .set("isLocked", true)
        .set("approvedBy", json!(Reference::to(approved_by)))
        .set("approvedAt", json!(now))
        .set("updatedAt", json!(now));
    Decision::Accepted { patch }
}
