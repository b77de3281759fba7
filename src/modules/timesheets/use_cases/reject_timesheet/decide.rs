use serde_json::json;

use crate::modules::timesheets::core::decision::{DecideError, Decision};
use crate::modules::timesheets::core::status::TimesheetStatus;
use crate::modules::timesheets::core::timesheet::Timesheet;
use crate::modules::timesheets::use_cases::reject_timesheet::command::RejectTimesheet;
use crate::shared::core::reference::Reference;

/// Hand a submitted timesheet back to its owner.
pub fn decide_reject(timesheet: &Timesheet, command: RejectTimesheet) -> Decision {
    if timesheet.status != TimesheetStatus::Submitted {
        return Decision::Rejected {
            reason: DecideError::InvalidStatus {
                action: "reject",
                status: timesheet.status,
            },
        };
    }
    let patch = timesheet
        .patch()
        .set("status", TimesheetStatus::Rejected.as_str())
        .set("isLocked", false)
        .set("rejectedAt", json!(command.now))
        .set("rejectedBy", json!(Reference::to(command.rejected_by)))
        .set("updatedAt", json!(command.now));
    let patch = match command.reason.map(|reason| reason.trim().to_string()) {
        Some(reason) if !reason.is_empty() => patch.set("rejectionReason", reason),
        _ => patch.unset("rejectionReason"),
    };
    Decision::Accepted { patch }
}
