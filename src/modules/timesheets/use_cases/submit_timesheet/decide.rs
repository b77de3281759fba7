use serde_json::json;

use crate::modules::timesheets::core::decision::{DecideError, Decision};
use crate::modules::timesheets::core::status::TimesheetStatus;
use crate::modules::timesheets::core::timesheet::Timesheet;
use crate::modules::timesheets::use_cases::submit_timesheet::command::SubmitTimesheet;

/// Hand an editable timesheet over for approval.
///
/// Resubmitting a rejected timesheet clears the previous rejection.
pub fn decide_submit(timesheet: &Timesheet, command: SubmitTimesheet) -> Decision {
    if !timesheet.status.is_editable() || timesheet.is_locked {
        return Decision::Rejected {
            reason: DecideError::InvalidStatus {
                action: "submit",
                status: timesheet.status,
            },
        };
    }
    if timesheet.entries.is_empty() {
        return Decision::Rejected {
            reason: DecideError::NoEntries,
        };
    }
    if timesheet.running_entry().is_some() {
        return Decision::Rejected {
            reason: DecideError::RunningTimer,
        };
    }
    let patch = timesheet
        .patch()
        .set("status", TimesheetStatus::Submitted.as_str())
        .set("submittedAt", json!(command.now))
        .set("updatedAt", json!(command.now))
        .unset("rejectedAt")
        .unset("rejectedBy")
        .unset("rejectionReason");
    Decision::Accepted { patch }
}
