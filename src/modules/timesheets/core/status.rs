use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle of a weekly timesheet.
///
/// `unsubmitted -> submitted -> approved`, with `submitted -> rejected` handing the
/// timesheet back to its owner. Only `approved` is terminal.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, async_graphql::Enum,
)]
#[serde(rename_all = "lowercase")]
pub enum TimesheetStatus {
    #[default]
    Unsubmitted,
    Submitted,
    Approved,
    Rejected,
}

impl TimesheetStatus {
    /// Whether the owner may add, change or remove entries.
    pub fn is_editable(self) -> bool {
        matches!(self, TimesheetStatus::Unsubmitted | TimesheetStatus::Rejected)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimesheetStatus::Unsubmitted => "unsubmitted",
            TimesheetStatus::Submitted => "submitted",
            TimesheetStatus::Approved => "approved",
            TimesheetStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for TimesheetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a status transition, as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, async_graphql::SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub timesheet_id: String,
    pub status: TimesheetStatus,
}
