use crate::modules::timesheets::core::status::TimesheetStatus;
use crate::shared::core::errors::ApplicationError;
use crate::shared::infrastructure::document_store::Patch;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("timesheet has no entries")]
    NoEntries,

    #[error("cannot {action} a timesheet that is {status}")]
    InvalidStatus {
        action: &'static str,
        status: TimesheetStatus,
    },

    #[error("timesheet is locked")]
    Locked,

    #[error("a timer is already running")]
    TimerAlreadyRunning,

    #[error("no timer is running")]
    NoRunningTimer,

    #[error("stop the running timer first")]
    RunningTimer,

    #[error("entry {0} not found")]
    EntryNotFound(String),

    #[error("hours must be a non-negative number")]
    InvalidHours,

    #[error("date {0} is outside the timesheet week")]
    DateOutsideWeek(String),
}

pub enum Decision {
    Accepted { patch: Patch },
    Rejected { reason: DecideError },
}

impl From<Result<Patch, DecideError>> for Decision {
    fn from(result: Result<Patch, DecideError>) -> Self {
        match result {
            Ok(patch) => Decision::Accepted { patch },
            Err(reason) => Decision::Rejected { reason },
        }
    }
}

impl From<DecideError> for ApplicationError {
    fn from(reason: DecideError) -> Self {
        match reason {
            DecideError::InvalidHours | DecideError::DateOutsideWeek(_) => {
                ApplicationError::Validation(reason.to_string())
            }
            DecideError::EntryNotFound(key) => ApplicationError::NotFound(format!("entry {key}")),
            other => ApplicationError::Domain(other.to_string()),
        }
    }
}

impl Decision {
    pub fn into_patch(self) -> Result<Patch, DecideError> {
        match self {
            Decision::Accepted { patch } => Ok(patch),
            Decision::Rejected { reason } => Err(reason),
        }
    }
}
