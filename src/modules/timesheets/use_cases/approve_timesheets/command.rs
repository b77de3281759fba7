use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct ApproveTimesheets {
    pub timesheet_ids: Vec<String>,
    pub approved_by: String,
    pub now: DateTime<Utc>,
}
