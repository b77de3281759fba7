use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitTimesheet {
    pub timesheet_id: String,
    pub now: DateTime<Utc>,
}
