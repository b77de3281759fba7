use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct RejectTimesheet {
    pub timesheet_id: String,
    pub reason: Option<String>,
    pub rejected_by: String,
    pub now: DateTime<Utc>,
}
