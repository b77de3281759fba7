use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTask {
    pub task_id: String,
    pub name: String,
    pub is_billable: bool,
    pub now: DateTime<Utc>,
}
