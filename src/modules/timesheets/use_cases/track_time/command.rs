use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct StartTimer {
    pub entry_key: String,
    pub project_id: String,
    pub task_id: Option<String>,
    pub notes: String,
    pub is_billable: bool,
    pub now: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StopTimer {
    pub now: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddEntry {
    pub entry_key: String,
    pub date: NaiveDate,
    pub project_id: String,
    pub task_id: Option<String>,
    pub hours: f64,
    pub notes: String,
    pub is_billable: bool,
    pub now: DateTime<Utc>,
}

/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateEntry {
    pub entry_key: String,
    pub date: Option<NaiveDate>,
    pub project_id: Option<String>,
    pub task_id: Option<String>,
    pub hours: Option<f64>,
    pub notes: Option<String>,
    pub is_billable: Option<bool>,
    pub now: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteEntry {
    pub entry_key: String,
    pub now: DateTime<Utc>,
}
