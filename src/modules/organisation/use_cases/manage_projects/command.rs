use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct CreateProject {
    pub project_id: String,
    pub name: String,
    pub client_id: String,
    pub now: DateTime<Utc>,
}
