use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct CreateClient {
    pub client_id: String,
    pub name: String,
    pub now: DateTime<Utc>,
}
