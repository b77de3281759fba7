use async_trait::async_trait;
use serde_json::Value as Json;
use thiserror::Error;

/// A notification that should leave the service, recorded before delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboxRow {
    pub topic: String,
    pub intent_type: String,
    pub recipient_id: String,
    /// Rows sharing recipient, intent type and dedupe key are delivered once.
    pub dedupe_key: String,
    pub occurred_at: i64,
    pub payload: Json,
}

#[derive(Debug, Error)]
pub enum OutboxError {
    #[error("duplicate {intent_type} for {recipient_id} ({dedupe_key})")]
    Duplicate {
        intent_type: String,
        recipient_id: String,
        dedupe_key: String,
    },

    #[error("backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait IntentOutbox: Send + Sync {
    async fn enqueue(&self, row: OutboxRow) -> Result<(), OutboxError>;
}

pub mod document_store;
pub mod in_memory;
