use crate::shared::infrastructure::intent_outbox::{IntentOutbox, OutboxError, OutboxRow};
use std::collections::HashSet;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Default)]
pub struct InMemoryIntentOutbox {
    rows: Mutex<Vec<OutboxRow>>,
    seen: Mutex<HashSet<(String, String, String)>>,
    is_offline: bool,
}

impl InMemoryIntentOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub async fn rows(&self) -> Vec<OutboxRow> {
        self.rows.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl IntentOutbox for InMemoryIntentOutbox {
    async fn enqueue(&self, row: OutboxRow) -> Result<(), OutboxError> {
        if self.is_offline {
            return Err(OutboxError::Backend("Outbox offline".into()));
        }
        let key = (
            row.intent_type.clone(),
            row.recipient_id.clone(),
            row.dedupe_key.clone(),
        );
        {
            let mut seen = self.seen.lock().await;
            if !seen.insert(key) {
                return Err(OutboxError::Duplicate {
                    intent_type: row.intent_type,
                    recipient_id: row.recipient_id,
                    dedupe_key: row.dedupe_key,
                });
            }
        }
        info!(
            topic = %row.topic,
            intent = %row.intent_type,
            recipient = %row.recipient_id,
            "intent enqueued"
        );
        self.rows.lock().await.push(row);
        Ok(())
    }
}
