use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value as Json, json};
use tracing::info;

use crate::shared::infrastructure::document_store::{DocumentStore, StoreError, Transaction};
use crate::shared::infrastructure::intent_outbox::{IntentOutbox, OutboxError, OutboxRow};

pub const OUTBOX_INTENT_TYPE: &str = "outboxIntent";

/// Persists each intent as its own document so deduplication survives restarts.
///
/// The document id is derived from intent type, recipient and dedupe key. A second row with
/// the same triple collides on create and is reported as a duplicate.
pub struct StoreIntentOutbox<TStore: DocumentStore + ?Sized> {
    store: Arc<TStore>,
}

impl<TStore: DocumentStore + ?Sized> StoreIntentOutbox<TStore> {
    pub fn new(store: Arc<TStore>) -> Self {
        Self { store }
    }
}

pub fn outbox_document_id(row: &OutboxRow) -> String {
    let raw = format!("intent-{}-{}-{}", row.intent_type, row.recipient_id, row.dedupe_key);
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

fn outbox_document(row: &OutboxRow) -> Json {
    json!({
        "_id": outbox_document_id(row),
        "_type": OUTBOX_INTENT_TYPE,
        "topic": row.topic,
        "intentType": row.intent_type,
        "recipientId": row.recipient_id,
        "dedupeKey": row.dedupe_key,
        "occurredAt": row.occurred_at,
        "payload": row.payload,
        "status": "pending",
    })
}

#[async_trait]
impl<TStore: DocumentStore + ?Sized> IntentOutbox for StoreIntentOutbox<TStore> {
    async fn enqueue(&self, row: OutboxRow) -> Result<(), OutboxError> {
        let transaction = Transaction::new().create(outbox_document(&row));
        match self.store.commit(transaction).await {
            Ok(()) => {
                info!(
                    topic = %row.topic,
                    intent = %row.intent_type,
                    recipient = %row.recipient_id,
                    "intent enqueued"
                );
                Ok(())
            }
            Err(StoreError::AlreadyExists(_)) => Err(OutboxError::Duplicate {
                intent_type: row.intent_type,
                recipient_id: row.recipient_id,
                dedupe_key: row.dedupe_key,
            }),
            Err(e) => Err(OutboxError::Backend(e.to_string())),
        }
    }
}
