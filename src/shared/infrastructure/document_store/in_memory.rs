// In memory implementation of the DocumentStore port.
//
// Purpose
// - Run handlers and HTTP routes in tests and local development without the remote store.
//
// Responsibilities
// - Keep documents keyed by `_id`.
// - Apply each transaction to a working copy and swap it in only when every mutation
//   succeeded, so a failed transaction leaves no trace.
// - Stamp a fresh `_rev` on every written document and refuse patches built from an
//   older revision.
// - Record committed transaction sizes and allow injecting failures for tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value as Json;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use super::{DocumentStore, Mutation, Patch, Query, StoreError, Transaction};

#[derive(Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<BTreeMap<String, Json>>,
    committed: Mutex<Vec<usize>>,
    attempts: AtomicUsize,
    fail_on_attempt: Option<usize>,
    is_offline: bool,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    /// Make the n-th commit attempt (1-based) fail with a backend error.
    pub fn fail_on_commit(&mut self, attempt: usize) {
        self.fail_on_attempt = Some(attempt);
    }

    /// Store a document outside of any transaction, under a fresh revision.
    pub async fn insert(&self, mut document: Json) -> Result<(), StoreError> {
        let id = document_id(&document)?;
        stamp_revision(&mut document);
        self.documents.write().await.insert(id, document);
        Ok(())
    }

    /// Sizes of the transactions committed so far, in commit order.
    pub async fn committed_transaction_sizes(&self) -> Vec<usize> {
        self.committed.lock().await.clone()
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.is_offline {
            return Err(StoreError::Backend("Document store offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn fetch(&self, query: &Query) -> Result<Vec<Json>, StoreError> {
        self.ensure_online()?;
        let guard = self.documents.read().await;
        Ok(guard
            .values()
            .filter(|document| query.matches(document))
            .cloned()
            .collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Json>, StoreError> {
        self.ensure_online()?;
        Ok(self.documents.read().await.get(id).cloned())
    }

    async fn commit(&self, transaction: Transaction) -> Result<(), StoreError> {
        self.ensure_online()?;
        transaction.validate()?;
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_attempt == Some(attempt) {
            return Err(StoreError::Backend(format!("commit {attempt} refused")));
        }

        let size = transaction.len();
        let mut guard = self.documents.write().await;
        let mut working = guard.clone();
        for mutation in transaction.into_mutations() {
            apply(&mut working, mutation)?;
        }
        *guard = working;
        self.committed.lock().await.push(size);
        Ok(())
    }
}

fn document_id(document: &Json) -> Result<String, StoreError> {
    document
        .get("_id")
        .and_then(Json::as_str)
        .map(str::to_string)
        .ok_or_else(|| StoreError::Backend("document without _id".into()))
}

fn stamp_revision(document: &mut Json) {
    if let Some(fields) = document.as_object_mut() {
        fields.insert("_rev".to_string(), Json::String(Uuid::now_v7().to_string()));
    }
}

fn apply(documents: &mut BTreeMap<String, Json>, mutation: Mutation) -> Result<(), StoreError> {
    match mutation {
        Mutation::Create(mut document) => {
            let id = document_id(&document)?;
            if documents.contains_key(&id) {
                return Err(StoreError::AlreadyExists(id));
            }
            stamp_revision(&mut document);
            documents.insert(id, document);
        }
        Mutation::CreateIfNotExists(mut document) => {
            let id = document_id(&document)?;
            if !documents.contains_key(&id) {
                stamp_revision(&mut document);
                documents.insert(id, document);
            }
        }
        Mutation::Delete(id) => {
            documents.remove(&id);
        }
        Mutation::Patch(patch) => apply_patch(documents, patch)?,
    }
    Ok(())
}

fn apply_patch(documents: &mut BTreeMap<String, Json>, patch: Patch) -> Result<(), StoreError> {
    let document = documents
        .get_mut(&patch.id)
        .filter(|document| document.is_object())
        .ok_or_else(|| StoreError::NotFound(patch.id.clone()))?;
    let current = document.get("_rev").and_then(Json::as_str);
    if patch.if_revision.is_some() && patch.if_revision.as_deref() != current {
        return Err(StoreError::RevisionMismatch(patch.id));
    }
    if let Some(fields) = document.as_object_mut() {
        for (field, value) in patch.set {
            fields.insert(field, value);
        }
        for field in patch.unset {
            fields.remove(&field);
        }
        if let Some((field, items)) = patch.append {
            match fields
                .entry(field.clone())
                .or_insert_with(|| Json::Array(Vec::new()))
            {
                Json::Array(existing) => existing.extend(items),
                _ => return Err(StoreError::Backend(format!("{field} is not an array"))),
            }
        }
    }
    stamp_revision(document);
    Ok(())
}
