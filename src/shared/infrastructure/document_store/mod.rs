// Port for the headless document store that owns every persisted document.
//
// Reads go through `fetch` (typed query) and `get` (single document by id). Writes go
// through `commit`, which applies a whole transaction atomically or not at all.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as Json;
use thiserror::Error;

pub use query::{Filter, Query};
pub use transaction::{MAX_MUTATIONS_PER_TRANSACTION, Mutation, Patch, Transaction};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document {0} not found")]
    NotFound(String),

    #[error("document {0} already exists")]
    AlreadyExists(String),

    /// The document no longer carries the revision a patch was built from.
    #[error("document {0} was changed by another write")]
    RevisionMismatch(String),

    #[error("transaction holds {actual} mutations, the limit is {limit}")]
    TransactionTooLarge { actual: usize, limit: usize },

    #[error("could not decode document: {0}")]
    Decode(String),

    #[error("backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn fetch(&self, query: &Query) -> Result<Vec<Json>, StoreError>;
    async fn get(&self, id: &str) -> Result<Option<Json>, StoreError>;
    async fn commit(&self, transaction: Transaction) -> Result<(), StoreError>;
}

pub async fn fetch_as<T, S>(store: &S, query: &Query) -> Result<Vec<T>, StoreError>
where
    T: DeserializeOwned,
    S: DocumentStore + ?Sized,
{
    store
        .fetch(query)
        .await?
        .into_iter()
        .map(decode)
        .collect()
}

pub async fn get_as<T, S>(store: &S, id: &str) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
    S: DocumentStore + ?Sized,
{
    store.get(id).await?.map(decode).transpose()
}

fn decode<T: DeserializeOwned>(document: Json) -> Result<T, StoreError> {
    serde_json::from_value(document).map_err(|e| StoreError::Decode(e.to_string()))
}

/// Turn a typed document into the JSON shape the store persists.
pub fn encode<T: Serialize>(document: &T) -> Result<Json, StoreError> {
    serde_json::to_value(document).map_err(|e| StoreError::Decode(e.to_string()))
}

pub mod batch;
pub mod http;
pub mod in_memory;
pub mod query;
pub mod transaction;
