// Remote DocumentStore over the store's HTTP API.
//
// Reads POST a rendered query string with named parameters to the query endpoint. Writes
// POST every mutation of a transaction in one request to the mutate endpoint, which the
// store applies atomically.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Value as Json, json};
use tracing::debug;

use super::{DocumentStore, Query, StoreError, Transaction};

pub struct HttpDocumentStore {
    client: Client,
    base_url: String,
    dataset: String,
    token: Option<String>,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Json,
}

#[derive(Deserialize)]
struct DocResponse {
    #[serde(default)]
    documents: Vec<Json>,
}

impl HttpDocumentStore {
    pub fn new(
        project_id: &str,
        dataset: impl Into<String>,
        api_version: &str,
        token: Option<String>,
    ) -> Self {
        Self::with_base_url(
            format!("https://{project_id}.api.sanity.io/v{api_version}"),
            dataset,
            token,
        )
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        dataset: impl Into<String>,
        token: Option<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            dataset: dataset.into(),
            token,
        }
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: for<'de> Deserialize<'de>>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, StoreError> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let status = response.status();
        if status == StatusCode::CONFLICT {
            let body = response.text().await.unwrap_or_default();
            return Err(conflict(body));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Backend(format!("{status}: {body}")));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}

/// The mutate endpoint answers 409 both for duplicate creates and for stale `ifRevisionID`s.
fn conflict(body: String) -> StoreError {
    if body.to_ascii_lowercase().contains("revision") {
        StoreError::RevisionMismatch(body)
    } else {
        StoreError::AlreadyExists(body)
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn fetch(&self, query: &Query) -> Result<Vec<Json>, StoreError> {
        let (query_string, params) = query.to_query_string();
        debug!(query = %query_string, "fetching documents");
        let request = self
            .client
            .post(format!("{}/data/query/{}", self.base_url, self.dataset))
            .json(&json!({ "query": query_string, "params": params }));
        let response: QueryResponse = self.send(request).await?;
        match response.result {
            Json::Array(documents) => Ok(documents),
            Json::Null => Ok(Vec::new()),
            other => Ok(vec![other]),
        }
    }

    async fn get(&self, id: &str) -> Result<Option<Json>, StoreError> {
        let request = self
            .client
            .get(format!("{}/data/doc/{}/{id}", self.base_url, self.dataset));
        let response: DocResponse = self.send(request).await?;
        Ok(response.documents.into_iter().next())
    }

    async fn commit(&self, transaction: Transaction) -> Result<(), StoreError> {
        transaction.validate()?;
        if transaction.is_empty() {
            return Ok(());
        }
        let mutations: Vec<Json> = transaction.mutations().iter().map(|m| m.to_wire()).collect();
        debug!(size = mutations.len(), "committing transaction");
        let request = self
            .client
            .post(format!("{}/data/mutate/{}", self.base_url, self.dataset))
            .json(&json!({ "mutations": mutations }));
        let _: Json = self.send(request).await?;
        Ok(())
    }
}
