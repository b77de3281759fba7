// Mutations and transactions accepted by the document store.
//
// A transaction is applied atomically by the store. The store refuses transactions holding
// more than MAX_MUTATIONS_PER_TRANSACTION mutations; larger workloads go through
// `batch::commit_in_batches`.

use serde_json::{Map, Value as Json, json};

use super::StoreError;

pub const MAX_MUTATIONS_PER_TRANSACTION: usize = 200;

/// Field level changes to one existing document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Patch {
    pub id: String,
    pub set: Map<String, Json>,
    pub unset: Vec<String>,
    pub append: Option<(String, Vec<Json>)>,
    /// Revision the document must still carry for the patch to apply.
    pub if_revision: Option<String>,
}

impl Patch {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn set(mut self, field: impl Into<String>, value: impl Into<Json>) -> Self {
        self.set.insert(field.into(), value.into());
        self
    }

    pub fn unset(mut self, field: impl Into<String>) -> Self {
        self.unset.push(field.into());
        self
    }

    /// Refuse the patch when the document changed since `revision` was read.
    pub fn if_revision(mut self, revision: impl Into<String>) -> Self {
        self.if_revision = Some(revision.into());
        self
    }

    /// Append `items` to the array at `field`, creating the array when missing.
    pub fn append(mut self, field: impl Into<String>, items: Vec<Json>) -> Self {
        self.append = Some((field.into(), items));
        self
    }

    fn to_wire(&self) -> Json {
        let mut body = Map::new();
        body.insert("id".to_string(), Json::String(self.id.clone()));
        if let Some(revision) = &self.if_revision {
            body.insert("ifRevisionID".to_string(), Json::String(revision.clone()));
        }
        if !self.set.is_empty() {
            body.insert("set".to_string(), Json::Object(self.set.clone()));
        }
        if !self.unset.is_empty() {
            body.insert("unset".to_string(), json!(self.unset));
        }
        if let Some((field, items)) = &self.append {
            let mut missing = Map::new();
            missing.insert(field.clone(), json!([]));
            body.insert("setIfMissing".to_string(), Json::Object(missing));
            body.insert(
                "insert".to_string(),
                json!({ "after": format!("{field}[-1]"), "items": items }),
            );
        }
        json!({ "patch": body })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Create(Json),
    CreateIfNotExists(Json),
    Delete(String),
    Patch(Patch),
}

impl Mutation {
    /// Shape expected by the store's mutate endpoint.
    pub fn to_wire(&self) -> Json {
        match self {
            Mutation::Create(document) => json!({ "create": document }),
            Mutation::CreateIfNotExists(document) => json!({ "createIfNotExists": document }),
            Mutation::Delete(id) => json!({ "delete": { "id": id } }),
            Mutation::Patch(patch) => patch.to_wire(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transaction {
    mutations: Vec<Mutation>,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(mut self, document: Json) -> Self {
        self.mutations.push(Mutation::Create(document));
        self
    }

    pub fn create_if_not_exists(mut self, document: Json) -> Self {
        self.mutations.push(Mutation::CreateIfNotExists(document));
        self
    }

    pub fn delete(mut self, id: impl Into<String>) -> Self {
        self.mutations.push(Mutation::Delete(id.into()));
        self
    }

    pub fn patch(mut self, patch: Patch) -> Self {
        self.mutations.push(Mutation::Patch(patch));
        self
    }

    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    pub fn into_mutations(self) -> Vec<Mutation> {
        self.mutations
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if self.mutations.len() > MAX_MUTATIONS_PER_TRANSACTION {
            return Err(StoreError::TransactionTooLarge {
                actual: self.mutations.len(),
                limit: MAX_MUTATIONS_PER_TRANSACTION,
            });
        }
        Ok(())
    }
}

impl From<Vec<Mutation>> for Transaction {
    fn from(mutations: Vec<Mutation>) -> Self {
        Self { mutations }
    }
}
