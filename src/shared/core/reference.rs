use serde::{Deserialize, Serialize};

const REFERENCE_TYPE: &str = "reference";

fn reference_type() -> String {
    REFERENCE_TYPE.to_string()
}

/// A pointer from one document to another, as stored by the document store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "_ref")]
    pub id: String,
    #[serde(rename = "_type", default = "reference_type")]
    pub kind: String,
    /// Present when the reference lives inside an array.
    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl Reference {
    pub fn to(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: reference_type(),
            key: None,
        }
    }

    pub fn keyed(id: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::to(id)
        }
    }
}
