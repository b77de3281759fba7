// Typed description of a document store read.
//
// A query selects documents of one `_type` and narrows them with filters. The same value
// is evaluated directly by the in memory store and rendered to a query string with named
// parameters for the remote store.

use serde_json::{Map, Value as Json};

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Field at `path` equals `value`.
    Eq { path: String, value: Json },
    /// Field at `path` equals one of `values`.
    In { path: String, values: Vec<Json> },
    /// Document holds a reference to `id` anywhere in its body.
    References(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    doc_type: String,
    filters: Vec<Filter>,
}

impl Query {
    pub fn of_type(doc_type: impl Into<String>) -> Self {
        Self {
            doc_type: doc_type.into(),
            filters: Vec::new(),
        }
    }

    pub fn eq(mut self, path: impl Into<String>, value: impl Into<Json>) -> Self {
        self.filters.push(Filter::Eq {
            path: path.into(),
            value: value.into(),
        });
        self
    }

    pub fn any_of<V>(mut self, path: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self
    where
        V: Into<Json>,
    {
        self.filters.push(Filter::In {
            path: path.into(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn references(mut self, id: impl Into<String>) -> Self {
        self.filters.push(Filter::References(id.into()));
        self
    }

    pub fn doc_type(&self) -> &str {
        &self.doc_type
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn matches(&self, document: &Json) -> bool {
        if document.get("_type").and_then(Json::as_str) != Some(self.doc_type.as_str()) {
            return false;
        }
        self.filters.iter().all(|filter| match filter {
            Filter::Eq { path, value } => lookup(document, path) == Some(value),
            Filter::In { path, values } => {
                lookup(document, path).is_some_and(|found| values.contains(found))
            }
            Filter::References(id) => holds_reference(document, id),
        })
    }

    /// Render as a query string plus its named parameters.
    pub fn to_query_string(&self) -> (String, Map<String, Json>) {
        let mut params = Map::new();
        params.insert("type".to_string(), Json::String(self.doc_type.clone()));
        let mut clauses = vec!["_type == $type".to_string()];
        for (index, filter) in self.filters.iter().enumerate() {
            let name = format!("p{index}");
            match filter {
                Filter::Eq { path, value } => {
                    clauses.push(format!("{path} == ${name}"));
                    params.insert(name, value.clone());
                }
                Filter::In { path, values } => {
                    clauses.push(format!("{path} in ${name}"));
                    params.insert(name, Json::Array(values.clone()));
                }
                Filter::References(id) => {
                    clauses.push(format!("references(${name})"));
                    params.insert(name, Json::String(id.clone()));
                }
            }
        }
        (format!("*[{}]", clauses.join(" && ")), params)
    }
}

fn lookup<'a>(document: &'a Json, path: &str) -> Option<&'a Json> {
    path.split('.')
        .try_fold(document, |current, segment| current.get(segment))
}

fn holds_reference(value: &Json, id: &str) -> bool {
    match value {
        Json::Object(map) => {
            map.get("_ref").and_then(Json::as_str) == Some(id)
                || map.values().any(|nested| holds_reference(nested, id))
        }
        Json::Array(items) => items.iter().any(|nested| holds_reference(nested, id)),
        _ => false,
    }
}
