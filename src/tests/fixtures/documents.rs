use serde_json::{Value as Json, json};

use crate::modules::timesheets::core::timesheet::Timesheet;
use crate::shared::infrastructure::document_store::in_memory::InMemoryDocumentStore;

pub fn project_document(id: &str, client_id: &str) -> Json {
    json!({
        "_id": id,
        "_type": "project",
        "name": format!("Project {id}"),
        "client": { "_ref": client_id, "_type": "reference" },
        "isActive": true,
        "tasks": [],
        "totalHours": 0.0,
        "approvedHours": 0.0,
        "billableHours": 0.0
    })
}

pub fn user_document(id: &str, is_active: bool) -> Json {
    json!({
        "_id": id,
        "_type": "user",
        "name": format!("User {id}"),
        "email": format!("{id}@example.com"),
        "role": "user",
        "isActive": is_active
    })
}

pub async fn seed_timesheets(store: &InMemoryDocumentStore, timesheets: &[Timesheet]) {
    for timesheet in timesheets {
        store
            .insert(serde_json::to_value(timesheet).unwrap())
            .await
            .unwrap();
    }
}

pub async fn seed_documents(store: &InMemoryDocumentStore, documents: Vec<Json>) {
    for document in documents {
        store.insert(document).await.unwrap();
    }
}
