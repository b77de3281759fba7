use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::modules::organisation::adapters::outbound::organisation_documents::OrganisationDocuments;
use crate::modules::organisation::core::documents::Task;
use crate::shared::auth::capability::{Capability, authorize};
use crate::shared::auth::session::Session;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::reference::Reference;
use crate::shared::infrastructure::document_store::batch::{BulkOutcome, commit_in_batches};
use crate::shared::infrastructure::document_store::{DocumentStore, Mutation, Patch, get_as};

pub struct AddTaskToAllProjectsHandler<TStore>
where
    TStore: DocumentStore + ?Sized + 'static,
{
    store: Arc<TStore>,
}

impl<TStore> AddTaskToAllProjectsHandler<TStore>
where
    TStore: DocumentStore + ?Sized + 'static,
{
    pub fn new(store: Arc<TStore>) -> Self {
        Self { store }
    }

    /// Append the task to every active project that does not carry it yet.
    pub async fn handle(&self, session: &Session, task_id: &str) -> Result<BulkOutcome, ApplicationError> {
        authorize(session, Capability::ManageOrganisation).into_result()?;
        if get_as::<Task, _>(&*self.store, task_id).await?.is_none() {
            return Err(ApplicationError::NotFound(format!("task {task_id}")));
        }
        let mutations: Vec<Mutation> = self
            .store
            .active_projects()
            .await?
            .into_iter()
            .filter(|project| !project.has_task(task_id))
            .map(|project| {
                let reference = Reference::keyed(task_id, Uuid::now_v7().to_string());
                Mutation::Patch(Patch::new(project.id).append("tasks", vec![json!(reference)]))
            })
            .collect();

        let outcome = commit_in_batches(&*self.store, mutations).await?;
        match &outcome {
            BulkOutcome::PartiallyCommitted { committed, failed_batch, .. } => {
                warn!(task_id, committed, failed_batch, "task only partly added to projects")
            }
            _ => info!(task_id, projects = outcome.committed_count(), "task added to projects"),
        }
        Ok(outcome)
    }
}
