use std::sync::Arc;

use tracing::{info, warn};

use crate::modules::organisation::adapters::outbound::organisation_documents::OrganisationDocuments;
use crate::modules::organisation::core::documents::{TASK_TYPE, Task, required_name, same_name};
use crate::modules::organisation::use_cases::manage_tasks::command::CreateTask;
use crate::shared::auth::capability::{Capability, authorize};
use crate::shared::auth::session::Session;
use crate::shared::core::errors::ApplicationError;
use crate::shared::infrastructure::document_store::{DocumentStore, Transaction, encode};

pub struct ManageTasksHandler<TStore>
where
    TStore: DocumentStore + ?Sized + 'static,
{
    store: Arc<TStore>,
}

impl<TStore> ManageTasksHandler<TStore>
where
    TStore: DocumentStore + ?Sized + 'static,
{
    pub fn new(store: Arc<TStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Task>, ApplicationError> {
        Ok(self.store.tasks().await?)
    }

    pub async fn create(&self, session: &Session, command: CreateTask) -> Result<Task, ApplicationError> {
        authorize(session, Capability::ManageTasks).into_result()?;
        let name = required_name(&command.name)
            .ok_or_else(|| ApplicationError::Validation("task name is required".into()))?;
        if self.store.tasks().await?.iter().any(|task| same_name(&task.name, &name)) {
            warn!(name = %name, "task name already taken");
            return Err(ApplicationError::Conflict(format!("task {name} already exists")));
        }
        let task = Task {
            id: command.task_id,
            kind: TASK_TYPE.to_string(),
            name,
            is_billable: command.is_billable,
            is_active: true,
            created_at: Some(command.now),
        };
        self.store.commit(Transaction::new().create(encode(&task)?)).await?;
        info!(task_id = %task.id, "task created");
        Ok(task)
    }
}
