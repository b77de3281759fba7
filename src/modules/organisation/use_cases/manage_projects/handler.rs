use std::sync::Arc;

use tracing::info;

use crate::modules::organisation::adapters::outbound::organisation_documents::OrganisationDocuments;
use crate::modules::organisation::core::documents::{Client, PROJECT_TYPE, Project, required_name};
use crate::modules::organisation::use_cases::manage_projects::command::CreateProject;
use crate::shared::auth::capability::{Capability, authorize};
use crate::shared::auth::session::Session;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::reference::Reference;
use crate::shared::infrastructure::document_store::{DocumentStore, Transaction, encode, get_as};

pub struct ManageProjectsHandler<TStore>
where
    TStore: DocumentStore + ?Sized + 'static,
{
    store: Arc<TStore>,
}

impl<TStore> ManageProjectsHandler<TStore>
where
    TStore: DocumentStore + ?Sized + 'static,
{
    pub fn new(store: Arc<TStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Project>, ApplicationError> {
        Ok(self.store.projects().await?)
    }

    /// New projects start active, without tasks and with zeroed rollups.
    pub async fn create(&self, session: &Session, command: CreateProject) -> Result<Project, ApplicationError> {
        authorize(session, Capability::ManageOrganisation).into_result()?;
        let name = required_name(&command.name)
            .ok_or_else(|| ApplicationError::Validation("project name is required".into()))?;
        let client_id = command.client_id.trim();
        if client_id.is_empty() {
            return Err(ApplicationError::Validation("project client is required".into()));
        }
        if get_as::<Client, _>(&*self.store, client_id).await?.is_none() {
            return Err(ApplicationError::NotFound(format!("client {client_id}")));
        }
        let project = Project {
            id: command.project_id,
            kind: PROJECT_TYPE.to_string(),
            name,
            client: Reference::to(client_id),
            is_active: true,
            tasks: Vec::new(),
            total_hours: 0.0,
            approved_hours: 0.0,
            billable_hours: 0.0,
            created_at: Some(command.now),
        };
        self.store
            .commit(Transaction::new().create(encode(&project)?))
            .await?;
        info!(project_id = %project.id, client_id, "project created");
        Ok(project)
    }
}

#[cfg(test)]
mod manage_projects_handler_tests {
    use super::*;
    use crate::shared::auth::session::Role;
    use crate::shared::infrastructure::document_store::in_memory::InMemoryDocumentStore;
    use crate::tests::fixtures::documents::seed_documents;
    use crate::tests::fixtures::timesheets::fixed_now;
    use rstest::rstest;
    use serde_json::json;

    async fn make_handler() -> ManageProjectsHandler<InMemoryDocumentStore> {
        let store = InMemoryDocumentStore::new();
        seed_documents(
            &store,
            vec![json!({ "_id": "client-1", "_type": "client", "name": "Acme" })],
        )
        .await;
        ManageProjectsHandler::new(Arc::new(store))
    }

    fn create(name: &str, client_id: &str) -> CreateProject {
        CreateProject {
            project_id: "project-1".to_string(),
            name: name.to_string(),
            client_id: client_id.to_string(),
            now: fixed_now(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_create_a_project_with_zeroed_rollups() {
        let handler = make_handler().await;
        let project = handler
            .create(&Session::new("admin-1", Role::Admin), create("Website", "client-1"))
            .await
            .unwrap();
        assert_eq!(project.client.id, "client-1");
        assert_eq!(
            (project.total_hours, project.approved_hours, project.billable_hours),
            (0.0, 0.0, 0.0)
        );
        assert_eq!(handler.list().await.unwrap(), vec![project]);
    }

    #[rstest]
    #[case("", "client-1")]
    #[case("Website", " ")]
    #[tokio::test]
    async fn it_should_require_a_name_and_a_client(#[case] name: &str, #[case] client_id: &str) {
        let handler = make_handler().await;
        let result = handler
            .create(&Session::new("admin-1", Role::Admin), create(name, client_id))
            .await;
        assert!(matches!(result, Err(ApplicationError::Validation(_))));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_refuse_an_unknown_client() {
        let handler = make_handler().await;
        let result = handler
            .create(&Session::new("admin-1", Role::Admin), create("Website", "client-9"))
            .await;
        assert!(matches!(result, Err(ApplicationError::NotFound(_))));
    }
}
