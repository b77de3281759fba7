use std::sync::Arc;

use tracing::{info, warn};

use crate::modules::organisation::adapters::outbound::organisation_documents::OrganisationDocuments;
use crate::modules::organisation::core::documents::{CLIENT_TYPE, Client, required_name, same_name};
use crate::modules::organisation::use_cases::manage_clients::command::CreateClient;
use crate::shared::auth::capability::{Capability, authorize};
use crate::shared::auth::session::Session;
use crate::shared::core::errors::ApplicationError;
use crate::shared::infrastructure::document_store::{DocumentStore, Transaction, encode};

pub struct ManageClientsHandler<TStore>
where
    TStore: DocumentStore + ?Sized + 'static,
{
    store: Arc<TStore>,
}

impl<TStore> ManageClientsHandler<TStore>
where
    TStore: DocumentStore + ?Sized + 'static,
{
    pub fn new(store: Arc<TStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Client>, ApplicationError> {
        Ok(self.store.clients().await?)
    }

    pub async fn create(&self, session: &Session, command: CreateClient) -> Result<Client, ApplicationError> {
        authorize(session, Capability::ManageOrganisation).into_result()?;
        let name = required_name(&command.name)
            .ok_or_else(|| ApplicationError::Validation("client name is required".into()))?;
        if self.store.clients().await?.iter().any(|client| same_name(&client.name, &name)) {
            warn!(name = %name, "client name already taken");
            return Err(ApplicationError::Conflict(format!("client {name} already exists")));
        }
        let client = Client {
            id: command.client_id,
            kind: CLIENT_TYPE.to_string(),
            name,
            is_active: true,
            created_at: Some(command.now),
        };
        self.store
            .commit(Transaction::new().create(encode(&client)?))
            .await?;
        info!(client_id = %client.id, "client created");
        Ok(client)
    }
}

#[cfg(test)]
mod manage_clients_handler_tests {
    use super::*;
    use crate::shared::auth::session::Role;
    use crate::shared::infrastructure::document_store::in_memory::InMemoryDocumentStore;
    use crate::tests::fixtures::timesheets::fixed_now;
    use rstest::{fixture, rstest};

    #[fixture]
    fn handler() -> ManageClientsHandler<InMemoryDocumentStore> {
        ManageClientsHandler::new(Arc::new(InMemoryDocumentStore::new()))
    }

    fn create(id: &str, name: &str) -> CreateClient {
        CreateClient {
            client_id: id.to_string(),
            name: name.to_string(),
            now: fixed_now(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_create_and_list_clients(handler: ManageClientsHandler<InMemoryDocumentStore>) {
        let admin = Session::new("admin-1", Role::Admin);
        let created = handler.create(&admin, create("client-1", "  Acme ")).await.unwrap();
        assert_eq!(created.name, "Acme");
        let listed = handler.list().await.unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_refuse_duplicate_names_ignoring_case(handler: ManageClientsHandler<InMemoryDocumentStore>) {
        let admin = Session::new("admin-1", Role::Admin);
        handler.create(&admin, create("client-1", "Acme")).await.unwrap();
        let result = handler.create(&admin, create("client-2", "ACME")).await;
        assert!(matches!(result, Err(ApplicationError::Conflict(_))));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_require_a_name(handler: ManageClientsHandler<InMemoryDocumentStore>) {
        let admin = Session::new("admin-1", Role::Admin);
        let result = handler.create(&admin, create("client-1", " ")).await;
        assert!(matches!(result, Err(ApplicationError::Validation(_))));
    }

    #[rstest]
    #[case(Role::Manager)]
    #[case(Role::User)]
    #[tokio::test]
    async fn it_should_only_let_admins_create_clients(
        handler: ManageClientsHandler<InMemoryDocumentStore>,
        #[case] role: Role,
    ) {
        let result = handler
            .create(&Session::new("someone", role), create("client-1", "Acme"))
            .await;
        assert!(matches!(result, Err(ApplicationError::Forbidden(_))));
    }
}
