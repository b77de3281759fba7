use async_trait::async_trait;

use crate::modules::organisation::core::documents::{
    CLIENT_TYPE, Client, Named, PROJECT_TYPE, Project, TASK_TYPE, Task, USER_TYPE, User,
};
use crate::shared::infrastructure::document_store::{DocumentStore, Query, StoreError, fetch_as};

/// Typed reads of the reference data documents.
#[async_trait]
pub trait OrganisationDocuments: Send + Sync {
    async fn clients(&self) -> Result<Vec<Client>, StoreError>;
    async fn projects(&self) -> Result<Vec<Project>, StoreError>;
    async fn active_projects(&self) -> Result<Vec<Project>, StoreError>;
    async fn tasks(&self) -> Result<Vec<Task>, StoreError>;
    async fn active_users(&self) -> Result<Vec<User>, StoreError>;
}

#[async_trait]
impl<S> OrganisationDocuments for S
where
    S: DocumentStore + ?Sized,
{
    async fn clients(&self) -> Result<Vec<Client>, StoreError> {
        Ok(sorted_by_name(fetch_as(self, &Query::of_type(CLIENT_TYPE)).await?))
    }

    async fn projects(&self) -> Result<Vec<Project>, StoreError> {
        Ok(sorted_by_name(fetch_as(self, &Query::of_type(PROJECT_TYPE)).await?))
    }

    async fn active_projects(&self) -> Result<Vec<Project>, StoreError> {
        let query = Query::of_type(PROJECT_TYPE).eq("isActive", true);
        Ok(sorted_by_name(fetch_as(self, &query).await?))
    }

    async fn tasks(&self) -> Result<Vec<Task>, StoreError> {
        Ok(sorted_by_name(fetch_as(self, &Query::of_type(TASK_TYPE)).await?))
    }

    async fn active_users(&self) -> Result<Vec<User>, StoreError> {
        fetch_as(self, &Query::of_type(USER_TYPE).eq("isActive", true)).await
    }
}

fn sorted_by_name<T: Named>(mut documents: Vec<T>) -> Vec<T> {
    documents.sort_by_key(|document| document.name().to_lowercase());
    documents
}
