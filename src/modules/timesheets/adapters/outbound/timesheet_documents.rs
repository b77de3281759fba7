use async_trait::async_trait;

use crate::modules::timesheets::core::timesheet::{TIMESHEET_TYPE, Timesheet};
use crate::shared::infrastructure::document_store::{
    DocumentStore, Query, StoreError, fetch_as, get_as,
};

/// Typed timesheet reads shared by the timesheet use cases.
#[async_trait]
pub trait TimesheetDocuments: Send + Sync {
    async fn load_timesheet(&self, id: &str) -> Result<Option<Timesheet>, StoreError>;

    /// The timesheet holding the user's running timer, if any.
    async fn running_timesheet(&self, user_id: &str) -> Result<Option<Timesheet>, StoreError>;

    async fn timesheets_by_ids(&self, ids: &[String]) -> Result<Vec<Timesheet>, StoreError>;
}

#[async_trait]
impl<S> TimesheetDocuments for S
where
    S: DocumentStore + ?Sized,
{
    async fn load_timesheet(&self, id: &str) -> Result<Option<Timesheet>, StoreError> {
        get_as(self, id).await
    }

    async fn running_timesheet(&self, user_id: &str) -> Result<Option<Timesheet>, StoreError> {
        let query = Query::of_type(TIMESHEET_TYPE)
            .eq("user._ref", user_id)
            .eq("hasRunningTimer", true);
        Ok(fetch_as::<Timesheet, _>(self, &query).await?.into_iter().next())
    }

    async fn timesheets_by_ids(&self, ids: &[String]) -> Result<Vec<Timesheet>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = Query::of_type(TIMESHEET_TYPE).any_of("_id", ids.iter().cloned());
        fetch_as(self, &query).await
    }
}

#[cfg(test)]
mod timesheet_documents_tests {
    use super::*;
    use crate::modules::timesheets::core::status::TimesheetStatus;
    use crate::shared::infrastructure::document_store::in_memory::InMemoryDocumentStore;
    use crate::tests::fixtures::documents::seed_timesheets;
    use crate::tests::fixtures::timesheets::{EntryBuilder, TimesheetBuilder};
    use chrono::NaiveDate;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn it_should_find_the_timesheet_with_the_running_timer() {
        let store = InMemoryDocumentStore::new();
        let idle = TimesheetBuilder::new("user-1")
            .entry(EntryBuilder::new("a").build())
            .build();
        let running = TimesheetBuilder::new("user-1")
            .week_of(NaiveDate::from_ymd_opt(2024, 6, 17).unwrap())
            .entry(EntryBuilder::new("b").running().build())
            .build();
        let other_user = TimesheetBuilder::new("user-2")
            .entry(EntryBuilder::new("c").running().build())
            .build();
        seed_timesheets(&store, &[idle, running.clone(), other_user]).await;

        let found = store.running_timesheet("user-1").await.unwrap();
        assert_eq!(found.map(|t| t.id), Some(running.id));
        assert!(store.running_timesheet("user-3").await.unwrap().is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_load_only_the_requested_timesheets() {
        let store = InMemoryDocumentStore::new();
        let a = TimesheetBuilder::new("user-1").build();
        let b = TimesheetBuilder::new("user-2")
            .status(TimesheetStatus::Submitted)
            .build();
        seed_timesheets(&store, &[a.clone(), b]).await;

        let found = store.timesheets_by_ids(&[a.id.clone()]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, a.id);
        assert!(store.timesheets_by_ids(&[]).await.unwrap().is_empty());
        let loaded = store.load_timesheet(&a.id).await.unwrap().unwrap();
        assert!(loaded.revision.is_some());
        assert_eq!(Timesheet { revision: None, ..loaded }, a);
    }
}
