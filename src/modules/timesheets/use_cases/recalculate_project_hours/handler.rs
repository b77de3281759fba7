// Project hours rollups.
//
// A project carries three denormalised sums over every timesheet entry referencing it.
// They are derived from the entries alone, never from the previous rollup, so recomputing
// is idempotent and concurrent recomputations of one project may race with the last write
// winning.

use std::sync::Arc;

use serde::Serialize;
use serde_json::json;
use tokio::task::JoinSet;
use tracing::{error, info};

use crate::modules::timesheets::use_cases::recalculate_project_hours::queries_port::{
    HoursScope, ProjectHoursQueries,
};
use crate::shared::core::errors::ApplicationError;
use crate::shared::infrastructure::document_store::{DocumentStore, Patch, StoreError, Transaction};

#[derive(Debug, Clone, PartialEq, Serialize, async_graphql::SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct ProjectHours {
    pub project_id: String,
    pub total_hours: f64,
    pub approved_hours: f64,
    pub billable_hours: f64,
}

impl ProjectHours {
    fn patch(&self) -> Patch {
        Patch::new(self.project_id.clone())
            .set("totalHours", json!(self.total_hours))
            .set("approvedHours", json!(self.approved_hours))
            .set("billableHours", json!(self.billable_hours))
    }
}

pub struct ProjectHoursAggregator<TQueries, TStore>
where
    TQueries: ProjectHoursQueries + ?Sized + 'static,
    TStore: DocumentStore + ?Sized + 'static,
{
    queries: Arc<TQueries>,
    store: Arc<TStore>,
}

impl<TQueries, TStore> ProjectHoursAggregator<TQueries, TStore>
where
    TQueries: ProjectHoursQueries + ?Sized + 'static,
    TStore: DocumentStore + ?Sized + 'static,
{
    pub fn new(queries: Arc<TQueries>, store: Arc<TStore>) -> Self {
        Self { queries, store }
    }

    pub async fn recalculate(&self, project_id: &str) -> Result<ProjectHours, ApplicationError> {
        recalculate_project(&*self.queries, &*self.store, project_id).await
    }

    /// Recalculate each distinct project concurrently.
    ///
    /// Every recalculation runs to completion; the first failure is reported afterwards.
    /// Results are ordered by project id.
    pub async fn recalculate_many<I>(&self, project_ids: I) -> Result<Vec<ProjectHours>, ApplicationError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut distinct: Vec<String> = Vec::new();
        for id in project_ids {
            if !distinct.contains(&id) {
                distinct.push(id);
            }
        }

        let mut tasks = JoinSet::new();
        for project_id in distinct {
            let queries = Arc::clone(&self.queries);
            let store = Arc::clone(&self.store);
            tasks.spawn(async move { recalculate_project(&*queries, &*store, &project_id).await });
        }

        let mut results = Vec::new();
        let mut first_error = None;
        while let Some(joined) = tasks.join_next().await {
            let outcome = joined
                .map_err(|e| ApplicationError::Query(anyhow::anyhow!("recalculation task failed: {e}")))
                .and_then(|result| result);
            match outcome {
                Ok(hours) => results.push(hours),
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }
        if let Some(e) = first_error {
            return Err(e);
        }
        results.sort_by(|a, b| a.project_id.cmp(&b.project_id));
        Ok(results)
    }

    /// Recalculate after a write that already succeeded; failures are logged only.
    pub async fn refresh<I>(&self, project_ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        if let Err(e) = self.recalculate_many(project_ids).await {
            error!("project hours recalculation failed: {e}");
        }
    }
}

async fn recalculate_project<TQueries, TStore>(
    queries: &TQueries,
    store: &TStore,
    project_id: &str,
) -> Result<ProjectHours, ApplicationError>
where
    TQueries: ProjectHoursQueries + ?Sized,
    TStore: DocumentStore + ?Sized,
{
    let (total, approved, billable) = tokio::try_join!(
        queries.sum_hours(project_id, HoursScope::All),
        queries.sum_hours(project_id, HoursScope::Approved),
        queries.sum_hours(project_id, HoursScope::Billable),
    )?;
    let hours = ProjectHours {
        project_id: project_id.to_string(),
        total_hours: total.unwrap_or(0.0),
        approved_hours: approved.unwrap_or(0.0),
        billable_hours: billable.unwrap_or(0.0),
    };
    store
        .commit(Transaction::new().patch(hours.patch()))
        .await
        .map_err(|e| match e {
            StoreError::NotFound(id) => ApplicationError::NotFound(format!("project {id}")),
            other => other.into(),
        })?;
    info!(
        project_id,
        total = hours.total_hours,
        approved = hours.approved_hours,
        billable = hours.billable_hours,
        "project hours recalculated"
    );
    Ok(hours)
}
