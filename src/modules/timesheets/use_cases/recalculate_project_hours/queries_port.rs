use async_trait::async_trait;

/// Which entries of a project an aggregate covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoursScope {
    All,
    /// Entries of approved timesheets only.
    Approved,
    Billable,
}

#[async_trait]
pub trait ProjectHoursQueries: Send + Sync {
    /// Sum of entry hours for the project, `None` when no entry matched.
    async fn sum_hours(&self, project_id: &str, scope: HoursScope) -> anyhow::Result<Option<f64>>;
}
