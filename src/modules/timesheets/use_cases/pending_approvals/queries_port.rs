use async_trait::async_trait;

use crate::modules::timesheets::core::status::TimesheetStatus;

/// One entry date of a member's timesheet; `date` is kept raw and may be unparseable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDateRow {
    pub user_id: String,
    pub date: Option<String>,
}

#[async_trait]
pub trait PendingApprovalQueries: Send + Sync {
    /// Entry dates of the members' timesheets whose status is one of `statuses`.
    async fn entry_dates(
        &self,
        member_ids: &[String],
        statuses: &[TimesheetStatus],
    ) -> anyhow::Result<Vec<EntryDateRow>>;
}
