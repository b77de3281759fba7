use std::sync::Arc;

use tracing::info;

use crate::modules::timesheets::core::status::TimesheetStatus;
use crate::modules::timesheets::use_cases::pending_approvals::queries_port::PendingApprovalQueries;
use crate::modules::timesheets::use_cases::pending_approvals::reconcile::reconcile;
use crate::shared::auth::capability::{Capability, authorize};
use crate::shared::auth::session::Session;
use crate::shared::core::errors::ApplicationError;

pub struct PendingApprovalsHandler<TQueries>
where
    TQueries: PendingApprovalQueries + ?Sized + 'static,
{
    queries: Arc<TQueries>,
}

impl<TQueries> PendingApprovalsHandler<TQueries>
where
    TQueries: PendingApprovalQueries + ?Sized + 'static,
{
    pub fn new(queries: Arc<TQueries>) -> Self {
        Self { queries }
    }

    /// Members that still have unsubmitted or unapproved work in some week.
    ///
    /// Rejected weeks went back to their owner and count as pending.
    pub async fn compute_pending_or_unsubmitted(
        &self,
        session: &Session,
        member_ids: Vec<String>,
    ) -> Result<Vec<String>, ApplicationError> {
        authorize(session, Capability::ViewTeam).into_result()?;
        if member_ids.is_empty() {
            return Ok(Vec::new());
        }
        let (pending, approved) = tokio::try_join!(
            self.queries.entry_dates(
                &member_ids,
                &[
                    TimesheetStatus::Unsubmitted,
                    TimesheetStatus::Submitted,
                    TimesheetStatus::Rejected,
                ]
            ),
            self.queries.entry_dates(&member_ids, &[TimesheetStatus::Approved]),
        )?;
        let members = reconcile(&pending, &approved);
        info!(
            requested = member_ids.len(),
            pending = members.len(),
            "pending approvals computed"
        );
        Ok(members)
    }
}
