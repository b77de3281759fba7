use async_graphql::{Context, Object, Result as GqlResult};

use crate::shared::inbound::graphql::{session, to_gql_error};
use crate::shell::state::AppState;

#[derive(Default)]
pub struct PendingApprovalsQuery;

#[Object]
impl PendingApprovalsQuery {
    /// Team members with unsubmitted or unapproved weeks.
    async fn pending_members(&self, context: &Context<'_>, member_ids: Vec<String>) -> GqlResult<Vec<String>> {
        let state = context.data_unchecked::<AppState>();
        let session = session(context)?;
        state
            .pending
            .compute_pending_or_unsubmitted(session, member_ids)
            .await
            .map_err(to_gql_error)
    }
}
