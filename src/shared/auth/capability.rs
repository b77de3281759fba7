// Single place deciding what a session may do.
//
// Routes describe the action as a Capability and ask `authorize`; none of them branch on
// roles themselves.

use crate::shared::auth::session::{Role, Session};
use crate::shared::core::errors::ApplicationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability {
    ApproveTimesheets,
    ViewTeam,
    ManageOrganisation,
    ManageTasks,
    RecalculateProjects,
    EditTimesheet { owner: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
    Authorized,
    Unauthorized(String),
}

impl Authorization {
    pub fn into_result(self) -> Result<(), ApplicationError> {
        match self {
            Authorization::Authorized => Ok(()),
            Authorization::Unauthorized(reason) => Err(ApplicationError::Forbidden(reason)),
        }
    }
}

pub fn authorize(session: &Session, capability: Capability) -> Authorization {
    let allowed = match &capability {
        Capability::ApproveTimesheets
        | Capability::ViewTeam
        | Capability::ManageTasks
        | Capability::RecalculateProjects => session.role.is_approver(),
        Capability::ManageOrganisation => session.role == Role::Admin,
        Capability::EditTimesheet { owner } => {
            *owner == session.user_id || session.role.is_approver()
        }
    };
    if allowed {
        Authorization::Authorized
    } else {
        Authorization::Unauthorized(format!(
            "role {} may not {}",
            session.role,
            describe(&capability)
        ))
    }
}

fn describe(capability: &Capability) -> &'static str {
    match capability {
        Capability::ApproveTimesheets => "approve or reject timesheets",
        Capability::ViewTeam => "view team approvals",
        Capability::ManageOrganisation => "manage clients and projects",
        Capability::ManageTasks => "manage tasks",
        Capability::RecalculateProjects => "recalculate project hours",
        Capability::EditTimesheet { .. } => "edit another user's timesheet",
    }
}
