use std::sync::Arc;

use crate::modules::organisation::use_cases::add_task_to_all_projects::handler::AddTaskToAllProjectsHandler;
use crate::modules::organisation::use_cases::manage_clients::handler::ManageClientsHandler;
use crate::modules::organisation::use_cases::manage_projects::handler::ManageProjectsHandler;
use crate::modules::organisation::use_cases::manage_tasks::handler::ManageTasksHandler;
use crate::modules::reminders::use_cases::send_no_hours_reminders::handler::NoHoursReminders;
use crate::modules::reminders::use_cases::send_past_due_reminders::handler::PastDueReminders;
use crate::modules::timesheets::use_cases::approve_timesheets::handler::ApproveTimesheetsHandler;
use crate::modules::timesheets::use_cases::pending_approvals::handler::PendingApprovalsHandler;
use crate::modules::timesheets::use_cases::recalculate_project_hours::handler::ProjectHoursAggregator;
use crate::modules::timesheets::use_cases::reject_timesheet::handler::RejectTimesheetHandler;
use crate::modules::timesheets::use_cases::submit_timesheet::handler::SubmitTimesheetHandler;
use crate::modules::timesheets::use_cases::track_time::handler::TrackTimeHandler;
use crate::shared::inbound::cron_guard::CronSettings;
use crate::shared::infrastructure::document_store::DocumentStore;
use crate::shared::infrastructure::intent_outbox::IntentOutbox;

type Store = dyn DocumentStore;
type Outbox = dyn IntentOutbox;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub aggregator: Arc<ProjectHoursAggregator<Store, Store>>,
    pub track_time: Arc<TrackTimeHandler<Store, Store>>,
    pub submit: Arc<SubmitTimesheetHandler<Store>>,
    pub reject: Arc<RejectTimesheetHandler<Store>>,
    pub approve: Arc<ApproveTimesheetsHandler<Store, Store>>,
    pub pending: Arc<PendingApprovalsHandler<Store>>,
    pub clients: Arc<ManageClientsHandler<Store>>,
    pub projects: Arc<ManageProjectsHandler<Store>>,
    pub tasks: Arc<ManageTasksHandler<Store>>,
    pub add_task: Arc<AddTaskToAllProjectsHandler<Store>>,
    pub no_hours_reminders: Arc<NoHoursReminders<Store, Outbox>>,
    pub past_due_reminders: Arc<PastDueReminders<Store, Outbox>>,
    pub cron: CronSettings,
}

impl AppState {
    /// Wire every handler onto one document store and one outbox.
    pub fn new(store: Arc<Store>, outbox: Arc<Outbox>, cron: CronSettings) -> Self {
        let aggregator = Arc::new(ProjectHoursAggregator::new(store.clone(), store.clone()));
        Self {
            track_time: Arc::new(TrackTimeHandler::new(store.clone(), aggregator.clone())),
            submit: Arc::new(SubmitTimesheetHandler::new(store.clone())),
            reject: Arc::new(RejectTimesheetHandler::new(store.clone())),
            approve: Arc::new(ApproveTimesheetsHandler::new(store.clone(), aggregator.clone())),
            pending: Arc::new(PendingApprovalsHandler::new(store.clone())),
            clients: Arc::new(ManageClientsHandler::new(store.clone())),
            projects: Arc::new(ManageProjectsHandler::new(store.clone())),
            tasks: Arc::new(ManageTasksHandler::new(store.clone())),
            add_task: Arc::new(AddTaskToAllProjectsHandler::new(store.clone())),
            no_hours_reminders: Arc::new(NoHoursReminders::new(store.clone(), outbox.clone())),
            past_due_reminders: Arc::new(PastDueReminders::new(store.clone(), outbox)),
            aggregator,
            store,
            cron,
        }
    }
}
