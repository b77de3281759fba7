use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use crate::modules::reminders::adapters::outbound::reminder_queries::ReminderQueries;
use crate::modules::reminders::core::reminder::{Reminder, ReminderKind, ReminderReport, dispatch};
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::week::week_start;
use crate::shared::infrastructure::intent_outbox::IntentOutbox;

pub struct NoHoursReminders<TQueries, TOutbox>
where
    TQueries: ReminderQueries + ?Sized + 'static,
    TOutbox: IntentOutbox + ?Sized + 'static,
{
    queries: Arc<TQueries>,
    outbox: Arc<TOutbox>,
}

impl<TQueries, TOutbox> NoHoursReminders<TQueries, TOutbox>
where
    TQueries: ReminderQueries + ?Sized + 'static,
    TOutbox: IntentOutbox + ?Sized + 'static,
{
    pub fn new(queries: Arc<TQueries>, outbox: Arc<TOutbox>) -> Self {
        Self { queries, outbox }
    }

    /// Remind every active user who logged nothing during the week before `now`.
    pub async fn run(&self, now: DateTime<Utc>) -> Result<ReminderReport, ApplicationError> {
        let previous_week = week_start(now.date_naive()) - Duration::days(7);
        let (users, timesheets) = tokio::try_join!(
            self.queries.active_user_ids(),
            self.queries.timesheets_of_week(previous_week),
        )?;
        let logged: HashSet<String> = timesheets
            .into_iter()
            .filter(|timesheet| timesheet.total_hours > 0.0)
            .map(|timesheet| timesheet.user.id)
            .collect();
        let reminders: Vec<Reminder> = users
            .into_iter()
            .filter(|user_id| !logged.contains(user_id))
            .map(|recipient_id| Reminder {
                kind: ReminderKind::NoHours,
                recipient_id,
                week_start: previous_week,
                weeks: Vec::new(),
            })
            .collect();
        info!(week = %previous_week, recipients = reminders.len(), "no-hours reminders prepared");
        Ok(dispatch(&*self.outbox, reminders, now).await)
    }
}
