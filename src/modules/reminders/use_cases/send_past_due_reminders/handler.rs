use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::modules::reminders::adapters::outbound::reminder_queries::ReminderQueries;
use crate::modules::reminders::core::reminder::{Reminder, ReminderKind, ReminderReport, dispatch};
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::week::week_start;
use crate::shared::infrastructure::intent_outbox::IntentOutbox;

pub struct PastDueReminders<TQueries, TOutbox>
where
    TQueries: ReminderQueries + ?Sized + 'static,
    TOutbox: IntentOutbox + ?Sized + 'static,
{
    queries: Arc<TQueries>,
    outbox: Arc<TOutbox>,
}

impl<TQueries, TOutbox> PastDueReminders<TQueries, TOutbox>
where
    TQueries: ReminderQueries + ?Sized + 'static,
    TOutbox: IntentOutbox + ?Sized + 'static,
{
    pub fn new(queries: Arc<TQueries>, outbox: Arc<TOutbox>) -> Self {
        Self { queries, outbox }
    }

    /// One reminder per owner of open timesheets whose week ended before the current one.
    ///
    /// Reminders are keyed on the current week, so each owner hears about it once a week.
    pub async fn run(&self, now: DateTime<Utc>) -> Result<ReminderReport, ApplicationError> {
        let current_week = week_start(now.date_naive());
        let mut overdue = self
            .queries
            .open_timesheets()
            .await?
            .into_iter()
            .filter(|timesheet| timesheet.week_end < current_week)
            .collect::<Vec<_>>();
        overdue.sort_by_key(|timesheet| timesheet.week_start);

        let mut reminders: Vec<Reminder> = Vec::new();
        for timesheet in overdue {
            let index = match reminders
                .iter()
                .position(|reminder| reminder.recipient_id == timesheet.user.id)
            {
                Some(index) => index,
                None => {
                    reminders.push(Reminder {
                        kind: ReminderKind::PastDue,
                        recipient_id: timesheet.user.id,
                        week_start: current_week,
                        weeks: Vec::new(),
                    });
                    reminders.len() - 1
                }
            };
            reminders[index].weeks.push(timesheet.week_start);
        }
        info!(week = %current_week, recipients = reminders.len(), "past-due reminders prepared");
        Ok(dispatch(&*self.outbox, reminders, now).await)
    }
}
