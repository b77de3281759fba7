// Reminder intents and their delivery through the outbox.
//
// A reminder is keyed by (kind, recipient, week). Enqueueing the same key twice is
// reported by the outbox as a duplicate and counted as already sent, so a scheduled job
// can be re-run safely.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};

use crate::shared::infrastructure::intent_outbox::{IntentOutbox, OutboxError, OutboxRow};

pub const REMINDER_TOPIC: &str = "notifications.reminders";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderKind {
    /// Nothing was logged during the previous week.
    NoHours,
    /// A past week was never submitted, or was rejected and not resubmitted.
    PastDue,
}

impl ReminderKind {
    pub fn intent_type(self) -> &'static str {
        match self {
            ReminderKind::NoHours => "reminder.no_hours",
            ReminderKind::PastDue => "reminder.past_due",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub kind: ReminderKind,
    pub recipient_id: String,
    /// Week the reminder is keyed on; one reminder per kind, recipient and week.
    pub week_start: NaiveDate,
    /// Past weeks concerned, oldest first. Empty for no-hours reminders.
    pub weeks: Vec<NaiveDate>,
}

impl Reminder {
    pub fn to_outbox_row(&self, now: DateTime<Utc>) -> OutboxRow {
        OutboxRow {
            topic: REMINDER_TOPIC.to_string(),
            intent_type: self.kind.intent_type().to_string(),
            recipient_id: self.recipient_id.clone(),
            dedupe_key: self.week_start.to_string(),
            occurred_at: now.timestamp_millis(),
            payload: json!({
                "userId": self.recipient_id,
                "weekStart": self.week_start,
                "weeks": self.weeks,
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderReport {
    pub sent: usize,
    pub already_sent: usize,
    pub failed: usize,
}

/// Enqueue every reminder; a failing recipient does not stop the others.
pub async fn dispatch<O>(outbox: &O, reminders: Vec<Reminder>, now: DateTime<Utc>) -> ReminderReport
where
    O: IntentOutbox + ?Sized,
{
    let mut report = ReminderReport::default();
    for reminder in reminders {
        match outbox.enqueue(reminder.to_outbox_row(now)).await {
            Ok(()) => report.sent += 1,
            Err(OutboxError::Duplicate { .. }) => report.already_sent += 1,
            Err(e) => {
                error!(recipient = %reminder.recipient_id, intent = reminder.kind.intent_type(), "reminder not queued: {e}");
                report.failed += 1;
            }
        }
    }
    info!(
        sent = report.sent,
        already_sent = report.already_sent,
        failed = report.failed,
        "reminders dispatched"
    );
    report
}
