//! Fan-out dispatch with partial-failure handling.

use super::throttle::{ThrottleGuard, ThrottleRefusal};
use crate::notification::domain::{
    task_link, Alert, NotificationHistoryEntry, NotificationKind, NotificationPayload, Recipient,
    TaskSummary,
};
use crate::notification::ports::{AlertRepository, NotificationHistoryRepository};
use crate::task::domain::{PersonId, TaskDetail, TaskId};
use crate::task::ports::TaskRepository;
use chrono::NaiveDateTime;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// One recipient whose alert write failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryFailure {
    recipient: PersonId,
    detail: String,
}

impl DeliveryFailure {
    /// Returns the recipient whose write failed.
    #[must_use]
    pub const fn recipient(&self) -> PersonId {
        self.recipient
    }

    /// Returns the failure detail.
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

/// Outcome of one dispatch batch.
///
/// `sent_count > 0` with failures is partial success; it still writes a
/// history entry and still blocks later same-day attempts. `sent_count == 0`
/// is total failure and leaves no history behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    task: TaskId,
    kind: NotificationKind,
    sent_count: usize,
    failures: Vec<DeliveryFailure>,
    refusal: Option<ThrottleRefusal>,
}

impl DispatchReport {
    /// Returns the task the batch was about.
    #[must_use]
    pub const fn task(&self) -> TaskId {
        self.task
    }

    /// Returns the notification kind.
    #[must_use]
    pub const fn kind(&self) -> NotificationKind {
        self.kind
    }

    /// Returns how many recipients received an alert.
    #[must_use]
    pub const fn sent_count(&self) -> usize {
        self.sent_count
    }

    /// Returns the per-recipient failures.
    #[must_use]
    pub fn failures(&self) -> &[DeliveryFailure] {
        &self.failures
    }

    /// Returns the throttle refusal, when the guard blocked the batch.
    #[must_use]
    pub const fn refusal(&self) -> Option<&ThrottleRefusal> {
        self.refusal.as_ref()
    }

    /// Returns true when every recipient received an alert.
    #[must_use]
    pub fn success(&self) -> bool {
        self.sent_count > 0 && self.failures.is_empty() && self.refusal.is_none()
    }

    /// Returns true when some, but not all, recipients received an alert.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.sent_count > 0 && !self.failures.is_empty()
    }

    /// Returns true when the throttle guard blocked the batch.
    #[must_use]
    pub const fn is_throttled(&self) -> bool {
        self.refusal.is_some()
    }
}

/// Fans one notification out to its recipients.
#[derive(Clone)]
pub struct NotificationDispatcher<T, H, A>
where
    T: TaskRepository,
    H: NotificationHistoryRepository,
    A: AlertRepository,
{
    guard: ThrottleGuard<T, H>,
    history: Arc<H>,
    alerts: Arc<A>,
}

impl<T, H, A> NotificationDispatcher<T, H, A>
where
    T: TaskRepository,
    H: NotificationHistoryRepository,
    A: AlertRepository,
{
    /// Creates a dispatcher over the given repositories.
    #[must_use]
    pub fn new(tasks: Arc<T>, history: Arc<H>, alerts: Arc<A>) -> Self {
        Self {
            guard: ThrottleGuard::new(tasks, Arc::clone(&history)),
            history,
            alerts,
        }
    }

    /// Dispatches one notification batch.
    ///
    /// The throttle guard is re-validated here as a defense against racing
    /// callers. Each recipient's alert write is attempted independently:
    /// failures are collected and logged but never abort the batch. When at
    /// least one recipient was reached, exactly one history entry is written
    /// for the whole batch; a failed history write is logged without
    /// flipping the outcome, because recipients already hold their alerts.
    pub async fn send(
        &self,
        detail: &TaskDetail,
        kind: NotificationKind,
        recipients: &[Recipient],
        payload: NotificationPayload,
        description: Option<String>,
        now: NaiveDateTime,
    ) -> DispatchReport {
        let task = detail.task().id();
        let decision = self.guard.evaluate(task, kind, now.date()).await;
        if let Some(refusal) = decision.refusal() {
            debug!(task = %task, kind = kind.as_str(), reason = %refusal, "dispatch throttled");
            return DispatchReport {
                task,
                kind,
                sent_count: 0,
                failures: Vec::new(),
                refusal: Some(refusal.clone()),
            };
        }

        let title = kind.title();
        let text = description.unwrap_or_else(|| default_description(&payload));
        let link = task_link(task);

        let mut sent_count = 0;
        let mut failures = Vec::new();
        for recipient in recipients {
            let alert = Alert::new(
                recipient,
                kind,
                title,
                text.clone(),
                link.clone(),
                payload.clone(),
                now,
            );
            match self.alerts.insert(alert).await {
                Ok(()) => sent_count += 1,
                Err(err) => {
                    warn!(
                        task = %task,
                        recipient = %recipient.id(),
                        error = %err,
                        "alert write failed"
                    );
                    failures.push(DeliveryFailure {
                        recipient: recipient.id(),
                        detail: err.to_string(),
                    });
                }
            }
        }

        if sent_count > 0 {
            let entry =
                NotificationHistoryEntry::new(task, kind, now, recipients.to_vec(), payload);
            if let Err(err) = self.history.append(entry).await {
                // Recipients already hold their alerts; the outcome stands.
                error!(task = %task, kind = kind.as_str(), error = %err, "history write failed");
            }
        }

        DispatchReport {
            task,
            kind,
            sent_count,
            failures,
            refusal: None,
        }
    }
}

/// Builds the kind-specific description used when the caller supplies none.
fn default_description(payload: &NotificationPayload) -> String {
    match payload {
        NotificationPayload::Overdue { task, delay_days } => format!(
            "{} was due {} and is {delay_days} day(s) overdue.",
            task_label(task),
            task.due_date
        ),
        NotificationPayload::Upcoming {
            task,
            remaining_days,
        } => format!(
            "{} is due in {remaining_days} day(s), on {}.",
            task_label(task),
            task.due_date
        ),
        NotificationPayload::PredecessorDelay {
            predecessor,
            delay_days,
            dependents,
        } => format!(
            "{} is {delay_days} day(s) overdue and blocks {} waiting task(s).",
            task_label(predecessor),
            dependents.len()
        ),
        NotificationPayload::FixedDeadlineConflict {
            fixed_task,
            overdue_predecessors,
            adjusted_intermediates,
        } => format!(
            "{} must finish by {}; {} overdue predecessor(s) and {} adjusted task(s) sit ahead of it.",
            task_label(fixed_task),
            fixed_task.due_date,
            overdue_predecessors.len(),
            adjusted_intermediates.len()
        ),
    }
}

/// Renders "Name (Client / Service)" with whatever halves are known.
fn task_label(summary: &TaskSummary) -> String {
    match (summary.client_name.as_deref(), summary.service_name.as_deref()) {
        (Some(client), Some(service)) => format!("{} ({client} / {service})", summary.name),
        (Some(client), None) => format!("{} ({client})", summary.name),
        (None, Some(service)) => format!("{} ({service})", summary.name),
        (None, None) => summary.name.clone(),
    }
}
