//! Structured notification payloads.

use crate::task::domain::{TaskDetail, TaskId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Condensed task facts embedded in every payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    /// Task identifier.
    pub id: TaskId,
    /// Task display name.
    pub name: String,
    /// Category label.
    pub category: String,
    /// Calendar due date.
    pub due_date: NaiveDate,
    /// Client display name, if the task belongs to a client.
    pub client_name: Option<String>,
    /// Service display name, if the task belongs to a service.
    pub service_name: Option<String>,
}

impl TaskSummary {
    /// Builds a summary from the joined read model.
    #[must_use]
    pub fn from_detail(detail: &TaskDetail) -> Self {
        let task = detail.task();
        Self {
            id: task.id(),
            name: task.name().to_owned(),
            category: task.category().to_owned(),
            due_date: task.due_date(),
            client_name: detail.client_name().map(ToOwned::to_owned),
            service_name: detail.service_name().map(ToOwned::to_owned),
        }
    }
}

/// A dependent task affected by a delayed or adjusted predecessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffectedDependent {
    /// Task identifier.
    pub id: TaskId,
    /// Task display name.
    pub name: String,
    /// Calendar due date.
    pub due_date: NaiveDate,
    /// Whether this task's due date was already adjusted.
    pub due_date_adjusted: bool,
    /// Why the due date was adjusted, if it was.
    pub adjustment_reason: Option<String>,
}

impl AffectedDependent {
    /// Builds the dependent record from the joined read model.
    #[must_use]
    pub fn from_detail(detail: &TaskDetail) -> Self {
        let task = detail.task();
        Self {
            id: task.id(),
            name: task.name().to_owned(),
            due_date: task.due_date(),
            due_date_adjusted: task.due_date_adjusted(),
            adjustment_reason: task.adjustment_reason().map(ToOwned::to_owned),
        }
    }
}

/// An overdue chain member blocking a fixed deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayedPredecessor {
    /// Task identifier.
    pub id: TaskId,
    /// Task display name.
    pub name: String,
    /// Calendar due date.
    pub due_date: NaiveDate,
    /// Whole days past due.
    pub delay_days: i64,
}

/// The structured body persisted with each alert and history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationPayload {
    /// A task slipped past its due date.
    Overdue {
        /// The overdue task.
        task: TaskSummary,
        /// Whole days past due.
        delay_days: i64,
    },
    /// A task is due tomorrow.
    Upcoming {
        /// The upcoming task.
        task: TaskSummary,
        /// Days until due; always 1 for this scan.
        remaining_days: i64,
    },
    /// An overdue task is blocking its dependents.
    PredecessorDelay {
        /// The overdue prerequisite.
        predecessor: TaskSummary,
        /// Whole days the prerequisite is past due.
        delay_days: i64,
        /// The open tasks waiting on it.
        dependents: Vec<AffectedDependent>,
    },
    /// A delayed chain threatens an immovable deadline.
    FixedDeadlineConflict {
        /// The task whose deadline cannot move.
        fixed_task: TaskSummary,
        /// Chain members past their due dates.
        overdue_predecessors: Vec<DelayedPredecessor>,
        /// Chain members whose due dates were already pushed.
        adjusted_intermediates: Vec<AffectedDependent>,
    },
}
