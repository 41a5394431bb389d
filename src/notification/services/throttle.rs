//! At-most-once-per-day notification throttling.

use crate::notification::domain::NotificationKind;
use crate::notification::ports::NotificationHistoryRepository;
use crate::task::domain::{TaskId, TaskStatus};
use crate::task::ports::TaskRepository;
use chrono::NaiveDate;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Why the guard refused a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThrottleRefusal {
    /// The task does not exist.
    TaskNotFound(TaskId),
    /// The task was soft-deleted.
    TaskDeleted(TaskId),
    /// The task is completed or cancelled.
    TaskClosed {
        /// Task that was checked.
        id: TaskId,
        /// Its closing status.
        status: TaskStatus,
    },
    /// A notification of this kind already went out today.
    AlreadySentToday {
        /// Task that was checked.
        id: TaskId,
        /// Kind already sent.
        kind: NotificationKind,
    },
    /// A store lookup failed; the guard degrades to refusing.
    LookupFailed {
        /// Task that was checked.
        id: TaskId,
        /// Failure detail.
        detail: String,
    },
}

impl fmt::Display for ThrottleRefusal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TaskNotFound(id) => write!(f, "task {id} not found"),
            Self::TaskDeleted(id) => write!(f, "task {id} is deleted"),
            Self::TaskClosed { id, status } => {
                write!(f, "task {id} is {}", status.as_str())
            }
            Self::AlreadySentToday { id, kind } => {
                write!(f, "{} notification for task {id} already sent today", kind.as_str())
            }
            Self::LookupFailed { id, detail } => {
                write!(f, "lookup for task {id} failed: {detail}")
            }
        }
    }
}

/// The guard's verdict for one (task, kind, day) triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThrottleDecision {
    /// Nothing blocks the dispatch.
    Allow,
    /// The dispatch must not happen; the reason says why.
    Deny(ThrottleRefusal),
}

impl ThrottleDecision {
    /// Returns true when the dispatch may proceed.
    #[must_use]
    pub const fn should_send(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Returns the refusal reason, if the dispatch was denied.
    #[must_use]
    pub const fn refusal(&self) -> Option<&ThrottleRefusal> {
        match self {
            Self::Allow => None,
            Self::Deny(refusal) => Some(refusal),
        }
    }
}

/// Decides whether a (task, kind) pair may be notified today.
///
/// Checks run in order and short-circuit on the first failure: the task must
/// exist, must not be soft-deleted, must still be open, and must not already
/// have a history entry dated today. The guard never returns an error; a
/// failed store lookup degrades to a refusal and is logged.
#[derive(Clone)]
pub struct ThrottleGuard<T, H>
where
    T: TaskRepository,
    H: NotificationHistoryRepository,
{
    tasks: Arc<T>,
    history: Arc<H>,
}

impl<T, H> ThrottleGuard<T, H>
where
    T: TaskRepository,
    H: NotificationHistoryRepository,
{
    /// Creates a guard over the given repositories.
    #[must_use]
    pub const fn new(tasks: Arc<T>, history: Arc<H>) -> Self {
        Self { tasks, history }
    }

    /// Evaluates the guard for one (task, kind) pair on `today`.
    pub async fn evaluate(
        &self,
        task: TaskId,
        kind: NotificationKind,
        today: NaiveDate,
    ) -> ThrottleDecision {
        let record = match self.tasks.find_by_id(task).await {
            Ok(record) => record,
            Err(err) => {
                warn!(task = %task, error = %err, "throttle task lookup failed");
                return ThrottleDecision::Deny(ThrottleRefusal::LookupFailed {
                    id: task,
                    detail: err.to_string(),
                });
            }
        };
        let Some(found) = record else {
            return ThrottleDecision::Deny(ThrottleRefusal::TaskNotFound(task));
        };
        if found.is_deleted() {
            return ThrottleDecision::Deny(ThrottleRefusal::TaskDeleted(task));
        }
        if !found.status().is_open() {
            return ThrottleDecision::Deny(ThrottleRefusal::TaskClosed {
                id: task,
                status: found.status(),
            });
        }

        match self.history.find_on_day(task, kind, today).await {
            Ok(Some(_)) => ThrottleDecision::Deny(ThrottleRefusal::AlreadySentToday {
                id: task,
                kind,
            }),
            Ok(None) => ThrottleDecision::Allow,
            Err(err) => {
                warn!(task = %task, error = %err, "throttle history lookup failed");
                ThrottleDecision::Deny(ThrottleRefusal::LookupFailed {
                    id: task,
                    detail: err.to_string(),
                })
            }
        }
    }
}
