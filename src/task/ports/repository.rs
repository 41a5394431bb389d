//! Repository port for task lookup and the scan queries.

use crate::task::domain::{Task, TaskDetail, TaskId};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Read contract the chain resolver and the notification scans depend on.
///
/// Every `find_*` returning [`TaskDetail`] carries the same joined shape:
/// the task row plus client name, service name, task assignee, and client
/// assignee. Implementations must order detail results by due date, then by
/// task id, so scan output is deterministic.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Finds a task by identifier, including soft-deleted records.
    ///
    /// Returns `None` when the task does not exist. The throttle guard reads
    /// deleted tasks too; filtering them out is its own check.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Finds a task with its joined names by identifier.
    ///
    /// Returns `None` when the task does not exist. Used by the chain
    /// resolver one prerequisite hop at a time.
    async fn find_detail_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<TaskDetail>>;

    /// Returns open, non-deleted tasks with `due_date` strictly before
    /// `today`.
    async fn find_overdue(&self, today: NaiveDate) -> TaskRepositoryResult<Vec<TaskDetail>>;

    /// Returns open, non-deleted tasks due exactly on `date`.
    async fn find_due_on(&self, date: NaiveDate) -> TaskRepositoryResult<Vec<TaskDetail>>;

    /// Returns open, non-deleted tasks whose prerequisite is `id`.
    async fn find_dependents(&self, id: TaskId) -> TaskRepositoryResult<Vec<TaskDetail>>;

    /// Returns open, non-deleted tasks whose due date must not move.
    async fn find_fixed_deadline(&self) -> TaskRepositoryResult<Vec<TaskDetail>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
